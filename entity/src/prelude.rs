pub use super::donation::Entity as Donation;
pub use super::notification::Entity as Notification;
pub use super::rating::Entity as Rating;
pub use super::request::Entity as Request;
pub use super::user::Entity as User;

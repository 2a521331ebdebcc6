//! sea-orm entity models for the ShareFood schema.

pub mod prelude;

pub mod donation;
pub mod notification;
pub mod rating;
pub mod request;
pub mod user;

//! Database model type aliases.
//!
//! Short names for the SeaORM entity models used across services and controllers.

/// A registered user, owned by the identity provider.
pub type UserModel = entity::user::Model;

/// A food donation listing.
///
/// # Fields (from `entity::donation::Model`)
/// - `quantity_value` - Remaining amount in the canonical unit, never negative
/// - `quantity_unit` - Canonical unit, `kg` or `liter`
/// - `donation_status` - `available`, `confirmed`, `completed` or `canceled`
pub type DonationModel = entity::donation::Model;

/// A request by a user to receive part of a donation.
///
/// `requested_quantity` is free text whose leading token is the numeric amount.
pub type RequestModel = entity::request::Model;

/// A 1-5 rating left by a requester after a completed exchange.
pub type RatingModel = entity::rating::Model;

/// A notification record written for a user.
pub type NotificationModel = entity::notification::Model;

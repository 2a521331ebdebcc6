//! Service layer for business logic.
//!
//! Services validate input, run the donation and request lifecycles inside database
//! transactions, talk to the image host and emit notifications once changes are
//! committed. Reads are retried on transient connection failures via [`retry`].

pub mod auth;
pub mod donation;
pub mod image_host;
pub mod notification;
pub mod rating;
pub mod request;
pub mod retry;
pub mod user;

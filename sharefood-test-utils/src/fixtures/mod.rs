//! Test fixture modules for database and HTTP mock creation.
//!
//! - `user` - identity provider mirror rows
//! - `donation` - donation postings in any status
//! - `request` - pickup requests in any status
//! - `image_host` - mock upload endpoints

pub mod donation;
pub mod image_host;
pub mod request;
pub mod user;

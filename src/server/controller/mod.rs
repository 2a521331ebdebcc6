//! HTTP controller endpoints for the ShareFood web API.
//!
//! Controllers authenticate the caller, decode the request body, hand off to a service
//! and wrap the result in a DTO. Errors are returned as [`crate::server::error::Error`],
//! which renders itself as an `ErrorDto` response.

pub mod donation;
pub mod rating;
pub mod request;
pub mod util;

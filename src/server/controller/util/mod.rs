//! Utility functions for controller request handling.
//!
//! Bearer token authentication of the caller, multipart form decoding and JSON bodies
//! that reject with the API's error format.

pub mod auth_user;
pub mod form;
pub mod json;

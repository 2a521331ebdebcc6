//! ShareFood backend: donation, pickup request and rating lifecycle over a REST API.

pub mod model;
pub mod server;

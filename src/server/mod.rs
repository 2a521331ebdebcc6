//! Server application core modules.
//!
//! This module contains all server-side functionality for ShareFood: HTTP routing, the
//! donation / request / rating lifecycle services, database repositories, and the
//! clients for external collaborators (image host, notification sink).

#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;

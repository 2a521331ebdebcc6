//! Server application models and type definitions.
//!
//! This module contains data models for the server application, including application
//! state, database model type aliases and bearer token claims.

pub mod app;
pub mod auth;
pub mod db;

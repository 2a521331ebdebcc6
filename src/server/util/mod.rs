//! Utility functions and helpers for server operations.
//!
//! This module provides reusable helpers shared by controllers and services: quantity
//! parsing and unit normalization, and parsing of the string enums clients send.

pub mod parse;
pub mod quantity;

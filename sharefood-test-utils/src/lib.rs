//! Test harness for the ShareFood server.
//!
//! Tests are set up in two phases: a [`TestBuilder`] declares tables, users and mock
//! endpoints, and `build()` returns a [`TestContext`] holding an in-memory SQLite database
//! and a mockito server that stands in for the image host.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{TEST_JWT_SECRET, TEST_PICTURE_URL},
        TestBuilder, TestContext, TestError,
    };
}

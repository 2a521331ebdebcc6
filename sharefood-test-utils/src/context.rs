//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder` for test execution.
//! The context includes an in-memory SQLite database, a mock image host server and a
//! helper for signing bearer tokens.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::{constant::TEST_JWT_SECRET, error::TestError};

/// Test context structure returned by `TestBuilder`
///
/// # Usage
///
/// ```ignore
/// let mut test = TestBuilder::new().with_core_tables().with_user(1).build().await?;
///
/// let donation = test.donation().insert_donation(1, 5.0).await?;
/// let token = test.token_for(1)?;
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,

    /// Mock HTTP server standing in for the image host
    pub server: ServerGuard,
    /// Collection of mock HTTP endpoints for assertion
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Create a new test context with an empty in-memory database.
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            server,
            mocks: Vec::new(),
        })
    }

    /// Create database tables from schema statements.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Base URL of the mock image host.
    pub fn image_host_url(&self) -> String {
        self.server.url()
    }

    /// Signs a bearer token for `user_id` with [`TEST_JWT_SECRET`], valid for one hour.
    pub fn token_for(&self, user_id: i32) -> Result<String, TestError> {
        let exp = (Utc::now().timestamp() + 3600) as usize;
        let claims = serde_json::json!({ "sub": user_id.to_string(), "exp": exp });

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )?)
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}

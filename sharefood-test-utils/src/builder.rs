//! Declarative test builder.
//!
//! Configuration methods are queued and executed in order during the final `build()` call.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_core_tables: bool,

    // Database fixtures to insert
    users: Vec<i32>,

    // Mock endpoints to create
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,
    upload_endpoints: Vec<(String, usize)>, // (returned url, expected_requests)
}

impl TestBuilder {
    /// Create a new TestBuilder with nothing configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_core_tables: false,
            users: Vec::new(),
            mock_builders: Vec::new(),
            upload_endpoints: Vec::new(),
        }
    }

    /// Add every ShareFood table: users, donations, requests, ratings and notifications.
    pub fn with_core_tables(mut self) -> Self {
        self.include_core_tables = true;
        self
    }

    /// Add a single entity table to the test database.
    ///
    /// Chain multiple calls to add multiple tables, parents before children.
    ///
    /// ```no_run
    /// use sharefood_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), sharefood_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(User)
    ///     .with_table(Donation)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a user with the given ID during `build()`.
    pub fn with_user(mut self, user_id: i32) -> Self {
        self.users.push(user_id);
        self
    }

    /// Add a successful `POST /upload` endpoint returning `url`.
    pub fn with_upload_endpoint(
        mut self,
        url: impl Into<String>,
        expected_requests: usize,
    ) -> Self {
        self.upload_endpoints.push((url.into(), expected_requests));
        self
    }

    /// Add a custom mock endpoint with full control over the mockito server.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables (core tables if specified, then custom tables)
    /// 2. Inserts user fixtures
    /// 3. Creates mock HTTP endpoints (custom endpoints first, then upload endpoints)
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_core_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::User),
                schema.create_table_from_entity(entity::prelude::Donation),
                schema.create_table_from_entity(entity::prelude::Request),
                schema.create_table_from_entity(entity::prelude::Rating),
                schema.create_table_from_entity(entity::prelude::Notification),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for user_id in self.users {
            setup.user().insert_user(user_id).await?;
        }

        // 3. Create mock endpoints
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for (url, expected) in self.upload_endpoints {
            mocks.push(setup.image_host().create_upload_endpoint(&url, expected));
        }

        // Store mocks in setup so they live as long as the test
        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Test utilities for creating an AppState backed by a TestContext.

use sharefood::server::{
    model::app::{AppState, LifecycleSettings},
    service::image_host::ImageHostClient,
};
use sharefood_test_utils::prelude::*;

/// Extension trait for TestContext to create an AppState pointing at its mock image host
pub trait TestContextExt {
    fn into_app_state(&self) -> AppState;

    fn into_app_state_with(&self, settings: LifecycleSettings) -> AppState;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        self.into_app_state_with(LifecycleSettings::default())
    }

    fn into_app_state_with(&self, settings: LifecycleSettings) -> AppState {
        let image_host = ImageHostClient::new(self.image_host_url(), None)
            .expect("Failed to build image host client");

        AppState {
            db: self.db.clone(),
            image_host,
            jwt_secret: TEST_JWT_SECRET.to_string(),
            settings,
        }
    }
}

//! Mock image host endpoints.

use mockito::{Matcher, Mock};

use crate::TestContext;

impl TestContext {
    pub fn image_host<'a>(&'a mut self) -> ImageHostFixtures<'a> {
        ImageHostFixtures { setup: self }
    }
}

pub struct ImageHostFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> ImageHostFixtures<'a> {
    /// Create a `POST /upload` endpoint that answers `{"url": url}`.
    ///
    /// # Arguments
    /// - `url` - URL the image host reports for the stored file
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn create_upload_endpoint(&mut self, url: &str, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("POST", "/upload")
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "url": url }).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a `POST /upload` endpoint that fails with `status`.
    pub fn create_failing_upload_endpoint(
        &mut self,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("POST", "/upload")
            .with_status(status)
            .with_body("upstream unavailable")
            .expect(expected_requests)
            .create()
    }
}

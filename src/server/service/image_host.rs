//! Client for the external image host.
//!
//! Pictures are sent as a multipart `file` part to `{base_url}/upload`, the host answers
//! with the public URL of the stored file.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::server::error::Error;

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// A picture received from a client, not yet uploaded.
#[derive(Clone, Debug)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: Option<String>,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: Option<String>,
}

#[derive(Clone)]
pub struct ImageHostClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ImageHostClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("sharefood/", env!("CARGO_PKG_VERSION")))
            .timeout(UPLOAD_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Uploads `image` and returns its public URL.
    ///
    /// # Returns
    /// - `Ok(String)` - URL reported by the image host
    /// - `Err(Error::ImageHostError)` - Non-success status or a response without a URL
    /// - `Err(Error::ReqwestError)` - Connection failure or unreadable response body
    pub async fn upload(&self, image: ImageUpload) -> Result<String, Error> {
        let mut part = Part::bytes(image.bytes).file_name(image.filename.clone());
        if let Some(content_type) = image.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }

        let mut request = self
            .http
            .post(format!("{}/upload", self.base_url))
            .multipart(Form::new().part("file", part));

        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::ImageHostError(format!(
                "upload of {} returned status {}",
                image.filename, status
            )));
        }

        let body: UploadResponse = response.json().await?;

        match body.url {
            Some(url) if !url.trim().is_empty() => {
                tracing::debug!("Uploaded {} to {}", image.filename, url);
                Ok(url)
            }
            _ => Err(Error::ImageHostError(format!(
                "upload of {} returned no url",
                image.filename
            ))),
        }
    }
}

//! Environment based server configuration.

use std::net::SocketAddr;

use crate::server::error::config::ConfigError;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub image_host_url: String,
    pub image_host_api_key: Option<String>,
    pub listen_addr: SocketAddr,
    /// Reject every other waiting request of a donation once one of them is approved.
    pub auto_reject_on_approve: bool,
}

impl Config {
    /// Reads the configuration from environment variables.
    ///
    /// `.env` loading is left to the binary, this only reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = optional_var("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into());
        let listen_addr = listen_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: "LISTEN_ADDR".to_string(),
                reason: e.to_string(),
            })?;

        let auto_reject_on_approve = match optional_var("AUTO_REJECT_ON_APPROVE") {
            Some(value) => parse_bool("AUTO_REJECT_ON_APPROVE", &value)?,
            None => false,
        };

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            jwt_secret: required_var("JWT_SECRET")?,
            image_host_url: required_var("IMAGE_HOST_URL")?,
            image_host_api_key: optional_var("IMAGE_HOST_API_KEY"),
            listen_addr,
            auto_reject_on_approve,
        })
    }
}

fn required_var(var: &str) -> Result<String, ConfigError> {
    optional_var(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional_var(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("expected a boolean, got {other:?}"),
        }),
    }
}

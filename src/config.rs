//! Endpoint configuration read from the environment (and `.env`, if present).

use crate::error::{RegistryError, Result};
use std::env;

pub const SHEETS_ENDPOINT_VAR: &str = "HOLIDAY_SHEETS_ENDPOINT";
pub const UPLOADER_ENDPOINT_VAR: &str = "HOLIDAY_UPLOADER_ENDPOINT";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub sheets_endpoint: Option<String>,
    pub uploader_endpoint: Option<String>,
}

fn var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Settings {
    /// Loads `.env` from the working directory, if any, then reads the
    /// process environment. Variables already set win over `.env` entries.
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("Ignoring unreadable .env file: {e}"),
        }
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self {
            sheets_endpoint: var(SHEETS_ENDPOINT_VAR),
            uploader_endpoint: var(UPLOADER_ENDPOINT_VAR),
        }
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        sheets_endpoint: Option<String>,
        uploader_endpoint: Option<String>,
    ) -> Self {
        if sheets_endpoint.is_some() {
            self.sheets_endpoint = sheets_endpoint;
        }
        if uploader_endpoint.is_some() {
            self.uploader_endpoint = uploader_endpoint;
        }
        self
    }

    pub fn require_sheets_endpoint(&self) -> Result<&str> {
        self.sheets_endpoint.as_deref().ok_or_else(|| {
            RegistryError::ConfigError(format!(
                "{SHEETS_ENDPOINT_VAR} is not set and no --endpoint was given"
            ))
        })
    }

    pub fn require_uploader_endpoint(&self) -> Result<&str> {
        self.uploader_endpoint.as_deref().ok_or_else(|| {
            RegistryError::ConfigError(format!(
                "{UPLOADER_ENDPOINT_VAR} is not set and no --endpoint was given"
            ))
        })
    }
}

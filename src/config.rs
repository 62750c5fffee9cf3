use crate::constants::*;
use crate::env::{env_from, ReadEnv, SystemEnv};
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Settings shared by every fetch made through a [`Fetcher`](crate::shortcuts::Fetcher).
///
/// All fields have concrete values; a TOML file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetcherConfig {
    /// Encoding label used when a shortcut decodes text without an explicit one
    pub default_encoding: String,
    /// `User-Agent` header sent with HTTP requests
    pub user_agent: String,
    /// FTP login used when the URL carries no credentials
    pub ftp_user: String,
    pub ftp_password: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            default_encoding: DEFAULT_ENCODING.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_string(),
            ftp_user: FTP_DEFAULT_USER.to_string(),
            ftp_password: FTP_DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl FetcherConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// Unknown keys are rejected so typos are not silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `Config` if the TOML is malformed, has
    /// unknown keys or sets an empty encoding, and `UnknownEncoding` for an
    /// unrecognized encoding label.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        let config: FetcherConfig = toml::from_str(contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with the `BRFIED_*` process environment variables.
    pub fn from_env() -> AppResult<Self> {
        Self::default().overlay_env(&SystemEnv)
    }

    /// Replaces each field whose environment variable is set in `env`.
    pub fn overlay_env<E: ReadEnv>(self, env: &E) -> AppResult<Self> {
        let config = Self {
            default_encoding: env_from(env, ENV_DEFAULT_ENCODING, None)
                .unwrap_or(self.default_encoding),
            user_agent: env_from(env, ENV_USER_AGENT, None).unwrap_or(self.user_agent),
            ftp_user: env_from(env, ENV_FTP_USER, None).unwrap_or(self.ftp_user),
            ftp_password: env_from(env, ENV_FTP_PASSWORD, None).unwrap_or(self.ftp_password),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.default_encoding.trim().is_empty() {
            return Err(AppError::Config("default_encoding must not be empty".into()));
        }
        if encoding_rs::Encoding::for_label(self.default_encoding.trim().as_bytes()).is_none() {
            return Err(AppError::UnknownEncoding(self.default_encoding.clone()));
        }
        Ok(())
    }
}

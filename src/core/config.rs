//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::credentials::Credentials;
use crate::core::errors::{JuremyError, Result};

/// Production Juremy host
pub const JUREMY_URL_BASE: &str = "https://juremy.com";

/// Default credentials file
pub const DEFAULT_CREDENTIALS_PATH: &str = "juremy-credentials.json";

/// Configuration for the push client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub base_url: String,
    /// Fallback app token, used when no credential is stored
    pub app_token: Option<String>,
    /// Token given by flag or environment; wins over the stored one for this run
    #[serde(skip)]
    pub token_override: Option<String>,
    pub credentials_path: PathBuf,
    /// Longest query sent, in characters
    pub max_text_length: usize,
    /// Misroutes tolerated before giving up
    pub max_backoff_steps: u32,
    pub backoff_base_ms: u64,
    pub timeout_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: JUREMY_URL_BASE.to_string(),
            app_token: None,
            token_override: None,
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            max_text_length: 5000,
            max_backoff_steps: 6,
            backoff_base_ms: 100,
            timeout_ms: 30000,
        }
    }
}

impl LookupConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields with any `JUREMY_*` variables that are set
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Override fields from a variable source
    pub fn apply_vars<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = var("JUREMY_BASE_URL") {
            self.base_url = base_url;
        }

        if let Some(token) = var("JUREMY_APP_TOKEN") {
            if !token.trim().is_empty() {
                self.token_override = Some(token);
            }
        }

        if let Some(path) = var("JUREMY_CREDENTIALS") {
            self.credentials_path = PathBuf::from(path);
        }

        if let Some(timeout) = var("JUREMY_TIMEOUT_MS") {
            self.timeout_ms = parse_env("JUREMY_TIMEOUT_MS", &timeout)?;
        }

        if let Some(base) = var("JUREMY_BACKOFF_BASE_MS") {
            self.backoff_base_ms = parse_env("JUREMY_BACKOFF_BASE_MS", &base)?;
        }

        Ok(())
    }

    /// Load stored credentials; an override token becomes the session token
    pub fn credentials(&self) -> Result<Credentials> {
        let mut credentials = Credentials::load(&self.credentials_path, self.app_token.clone())?;
        if let Some(token) = &self.token_override {
            credentials.set(token, true)?;
        }
        Ok(credentials)
    }

    /// Load from a JSON or YAML file, picked by extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(config_error("base_url is required"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(config_error("base_url must be an http(s) URL"));
        }

        if self.max_text_length == 0 {
            return Err(config_error("max_text_length must be greater than 0"));
        }

        if self.max_backoff_steps == 0 {
            return Err(config_error("max_backoff_steps must be greater than 0"));
        }

        if self.timeout_ms == 0 {
            return Err(config_error("timeout_ms must be greater than 0"));
        }

        if self.base_url.starts_with("http://") {
            warn!("Using plain HTTP for {}", self.base_url);
        }

        Ok(())
    }

    /// Root of the app-push API
    pub fn api_base(&self) -> String {
        format!("{}/api/app-push/v1", self.base_url.trim_end_matches('/'))
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| JuremyError::Config {
        message: format!("{} has an invalid value: '{}'", name, value),
    })
}

fn config_error(message: &str) -> JuremyError {
    JuremyError::Config {
        message: message.to_string(),
    }
}

//! App token storage

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::errors::{JuremyError, Result};

/// On-disk representation
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    app_token: Option<String>,
}

/// App token sources: persisted, session-only and fallback
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    path: Option<PathBuf>,
    stored: Option<String>,
    session: Option<String>,
    fallback: Option<String>,
}

impl Credentials {
    /// In-memory credentials with only a fallback token
    pub fn with_fallback(fallback: Option<String>) -> Self {
        Self {
            fallback,
            ..Default::default()
        }
    }

    /// Load from a JSON file; a missing file means no stored token
    pub fn load<P: AsRef<Path>>(path: P, fallback: Option<String>) -> Result<Self> {
        let path = path.as_ref();
        let stored = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let parsed: StoredCredentials = serde_json::from_str(&content)?;
            parsed.app_token
        } else {
            debug!("No credentials file at {}", path.display());
            None
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            stored,
            session: None,
            fallback,
        })
    }

    /// Store a token. Temporary tokens live only for this session.
    pub fn set(&mut self, token: &str, temporary: bool) -> Result<()> {
        let token = token.trim().to_string();
        if temporary {
            self.session = Some(token);
            return Ok(());
        }

        self.session = None;
        self.stored = Some(token);
        self.save()
    }

    /// Whether the active token is session-only
    pub fn is_temporary(&self) -> bool {
        self.session.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// The configured token (session or stored), without fallback
    pub fn configured(&self) -> Option<&str> {
        [self.session.as_deref(), self.stored.as_deref()]
            .into_iter()
            .flatten()
            .find(|t| !t.is_empty())
    }

    /// Resolve the token to send, trimmed
    pub fn app_token(&self) -> Result<String> {
        self.configured()
            .or(self.fallback.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or(JuremyError::AppTokenNotFound)
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(&StoredCredentials {
            app_token: self.stored.clone(),
        })?;
        std::fs::write(path, content)?;
        debug!("Saved credentials to {}", path.display());
        Ok(())
    }
}

//! Machine-translation seam used by translation-memory hosts

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::core::client::PushClient;
use crate::core::errors::Result;
use crate::core::languages::Language;
use crate::core::models::PushOutcome;

/// Preference key a host uses to enable the Juremy lookup
pub const ALLOW_JUREMY_TRANSLATE: &str = "allow_juremy_translate";

/// One pluggable translator among those a host consults
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Display name
    fn name(&self) -> &str;

    /// Preference key enabling this translator in the host
    fn preference_name(&self) -> &str;

    /// Whether the translator has settings the user can edit
    fn is_configurable(&self) -> bool {
        false
    }

    /// Translate `text`. `Ok(None)` means no candidate to show.
    async fn translate(
        &self,
        source: &Language,
        target: &Language,
        text: &str,
    ) -> Result<Option<String>>;
}

/// Juremy lookup.
///
/// Never returns a translation: each request triggers a search in the
/// user's separately opened Juremy session instead. Results are not cached
/// since the search filters in Juremy may have changed between requests.
#[derive(Debug, Clone)]
pub struct JuremyLookup {
    client: PushClient,
}

impl JuremyLookup {
    pub fn new(client: PushClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &PushClient {
        &self.client
    }

    /// Store the app token and check the connection.
    ///
    /// The error is returned so the caller can show it and keep its
    /// settings form open.
    pub async fn configure(&self, token: &str, temporary: bool) -> Result<()> {
        self.client.set_app_token(token, temporary).await?;
        self.client.setup_route_and_ping().await
    }
}

#[async_trait]
impl MachineTranslator for JuremyLookup {
    fn name(&self) -> &str {
        "Juremy search push"
    }

    fn preference_name(&self) -> &str {
        ALLOW_JUREMY_TRANSLATE
    }

    fn is_configurable(&self) -> bool {
        true
    }

    async fn translate(
        &self,
        source: &Language,
        target: &Language,
        text: &str,
    ) -> Result<Option<String>> {
        match self.client.push_search(source, target, text).await {
            Ok(PushOutcome::Delivered) => debug!("search pushed"),
            Ok(PushOutcome::Superseded) => debug!("search superseded by a newer one"),
            Err(e) => {
                warn!("Juremy push failed: {}", e);
                return Err(e);
            }
        }
        Ok(None)
    }
}

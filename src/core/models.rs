//! Wire types of the Juremy app-push API and client-side results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Search triggered in the user's Juremy session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Search {
    /// ISO 639-3 source language
    pub src_lang: String,
    /// ISO 639-3 target language
    pub dst_lang: String,
    /// Query text
    pub q: String,
}

/// Body of a push request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<Search>,
    /// Set on the initial ping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected: Option<bool>,
}

impl PushRequest {
    /// Ping telling the session that a client is connected
    pub fn ping() -> Self {
        Self {
            search: None,
            connected: Some(true),
        }
    }

    pub fn search(search: Search) -> Self {
        Self {
            search: Some(search),
            connected: None,
        }
    }
}

/// Answer of the setup-route endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    pub routing: RoutingHeaders,
}

/// Header that routes a push to the right session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingHeaders {
    pub header_name: String,
    pub header_value: String,
}

/// What happened to a search push
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushOutcome {
    /// Juremy accepted the push
    Delivered,
    /// A newer search started while this one waited to retry
    Superseded,
}

impl fmt::Display for PushOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushOutcome::Delivered => write!(f, "delivered"),
            PushOutcome::Superseded => write!(f, "superseded"),
        }
    }
}

/// Push counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushStats {
    pub delivered: u64,
    pub superseded: u64,
    pub failed: u64,
    pub last_delivered: Option<chrono::DateTime<chrono::Utc>>,
}

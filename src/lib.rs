//! Juremy search push - sends translation segments to an open Juremy session
//!
//! This library lets a translation-memory host use Juremy as one of its
//! machine-translation lookups. Instead of returning a translation, each
//! lookup pushes the segment to Juremy, which runs the search in the
//! user's browser.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use core::{
    client::PushClient,
    config::LookupConfig,
    credentials::Credentials,
    errors::JuremyError,
    languages::Language,
    lookup::{JuremyLookup, MachineTranslator},
    models::{PushOutcome, PushRequest, PushStats, Search},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Core push engine module

pub mod backoff;
pub mod client;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod languages;
pub mod lookup;
pub mod models;
pub mod push_stats;

//! HTTP bridge module

pub mod api;

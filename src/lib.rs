//! Time Sync Utility Library
//!
//! This library provides functionality for extracting time entries from
//! markdown table rows and submitting them to a remote time-tracking
//! service.

pub mod config;
pub mod helpers;
pub mod models;
pub mod service;

pub use config::{SettingsStore, SyncConfig};
pub use service::SyncService;

// Re-export key types for convenience
pub use helpers::extract::{extract, Extraction, TIME_ROW_MARKER};
pub use helpers::sync::{submit, HttpTransport, SyncError, SyncTransport};
pub use models::document::ActiveDocument;
pub use models::entry::TimeEntry;

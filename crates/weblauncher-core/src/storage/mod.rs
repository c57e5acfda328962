//! Storage layer
//!
//! Handles the newline-delimited JSON data file, its single backup and the
//! one-time migration from legacy locations.

pub mod error;
pub mod migration;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use migration::{migrate_legacy, MigrationOutcome};
pub use persistence::{encode_sites, parse_line, LineOutcome, SitePersistence, StorageStats};

//! WebLauncher Core Library
//!
//! This crate provides the data-management core for WebLauncher, a personal
//! catalog of named website shortcuts grouped by category.
//!
//! # Architecture
//!
//! - **Store**: owns the in-memory sites and the data file; migrates,
//!   loads, seeds and saves
//! - **Query**: stateless filtering and search over a site collection
//! - **Validation**: URL shape checks, record validation, id assignment
//!
//! Front-ends hold a single `Store` and call it from one thread.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! // Add a site
//! let site = store.add("GitHub", "github.com", "技术")?;
//!
//! // Query sites
//! let tech = store.filter_by_category("技术");
//! let hits = store.search("git");
//! ```
//!
//! # Modules
//!
//! - `store`: Record store (main entry point)
//! - `query`: Category filter, keyword search, category listing
//! - `validation`: URL shape, record validation, identifiers
//! - `models`: The `Site` record and distinguished categories
//! - `defaults`: Built-in catalog seeded on first run
//! - `storage`: Data file persistence and legacy migration
//! - `config`: Application configuration

pub mod config;
pub mod defaults;
pub mod error;
pub mod models;
pub mod query;
pub mod storage;
pub mod store;
pub mod validation;

pub use config::Config;
pub use error::SiteError;
pub use models::{Site, ALL_CATEGORY, MINE_CATEGORY, OTHER_CATEGORY, PRESET_CATEGORIES};
pub use storage::{MigrationOutcome, StorageError, StorageStats};
pub use store::{LoadOrigin, LoadReport, Store};
pub use validation::ValidationError;

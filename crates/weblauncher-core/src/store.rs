//! Site store
//!
//! The `Store` owns the in-memory site collection and the data file, and
//! keeps the two in step after every mutation.
//!
//! ## Startup
//!
//! 1. Create the data directory if needed
//! 2. Copy a legacy data file into place if the data file is missing
//! 3. Load the data file, or seed and write the default catalog if absent
//!
//! Opening never fails: an unusable data directory, unreadable file or file
//! without valid records falls back to the default catalog without touching
//! the file.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;
//!
//! let site = store.add("GitHub", "github.com", "技术")?;
//! let tech = store.filter_by_category("技术");
//! let hits = store.search("git");
//! store.delete(&site.id)?;
//! ```

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::defaults::default_sites;
use crate::error::SiteError;
use crate::models::{Site, ALL_CATEGORY};
use crate::query;
use crate::storage::{
    migrate_legacy, LineOutcome, MigrationOutcome, SitePersistence, StorageResult, StorageStats,
};
use crate::validation::{is_valid_url, new_site_id, normalize_url};

/// Where the initial collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// No data file existed; the default catalog was written
    Seeded,
    /// Records were read from the data file
    Loaded,
    /// The data file held no valid records; defaults are used in memory only
    FallbackEmpty,
    /// The data file could not be read; defaults are used in memory only
    FallbackUnreadable,
}

/// Diagnostics collected while opening the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub origin: LoadOrigin,
    /// Valid records taken from the data file
    pub loaded: usize,
    /// Lines that were not well-formed JSON
    pub malformed: usize,
    /// Lines that were JSON but failed validation
    pub invalid: usize,
    pub migration: MigrationOutcome,
}

impl LoadReport {
    /// Total lines skipped while loading
    pub fn skipped(&self) -> usize {
        self.malformed + self.invalid
    }
}

/// Site store: in-memory collection plus its data file
pub struct Store {
    /// Sites in insertion order
    sites: Vec<Site>,
    /// Category remembered by `filter_by_category`
    current_filter: String,
    persistence: SitePersistence,
    config: Config,
    report: LoadReport,
}

impl Store {
    /// Open the store using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Ok(Self::open_with_config(config))
    }

    /// Open the store with a specific configuration
    ///
    /// Never fails. If the data directory cannot be created the store runs
    /// on the default catalog in memory and each save reports the error.
    pub fn open_with_config(config: Config) -> Self {
        let persistence = SitePersistence::new(config.clone());
        if let Err(e) = persistence.ensure_data_dir() {
            warn!("Failed to prepare data directory: {}", e);
        }

        let migration = migrate_legacy(&config.legacy_paths, &config.data_file());
        let (sites, report) = load_sites(&persistence, migration);

        info!(
            "Opened site store at {:?}: {} sites ({:?})",
            config.data_file(),
            sites.len(),
            report.origin
        );

        Self {
            sites,
            current_filter: ALL_CATEGORY.to_string(),
            persistence,
            config,
            report,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Diagnostics from opening the store
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Sizes and presence of the data and backup files
    pub fn storage_stats(&self) -> StorageStats {
        self.persistence.stats()
    }

    // ==================== Mutations ====================

    /// Add a new site and save
    ///
    /// The url gains an `https://` prefix when it has no http(s) scheme.
    /// A blank category falls back to the configured default.
    pub fn add(&mut self, name: &str, url: &str, category: &str) -> Result<Site, SiteError> {
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() {
            return Err(SiteError::EmptyField { field: "name" });
        }
        if url.is_empty() {
            return Err(SiteError::EmptyField { field: "url" });
        }

        let url = normalize_url(url);
        if !is_valid_url(&url) {
            return Err(SiteError::InvalidUrl { url });
        }

        let category = match category.trim() {
            "" => self.config.default_category.clone(),
            c => c.to_string(),
        };

        let site = Site::new(new_site_id(&category), name, url, category).with_created_now();
        self.sites.push(site.clone());

        if let Err(source) = self.save() {
            warn!("Site {} added in memory but not saved: {}", site.id, source);
            return Err(SiteError::NotPersisted {
                site: Box::new(site),
                source,
            });
        }

        info!("Added site {} ({})", site.id, site.url);
        Ok(site)
    }

    /// Delete the first site with the given id
    ///
    /// Returns `Ok(false)` without writing when nothing matched.
    pub fn delete(&mut self, id: &str) -> Result<bool, SiteError> {
        let Some(pos) = self.sites.iter().position(|s| s.id == id) else {
            return Ok(false);
        };

        self.sites.remove(pos);

        if let Err(e) = self.save() {
            warn!("Site {} deleted in memory but not saved: {}", id, e);
            return Err(SiteError::Storage(e));
        }

        info!("Deleted site {}", id);
        Ok(true)
    }

    /// Write the whole collection to the data file
    pub fn save(&self) -> StorageResult<()> {
        self.persistence.save(&self.sites)
    }

    // ==================== Queries ====================

    /// All sites in insertion order
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Get a site by id
    pub fn get(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == id)
    }

    /// Number of sites
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// The category remembered by the last `filter_by_category`
    pub fn current_filter(&self) -> &str {
        &self.current_filter
    }

    /// Sites in `category` (the wildcard returns all), remembering the filter
    pub fn filter_by_category(&mut self, category: &str) -> Vec<Site> {
        self.current_filter = category.to_string();
        self.refresh()
    }

    /// Sites under the current filter
    pub fn refresh(&self) -> Vec<Site> {
        query::filter_by_category(&self.sites, &self.current_filter)
    }

    /// Case-insensitive match on name or url, across all categories
    ///
    /// A blank keyword re-applies the current filter instead.
    pub fn search(&self, keyword: &str) -> Vec<Site> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.refresh();
        }
        query::search(&self.sites, keyword)
    }

    /// Distinct categories in use, sorted
    pub fn categories(&self) -> Vec<String> {
        query::categories(&self.sites)
    }

    /// Distinct categories with usage counts, sorted by name
    pub fn categories_with_counts(&self) -> Vec<(String, usize)> {
        query::categories_with_counts(&self.sites)
    }
}

/// Load the collection, falling back to the default catalog as needed
fn load_sites(persistence: &SitePersistence, migration: MigrationOutcome) -> (Vec<Site>, LoadReport) {
    let mut report = LoadReport {
        origin: LoadOrigin::Loaded,
        loaded: 0,
        malformed: 0,
        invalid: 0,
        migration,
    };

    if !persistence.exists() {
        let sites = default_sites();
        if let Err(e) = persistence.save(&sites) {
            warn!("Failed to write default catalog: {}", e);
        }
        report.origin = LoadOrigin::Seeded;
        return (sites, report);
    }

    let outcomes = match persistence.read() {
        Ok(outcomes) => outcomes,
        Err(e) => {
            warn!("Failed to read data file, using defaults: {}", e);
            report.origin = LoadOrigin::FallbackUnreadable;
            return (default_sites(), report);
        }
    };

    let mut sites = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            LineOutcome::Record(mut site) => {
                if site.id.is_empty() {
                    site.id = new_site_id(&site.category);
                }
                sites.push(site);
            }
            LineOutcome::Malformed { line, error } => {
                warn!("Skipping malformed line {}: {}", line, error);
                report.malformed += 1;
            }
            LineOutcome::Invalid { line, reason } => {
                warn!("Skipping invalid site on line {}: {}", line, reason);
                report.invalid += 1;
            }
        }
    }

    if sites.is_empty() {
        warn!("Data file has no valid sites, using defaults");
        report.origin = LoadOrigin::FallbackEmpty;
        return (default_sites(), report);
    }

    report.loaded = sites.len();
    (sites, report)
}

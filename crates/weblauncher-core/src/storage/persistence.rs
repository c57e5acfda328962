//! Data file persistence
//!
//! The data file holds one JSON object per line. Each line is parsed on its
//! own so a damaged line never hides the rest of the file.
//!
//! Saving copies the current file to `custom_sites.json.bak` (when backups
//! are enabled), then writes the new content to a temp file, syncs it and
//! renames it over the data file.
//!
//! Storage location: `~/.weblauncher/` (configurable via `Config`)

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::Config;
use crate::models::Site;
use crate::validation::{site_from_value, ValidationError};

use super::error::{StorageError, StorageResult};

/// Result of parsing one line of the data file
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// A valid site
    Record(Site),
    /// The line is not well-formed JSON
    Malformed { line: usize, error: String },
    /// The line is JSON but not an acceptable site
    Invalid { line: usize, reason: ValidationError },
}

/// Parse a single line; blank lines yield `None`
///
/// `line_no` is 1-based and only used for diagnostics.
pub fn parse_line(line_no: usize, line: &str) -> Option<LineOutcome> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            return Some(LineOutcome::Malformed {
                line: line_no,
                error: e.to_string(),
            })
        }
    };

    Some(match site_from_value(&value) {
        Ok(site) => LineOutcome::Record(site),
        Err(reason) => LineOutcome::Invalid {
            line: line_no,
            reason,
        },
    })
}

/// Encode sites as newline-delimited JSON, in collection order
pub fn encode_sites(sites: &[Site]) -> StorageResult<Vec<u8>> {
    let mut out = Vec::new();
    for site in sites {
        serde_json::to_writer(&mut out, site)?;
        out.push(b'\n');
    }
    Ok(out)
}

/// File sizes and presence, for status display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageStats {
    pub data_file_exists: bool,
    pub data_file_size: u64,
    pub backup_exists: bool,
    pub backup_size: u64,
}

impl StorageStats {
    /// Human-readable size of the data file
    pub fn data_file_size_human(&self) -> String {
        human_size(self.data_file_size)
    }
}

fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Persistence layer for the site data file
pub struct SitePersistence {
    config: Config,
}

impl SitePersistence {
    /// Create a new persistence handler with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if the data file exists on disk
    pub fn exists(&self) -> bool {
        self.config.data_file().exists()
    }

    /// Create the data directory if it is missing
    pub fn ensure_data_dir(&self) -> StorageResult<()> {
        let dir = &self.config.data_dir;
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| StorageError::CreateDirectory {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Read and parse every line of the data file
    ///
    /// Blank lines are dropped; everything else yields one outcome. A line
    /// that is not valid UTF-8 counts as malformed.
    pub fn read(&self) -> StorageResult<Vec<LineOutcome>> {
        let path = self.config.data_file();
        let content = fs::read(&path).map_err(|e| StorageError::from_read(e, path.clone()))?;

        Ok(content
            .split(|&b| b == b'\n')
            .enumerate()
            .filter_map(|(idx, raw)| match std::str::from_utf8(raw) {
                Ok(line) => parse_line(idx + 1, line),
                Err(e) => Some(LineOutcome::Malformed {
                    line: idx + 1,
                    error: e.to_string(),
                }),
            })
            .collect())
    }

    /// Write the full collection, backing up the previous file first
    pub fn save(&self, sites: &[Site]) -> StorageResult<()> {
        if self.config.backup_enabled {
            self.backup()?;
        }

        let bytes = encode_sites(sites)?;
        let target_path = self.config.data_file();
        atomic_write(&target_path, &bytes)?;

        debug!("Saved {} sites to {:?}", sites.len(), target_path);
        Ok(())
    }

    /// Copy the data file to its backup path
    ///
    /// Returns false when there is no data file to back up.
    pub fn backup(&self) -> StorageResult<bool> {
        let from = self.config.data_file();
        if !from.exists() {
            return Ok(false);
        }

        let to = self.config.backup_file();
        fs::copy(&from, &to).map_err(|source| StorageError::Backup {
            from: from.clone(),
            to: to.clone(),
            source,
        })?;

        debug!("Backed up {:?} to {:?}", from, to);
        Ok(true)
    }

    /// Sizes and presence of the data and backup files
    pub fn stats(&self) -> StorageStats {
        let data = fs::metadata(self.config.data_file()).ok();
        let backup = fs::metadata(self.config.backup_file()).ok();
        StorageStats {
            data_file_exists: data.is_some(),
            data_file_size: data.map(|m| m.len()).unwrap_or(0),
            backup_exists: backup.is_some(),
            backup_size: backup.map(|m| m.len()).unwrap_or(0),
        }
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// The temp file is removed again if any step fails.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    // Same directory so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let result = write_synced(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
            from: temp_path.clone(),
            to: path.to_path_buf(),
            source,
        })
    });

    if result.is_err() && temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            warn!("Failed to remove temp file {:?}: {}", temp_path, e);
        }
    }

    result
}

fn write_synced(path: &Path, data: &[u8]) -> StorageResult<()> {
    let mut file = File::create(path).map_err(|e| StorageError::from_io(e, path.to_path_buf()))?;
    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, path.to_path_buf()))?;
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_persistence(temp_dir: &TempDir) -> SitePersistence {
        SitePersistence::new(Config::with_data_dir(temp_dir.path()))
    }

    fn sample_sites() -> Vec<Site> {
        vec![
            Site::new("social_1", "微博", "https://weibo.com", "社交"),
            Site::new("tech_1", "GitHub", "https://github.com", "技术").with_created_now(),
        ]
    }

    #[test]
    fn test_parse_line_record() {
        let outcome = parse_line(
            1,
            r#"{"id": "tech_1", "name": "GitHub", "url": "https://github.com", "category": "技术"}"#,
        );
        match outcome {
            Some(LineOutcome::Record(site)) => {
                assert_eq!(site.name, "GitHub");
                assert_eq!(site.category, "技术");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_parse_line_blank() {
        assert!(parse_line(1, "").is_none());
        assert!(parse_line(2, "   ").is_none());
    }

    #[test]
    fn test_parse_line_malformed() {
        assert!(matches!(
            parse_line(3, "this is not json"),
            Some(LineOutcome::Malformed { line: 3, .. })
        ));
    }

    #[test]
    fn test_parse_line_invalid_url() {
        let outcome = parse_line(4, r#"{"id":"x","name":"X","url":"not a url"}"#);
        assert!(matches!(
            outcome,
            Some(LineOutcome::Invalid {
                line: 4,
                reason: ValidationError::InvalidUrl(_)
            })
        ));
    }

    #[test]
    fn test_parse_line_wrong_types() {
        let outcome = parse_line(5, r#"{"id":"x","name":42,"url":"https://a.com"}"#);
        assert!(matches!(
            outcome,
            Some(LineOutcome::Invalid {
                reason: ValidationError::Shape(_),
                ..
            })
        ));

        let outcome = parse_line(6, r#"["id", "Name", "https://a.com"]"#);
        assert!(matches!(
            outcome,
            Some(LineOutcome::Invalid {
                reason: ValidationError::Shape(_),
                ..
            })
        ));
    }

    #[test]
    fn test_encode_one_object_per_line() {
        let bytes = encode_sites(&sample_sites()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("微博"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_save_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);
        assert!(!persistence.exists());

        let sites = sample_sites();
        persistence.save(&sites).unwrap();
        assert!(persistence.exists());

        let loaded: Vec<Site> = persistence
            .read()
            .unwrap()
            .into_iter()
            .filter_map(|o| match o {
                LineOutcome::Record(site) => Some(site),
                _ => None,
            })
            .collect();
        assert_eq!(loaded, sites);
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);

        assert!(matches!(
            persistence.read(),
            Err(StorageError::NotFound { .. })
        ));
    }

    #[test]
    fn test_first_save_creates_no_backup() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);

        persistence.save(&sample_sites()).unwrap();
        assert!(!persistence.config().backup_file().exists());
    }

    #[test]
    fn test_save_backs_up_previous_content() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);
        let config = persistence.config().clone();

        let sites = sample_sites();
        persistence.save(&sites[..1]).unwrap();
        let first = fs::read(config.data_file()).unwrap();

        persistence.save(&sites).unwrap();
        assert_eq!(fs::read(config.backup_file()).unwrap(), first);
        assert_ne!(fs::read(config.data_file()).unwrap(), first);
    }

    #[test]
    fn test_backup_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::with_data_dir(temp_dir.path());
        config.backup_enabled = false;
        let persistence = SitePersistence::new(config.clone());

        persistence.save(&sample_sites()).unwrap();
        persistence.save(&sample_sites()).unwrap();
        assert!(!config.backup_file().exists());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);

        persistence.save(&sample_sites()).unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["custom_sites.json".to_string()]);
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir
            .path()
            .join("a")
            .join("b")
            .join("custom_sites.json");

        atomic_write(&nested_path, b"test data").unwrap();

        let content = fs::read_to_string(&nested_path).unwrap();
        assert_eq!(content, "test data");
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("custom_sites.json");
        fs::create_dir_all(target.join("occupied")).unwrap();

        let err = atomic_write(&target, b"data").unwrap_err();

        assert!(matches!(err, StorageError::AtomicWriteFailed { .. }));
        assert!(!temp_dir.path().join("custom_sites.json.tmp").exists());
        assert!(target.join("occupied").is_dir());
    }

    #[test]
    fn test_read_skips_only_bad_utf8_line() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);
        let mut content =
            br#"{"id":"keep","name":"Keep","url":"https://keep.example.com"}"#.to_vec();
        content.push(b'\n');
        content.extend_from_slice(&[0xff, 0xfe, b'\n']);
        fs::write(persistence.config().data_file(), content).unwrap();

        let outcomes = persistence.read().unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(&outcomes[0], LineOutcome::Record(site) if site.id == "keep"));
        assert!(matches!(outcomes[1], LineOutcome::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_ensure_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("x").join(".weblauncher");
        let persistence = SitePersistence::new(Config::with_data_dir(&nested));

        persistence.ensure_data_dir().unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_stats() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);
        assert_eq!(persistence.stats(), StorageStats::default());

        persistence.save(&sample_sites()).unwrap();
        persistence.save(&sample_sites()).unwrap();

        let stats = persistence.stats();
        assert!(stats.data_file_exists);
        assert!(stats.backup_exists);
        assert_eq!(stats.data_file_size, stats.backup_size);
        assert!(stats.data_file_size_human().ends_with('B'));
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(12), "12 B");
        assert_eq!(human_size(2048), "2.0 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }
}

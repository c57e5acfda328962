//! One-time migration from legacy data file locations
//!
//! Earlier releases kept the data file under per-platform directories.
//! On startup the first existing legacy file is copied to the canonical
//! path, but only while the canonical file is still missing. Legacy files
//! are never modified.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// What the migration step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The canonical file already existed
    NotNeeded,
    /// No legacy file was found, or every copy failed
    NoLegacyData,
    /// A legacy file was copied into place
    Migrated { from: PathBuf },
}

/// Copy the first available legacy file to `target` if `target` is missing
///
/// Copy failures are logged and the next candidate is tried.
pub fn migrate_legacy(candidates: &[PathBuf], target: &Path) -> MigrationOutcome {
    if target.exists() {
        return MigrationOutcome::NotNeeded;
    }

    for candidate in candidates {
        if !candidate.is_file() {
            continue;
        }

        match fs::copy(candidate, target) {
            Ok(_) => {
                info!("Migrated legacy data: {:?} -> {:?}", candidate, target);
                return MigrationOutcome::Migrated {
                    from: candidate.clone(),
                };
            }
            Err(e) => {
                warn!("Failed to migrate legacy data from {:?}: {}", candidate, e);
                // A partial copy must not count as an existing data file
                let _ = fs::remove_file(target);
            }
        }
    }

    MigrationOutcome::NoLegacyData
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LEGACY_LINE: &str =
        "{\"id\": \"tech_1\", \"name\": \"GitHub\", \"url\": \"https://github.com\", \"category\": \"技术\"}\n";

    fn write_legacy(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name).join("custom_sites.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_copies_first_existing_candidate() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing").join("custom_sites.json");
        let first = write_legacy(temp_dir.path(), "first", LEGACY_LINE);
        let second = write_legacy(temp_dir.path(), "second", "other\n");
        let target = temp_dir.path().join("custom_sites.json");

        let outcome = migrate_legacy(&[missing, first.clone(), second], &target);

        assert_eq!(outcome, MigrationOutcome::Migrated { from: first.clone() });
        assert_eq!(fs::read_to_string(&target).unwrap(), LEGACY_LINE);
        // Copy, not move
        assert_eq!(fs::read_to_string(&first).unwrap(), LEGACY_LINE);
    }

    #[test]
    fn test_existing_target_short_circuits() {
        let temp_dir = TempDir::new().unwrap();
        let legacy = write_legacy(temp_dir.path(), "old", LEGACY_LINE);
        let target = temp_dir.path().join("custom_sites.json");
        fs::write(&target, "current\n").unwrap();

        let outcome = migrate_legacy(&[legacy], &target);

        assert_eq!(outcome, MigrationOutcome::NotNeeded);
        assert_eq!(fs::read_to_string(&target).unwrap(), "current\n");
    }

    #[test]
    fn test_no_candidates() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("custom_sites.json");

        assert_eq!(migrate_legacy(&[], &target), MigrationOutcome::NoLegacyData);
        assert!(!target.exists());
    }

    #[test]
    fn test_directory_candidate_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let dir_candidate = temp_dir.path().join("a_directory");
        fs::create_dir_all(&dir_candidate).unwrap();
        let legacy = write_legacy(temp_dir.path(), "old", LEGACY_LINE);
        let target = temp_dir.path().join("custom_sites.json");

        let outcome = migrate_legacy(&[dir_candidate, legacy.clone()], &target);

        assert_eq!(outcome, MigrationOutcome::Migrated { from: legacy });
    }

    #[test]
    fn test_copy_failure_falls_through() {
        let temp_dir = TempDir::new().unwrap();
        let legacy = write_legacy(temp_dir.path(), "old", LEGACY_LINE);
        // Target directory does not exist, so every copy fails
        let target = temp_dir.path().join("nope").join("custom_sites.json");

        let outcome = migrate_legacy(&[legacy], &target);

        assert_eq!(outcome, MigrationOutcome::NoLegacyData);
        assert!(!target.exists());
    }
}

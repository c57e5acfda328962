//! Errors returned by store mutations

use thiserror::Error;

use crate::models::Site;
use crate::storage::StorageError;

/// Errors surfaced to the user by `add` and `delete`
#[derive(Error, Debug)]
pub enum SiteError {
    /// Name or url was blank
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// The url failed shape validation after normalization
    #[error("Invalid URL: '{url}'")]
    InvalidUrl { url: String },

    /// The site was added in memory but writing the data file failed
    #[error("Added '{}' but could not save it: {}", .site.name, .source)]
    NotPersisted {
        site: Box<Site>,
        #[source]
        source: StorageError,
    },

    /// A change was applied in memory but writing the data file failed
    #[error("Change could not be saved: {0}")]
    Storage(#[from] StorageError),
}

impl SiteError {
    /// Whether the in-memory collection was changed despite the error
    pub fn applied_in_memory(&self) -> bool {
        matches!(self, SiteError::NotPersisted { .. } | SiteError::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_display_messages() {
        let err = SiteError::EmptyField { field: "name" };
        assert_eq!(err.to_string(), "name must not be empty");

        let err = SiteError::InvalidUrl {
            url: "https://notaurl".to_string(),
        };
        assert!(err.to_string().contains("notaurl"));
        assert!(!err.applied_in_memory());
    }

    #[test]
    fn test_not_persisted_mentions_site() {
        let err = SiteError::NotPersisted {
            site: Box::new(Site::new("x", "Example", "https://example.com", "我的")),
            source: StorageError::NotFound {
                path: PathBuf::from("/data/custom_sites.json"),
            },
        };
        assert!(err.to_string().contains("Example"));
        assert!(err.applied_in_memory());
    }

    #[test]
    fn test_storage_conversion() {
        let err: SiteError = StorageError::Io(io::Error::new(io::ErrorKind::Other, "x")).into();
        assert!(matches!(err, SiteError::Storage(_)));
        assert!(err.applied_in_memory());
    }
}

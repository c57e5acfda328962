//! Identity and validation rules
//!
//! URL shape checks, record validation for data read from disk, and
//! identifier assignment for new sites.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Site, OTHER_CATEGORY};

/// Separator between the category and the random token of an id
pub const ID_SEPARATOR: char = '_';

/// Accepted URL shape: optional http(s) scheme, dotted host ending in an
/// alphabetic label of 2+ chars, optional port, optional plain path.
/// Query strings and fragments are rejected.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://)?([A-Za-z0-9-]+\.)+[A-Za-z]{2,}(:\d+)?(/[/\w.-]*)*$").unwrap()
});

/// Reasons a stored record is rejected at load time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("not a site record: {0}")]
    Shape(String),

    #[error("name is empty")]
    EmptyName,

    #[error("url is empty")]
    EmptyUrl,

    #[error("url '{0}' is not a valid web address")]
    InvalidUrl(String),
}

/// Check a string against the accepted URL shape
pub fn is_valid_url(url: &str) -> bool {
    URL_PATTERN.is_match(url)
}

/// Prefix `https://` unless the url already names an http(s) scheme
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Validate a record read from disk
pub fn validate_site(site: &Site) -> Result<(), ValidationError> {
    if site.name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if site.url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if !is_valid_url(&site.url) {
        return Err(ValidationError::InvalidUrl(site.url.clone()));
    }
    Ok(())
}

/// Build a site from one decoded line of the data file
///
/// Only `name` and `url` decide whether the record is kept. A non-string
/// `id` is left empty for the loader to replace, a non-string `category`
/// becomes `其他` and a non-string `created_at` is dropped.
pub fn site_from_value(value: &Value) -> Result<Site, ValidationError> {
    let Some(record) = value.as_object() else {
        return Err(ValidationError::Shape("expected a JSON object".to_string()));
    };

    let name = required_text(record, "name")?;
    let url = required_text(record, "url")?;
    let id = record.get("id").and_then(Value::as_str).unwrap_or_default();
    let category = record
        .get("category")
        .and_then(Value::as_str)
        .unwrap_or(OTHER_CATEGORY);

    let mut site = Site::new(id, name, url, category);
    site.created_at = record
        .get("created_at")
        .and_then(Value::as_str)
        .map(str::to_string);

    validate_site(&site)?;
    Ok(site)
}

/// A missing or null field reads as empty; any other non-string is a shape error
fn required_text<'a>(
    record: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a str, ValidationError> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(""),
        Some(Value::String(text)) => Ok(text.as_str()),
        Some(_) => Err(ValidationError::Shape(format!("{} is not a string", key))),
    }
}

/// Generate a fresh identifier: `<category>_<128-bit random hex>`
pub fn new_site_id(category: &str) -> String {
    format!("{}{}{}", category, ID_SEPARATOR, Uuid::new_v4().simple())
}

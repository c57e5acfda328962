//! Query functions over a site collection
//!
//! These never mutate the collection and never touch the disk. The store
//! wraps them and adds the remembered category filter.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Site, ALL_CATEGORY};

/// Sites whose category equals `category`; the wildcard returns everything
pub fn filter_by_category(sites: &[Site], category: &str) -> Vec<Site> {
    if category == ALL_CATEGORY {
        return sites.to_vec();
    }
    sites
        .iter()
        .filter(|s| s.category == category)
        .cloned()
        .collect()
}

/// Sites whose name or url contains `keyword`, ignoring case and category
///
/// Callers decide what a blank keyword means; here it matches everything.
pub fn search(sites: &[Site], keyword: &str) -> Vec<Site> {
    let needle = keyword.to_lowercase();
    sites
        .iter()
        .filter(|s| s.matches_keyword(&needle))
        .cloned()
        .collect()
}

/// Distinct categories in use, sorted
pub fn categories(sites: &[Site]) -> Vec<String> {
    sites
        .iter()
        .map(|s| s.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct categories with the number of sites in each, sorted by name
pub fn categories_with_counts(sites: &[Site]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for site in sites {
        *counts.entry(site.category.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

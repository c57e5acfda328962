//! Category command handlers

use anyhow::Result;

use weblauncher_core::{Store, ALL_CATEGORY, PRESET_CATEGORIES};

use crate::output::Output;

/// List preset categories followed by any others in use, with counts
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let categories = merge_with_presets(store.len(), &store.categories_with_counts());
    output.print_categories(&categories);
    Ok(())
}

/// Presets first in display order, then unknown categories in input order
///
/// The wildcard counts every site.
fn merge_with_presets(total: usize, in_use: &[(String, usize)]) -> Vec<(String, usize)> {
    let count_of = |name: &str| {
        in_use
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    };

    let mut merged: Vec<(String, usize)> = PRESET_CATEGORIES
        .iter()
        .map(|&name| {
            let count = if name == ALL_CATEGORY {
                total
            } else {
                count_of(name)
            };
            (name.to_string(), count)
        })
        .collect();

    merged.extend(
        in_use
            .iter()
            .filter(|(name, _)| !PRESET_CATEGORIES.contains(&name.as_str()))
            .cloned(),
    );
    merged
}

//! Site command handlers

use anyhow::{anyhow, bail, Context, Result};

use weblauncher_core::{SiteError, StorageError, Store, ALL_CATEGORY};

use crate::output::Output;
use crate::prompt::confirm;

/// List sites in a category (all sites when none is given)
pub fn list(store: &mut Store, category: Option<String>, output: &Output) -> Result<()> {
    let category = category.unwrap_or_else(|| ALL_CATEGORY.to_string());
    let sites = store.filter_by_category(&category);
    output.print_sites(&sites);
    Ok(())
}

/// Add a new site
pub fn add(
    store: &mut Store,
    name: String,
    url: String,
    category: Option<String>,
    output: &Output,
) -> Result<()> {
    match store.add(&name, &url, category.as_deref().unwrap_or("")) {
        Ok(site) => {
            output.success(&format!("Added site: {}", site.name));
            output.print_site(&site);
            Ok(())
        }
        Err(SiteError::NotPersisted { site, source }) => {
            output.print_site(&site);
            Err(save_failure(
                source,
                "Site was added but the data file could not be saved",
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete a site
pub fn delete(store: &mut Store, id: String, yes: bool, output: &Output) -> Result<()> {
    let site = store
        .get(&id)
        .cloned()
        .ok_or_else(|| anyhow!("Site not found: {}", id))?;

    if !yes && output.should_prompt() {
        println!("Delete site: {} - {}", site.name, site.url);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    match store.delete(&id) {
        Ok(true) => {}
        Ok(false) => bail!("Site not found: {}", id),
        Err(SiteError::Storage(source)) => {
            return Err(save_failure(
                source,
                "Site was deleted but the data file could not be saved",
            ))
        }
        Err(e) => return Err(anyhow::Error::new(e).context("Failed to delete site")),
    }

    output.success(&format!("Deleted site: {}", site.name));
    Ok(())
}

/// Search sites by keyword
///
/// An empty keyword lists the currently selected category.
pub fn search(store: &Store, keyword: String, output: &Output) -> Result<()> {
    let sites = store.search(&keyword);
    output.print_sites(&sites);
    Ok(())
}

/// Open a site's URL in the default browser
pub fn open(store: &Store, id: String, output: &Output) -> Result<()> {
    let site = store
        .get(&id)
        .ok_or_else(|| anyhow!("Site not found: {}", id))?;

    open::that(&site.url).with_context(|| format!("Failed to open {}", site.url))?;

    output.message(&format!("Opening: {}", site.url));
    Ok(())
}

/// Wrap a failed save, appending a recovery hint when one applies
fn save_failure(source: StorageError, what: &'static str) -> anyhow::Error {
    let hint = source.recovery_suggestion();
    let err = anyhow::Error::new(source);
    match hint {
        Some(hint) => err.context(format!("{}\n  hint: {}", what, hint)),
        None => err.context(what),
    }
}

//! Status command handler

use anyhow::Result;

use weblauncher_core::{LoadOrigin, MigrationOutcome, Store};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let stats = store.storage_stats();
    let config = store.config();
    let report = store.load_report();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_file": config.data_file(),
                    "backup_file": config.backup_file(),
                    "sites": store.len(),
                    "categories": store.categories().len(),
                    "storage": {
                        "data_file_exists": stats.data_file_exists,
                        "data_file_size": stats.data_file_size,
                        "backup_exists": stats.backup_exists,
                        "backup_size": stats.backup_size
                    },
                    "load": {
                        "origin": origin_label(report.origin),
                        "loaded": report.loaded,
                        "malformed": report.malformed,
                        "invalid": report.invalid,
                        "migration": migration_label(&report.migration)
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", store.len());
        }
        OutputFormat::Human => {
            println!("WebLauncher Status");
            println!("==================");
            println!();
            println!("Storage:");
            println!("  Data file: {}", config.data_file().display());
            println!("  Size:      {}", stats.data_file_size_human());
            println!(
                "  Backup:    {}",
                if stats.backup_exists {
                    config.backup_file().display().to_string()
                } else if config.backup_enabled {
                    "(none yet)".to_string()
                } else {
                    "disabled".to_string()
                }
            );
            println!();
            println!("Load:");
            println!("  Source:    {}", origin_label(report.origin));
            println!("  Migration: {}", migration_label(&report.migration));
            if report.skipped() > 0 {
                println!(
                    "  Skipped:   {} malformed, {} invalid line(s)",
                    report.malformed, report.invalid
                );
            }
            println!();
            println!("Contents:");
            println!("  Sites:      {}", store.len());
            println!("  Categories: {}", store.categories().len());
        }
    }

    if report.skipped() > 0 {
        output.warning(&format!(
            "{} line(s) in the data file were skipped; they will be dropped on the next save",
            report.skipped()
        ));
    }

    Ok(())
}

fn origin_label(origin: LoadOrigin) -> &'static str {
    match origin {
        LoadOrigin::Seeded => "default catalog (new data file)",
        LoadOrigin::Loaded => "data file",
        LoadOrigin::FallbackEmpty => "default catalog (no valid sites in data file)",
        LoadOrigin::FallbackUnreadable => "default catalog (data file unreadable)",
    }
}

fn migration_label(outcome: &MigrationOutcome) -> String {
    match outcome {
        MigrationOutcome::NotNeeded => "not needed".to_string(),
        MigrationOutcome::NoLegacyData => "no legacy data found".to_string(),
        MigrationOutcome::Migrated { from } => format!("copied from {}", from.display()),
    }
}

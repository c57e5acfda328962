//! WebLauncher CLI
//!
//! Command-line front-end for WebLauncher - a personal catalog of website
//! shortcuts. All data handling lives in `weblauncher-core`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use weblauncher_core::{Config, Store};

mod commands;
mod logging;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "weblauncher")]
#[command(about = "WebLauncher - your catalog of website shortcuts")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use a specific config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List sites, optionally in one category
    #[command(alias = "ls")]
    List {
        /// Category to show ("全部" shows everything)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add a site
    Add {
        /// Display name
        name: String,
        /// Address (https:// is added when no scheme is given)
        url: String,
        /// Category (defaults to the configured default category)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a site
    #[command(alias = "rm")]
    Delete {
        /// Site ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Search sites by name or URL
    Search {
        /// Keyword; empty lists the selected category instead
        keyword: Option<String>,
        /// Category shown when the keyword is empty
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List categories
    Categories,
    /// Open a site in the browser
    Open {
        /// Site ID
        id: String,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show data file location and load diagnostics
    Status,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, backup_enabled, default_category, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, &output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key, value, config_path, &output)
            }
        };
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    logging::init(&config);

    let mut store = Store::open_with_config(config);

    match cli.command {
        None => commands::site::list(&mut store, None, &output),
        Some(Commands::List { category }) => commands::site::list(&mut store, category, &output),
        Some(Commands::Add {
            name,
            url,
            category,
        }) => commands::site::add(&mut store, name, url, category, &output),
        Some(Commands::Delete { id, yes }) => commands::site::delete(&mut store, id, yes, &output),
        Some(Commands::Search { keyword, category }) => {
            if let Some(category) = category {
                store.filter_by_category(&category);
            }
            commands::site::search(&store, keyword.unwrap_or_default(), &output)
        }
        Some(Commands::Categories) => commands::category::list(&store, &output),
        Some(Commands::Open { id }) => commands::site::open(&store, id, &output),
        Some(Commands::Status) => commands::status::show(&store, &output),
        Some(Commands::Config { .. }) => unreachable!(), // Handled above
    }
}

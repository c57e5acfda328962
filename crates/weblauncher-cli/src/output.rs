//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use weblauncher_core::Site;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single site
    pub fn print_site(&self, site: &Site) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", site.id);
                println!("Name:     {}", site.name);
                println!("URL:      {}", site.url);
                println!("Category: {}", site.category);
                if let Some(ref created) = site.created_at {
                    println!("Created:  {}", created);
                }
            }
            OutputFormat::Json => {
                println!("{}", to_json(site));
            }
            OutputFormat::Quiet => {
                println!("{}", site.id);
            }
        }
    }

    /// Print a list of sites
    pub fn print_sites(&self, sites: &[Site]) {
        match self.format {
            OutputFormat::Human => {
                if sites.is_empty() {
                    println!("No sites found.");
                    return;
                }
                for site in sites {
                    println!(
                        "{} | {} | {} | {}",
                        truncate(&site.id, 24),
                        truncate(&site.name, 20),
                        site.category,
                        truncate(&site.url, 45)
                    );
                }
                println!("\n{} site(s)", sites.len());
            }
            OutputFormat::Json => {
                println!("{}", to_json(sites));
            }
            OutputFormat::Quiet => {
                for site in sites {
                    println!("{}", site.id);
                }
            }
        }
    }

    /// Print categories with usage counts (0 for presets not yet used)
    pub fn print_categories(&self, categories: &[(String, usize)]) {
        match self.format {
            OutputFormat::Human => {
                for (name, count) in categories {
                    println!("{} ({})", name, count);
                }
                println!("\n{} categories", categories.len());
            }
            OutputFormat::Json => {
                let json: Vec<_> = categories
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                println!("{}", to_json(&json));
            }
            OutputFormat::Quiet => {
                for (name, _) in categories {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning to stderr (suppressed in quiet mode)
    pub fn warning(&self, message: &str) {
        if self.format != OutputFormat::Quiet {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

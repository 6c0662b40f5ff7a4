//! CLI command definitions and output printing.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use anyhow::{Context, Result};
use reviewdoc::models::{ContextItem, SubmenuItem};

use args::{ItemFormat, ListFormat};

/// Print context items to stdout in the requested format.
pub fn print_items(items: &[ContextItem], format: ItemFormat) -> Result<()> {
    match format {
        ItemFormat::Markdown => {
            let docs: Vec<&str> = items.iter().map(|item| item.content.as_str()).collect();
            println!("{}", docs.join("\n\n"));
        }
        ItemFormat::Json => {
            let json = serde_json::to_string_pretty(items).context("failed to serialize items")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Print submenu entries to stdout in the requested format.
pub fn print_submenu(items: &[SubmenuItem], format: ListFormat) -> Result<()> {
    use colored::Colorize;

    match format {
        ListFormat::Text => {
            if items.is_empty() {
                eprintln!("No issues found.");
            }
            for item in items {
                println!("  {}  {}", item.id.dimmed(), item.title.bold());
            }
        }
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(items).context("failed to serialize issues")?;
            println!("{json}");
        }
    }
    Ok(())
}

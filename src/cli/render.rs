//! Shared printing for resolution results and cache statistics

use colored::Colorize;

use crate::cache::{CacheStats, format_ttl};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::models::{ResolutionDisplay, StatsDisplay};
use crate::output;

/// Print resolution rows in the requested format.
pub fn print_resolutions(rows: Vec<ResolutionDisplay>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Pretty => {
            for row in &rows {
                println!("{}", pretty_line(row));
            }
            Ok(())
        }
        _ => output::print(&rows, format),
    }
}

fn pretty_line(row: &ResolutionDisplay) -> String {
    let marker = match row.outcome.as_str() {
        "ok" => "✓".green(),
        "invalid_input" | "backend_unavailable" => "✗".red(),
        _ => "○".dimmed(),
    };

    let mut line = format!("{} {} → {}", marker, row.id, row.name.bold());
    if !row.kind.is_empty() {
        line.push_str(&format!(" ({})", row.kind));
    }
    if !row.tenant_name.is_empty() {
        line.push_str(&format!(" [tenant: {}]", row.tenant_name));
    }
    if !row.is_ok() {
        line.push_str(&format!(" {}", row.outcome.dimmed()));
    }
    line
}

/// Print a cache statistics snapshot.
pub fn print_stats(stats: &CacheStats, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", crate::output::json::format_json(stats)?);
        }
        OutputFormat::Table => {
            output::print(&vec![StatsDisplay::from(stats)], format)?;
        }
        OutputFormat::Pretty => {
            println!("Name Cache");
            println!("────────────────────────────────────────");
            println!("Entries:        {}", stats.total);
            println!("Found:          {}", stats.found);
            println!("Not found:      {}", stats.not_found);
            println!("Expired:        {}", stats.expired);
            println!("Cache TTL:      {}", format_ttl(stats.cache_ttl));
            println!("Not-found TTL:  {}", format_ttl(stats.not_found_ttl));
        }
    }
    Ok(())
}

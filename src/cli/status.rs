//! Status command implementation

use colored::Colorize;

use crate::backend::SqliteBackend;
use crate::cache::format_ttl;
use crate::cli::args::GlobalOptions;
use crate::cli::context::load_config;
use crate::config::Config;
use crate::error::Result;

/// Show the effective configuration and whether the backend can be opened
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "namecache Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().cyan(),
            "(not found, using defaults)".dimmed()
        );
    }

    let config = load_config(opts)?;
    let resolver = config.resolver_config();

    println!();
    println!("Cache TTL:      {}", format_ttl(resolver.cache_ttl));
    println!("Not-found TTL:  {}", format_ttl(resolver.not_found_ttl));
    println!("Miss log:       {}", resolver.miss_log_path.display());
    println!();

    match config.backend {
        None => {
            println!("{} No lookup backend configured", "✗".red());
            println!("  → Pass --backend <PATH> or run 'namecache init --backend <PATH>'");
        }
        Some(ref backend) => match SqliteBackend::open(&backend.path, backend.busy_timeout()) {
            Ok(_) => {
                println!(
                    "{} Lookup backend: {}",
                    "✓".green(),
                    backend.path.display()
                );
            }
            Err(e) => {
                println!("{} Lookup backend unavailable: {}", "✗".red(), e);
                println!(
                    "  {}",
                    "Names will echo their ids until the backend is reachable".dimmed()
                );
            }
        },
    }

    println!();
    Ok(())
}

//! Init command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Settings collected from `namecache init` flags
#[derive(Debug, Default)]
pub struct InitArgs {
    pub cache_ttl: Option<u64>,
    pub not_found_ttl: Option<u64>,
    pub busy_timeout_ms: Option<u64>,
    pub force: bool,
}

/// Write a configuration file from defaults, flags, and global overrides.
pub fn run(opts: &GlobalOptions, args: InitArgs) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;

    if path.exists() && !args.force {
        return Err(ConfigError::Invalid(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ))
        .into());
    }

    let config = build_config(opts, &args)?;
    config.save_to(&path)?;

    println!(
        "{} Configuration saved to {}",
        "✓".green(),
        path.display().to_string().cyan()
    );
    if config.backend.is_none() {
        println!(
            "{}",
            "  No lookup backend set; names will echo their ids. Re-run with --backend <PATH>."
                .dimmed()
        );
    }

    Ok(())
}

fn build_config(opts: &GlobalOptions, args: &InitArgs) -> Result<Config> {
    let mut config = Config::default();
    opts.apply_to(&mut config);

    if let Some(secs) = args.cache_ttl {
        config.cache_ttl_secs = secs;
    }
    if let Some(secs) = args.not_found_ttl {
        config.not_found_ttl_secs = secs;
    }
    if let Some(ms) = args.busy_timeout_ms {
        match config.backend.as_mut() {
            Some(backend) => backend.busy_timeout_ms = ms,
            None => log::warn!("--busy-timeout-ms ignored without --backend"),
        }
    }

    config.validate()?;
    Ok(config)
}

//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod completions;
pub mod context;
pub mod init;
pub mod render;
pub mod resolve;
pub mod status;
pub mod watch;

pub use args::OutputFormat;
pub use context::ResolverContext;

/// namecache - resolve cluster and tenant ids to display names
#[derive(Parser, Debug)]
#[command(name = "namecache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "NAMECACHE_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "NAMECACHE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Path to the SQLite lookup database
    #[arg(long, global = true, env = "NAMECACHE_BACKEND", hide_env = true)]
    pub backend: Option<PathBuf>,

    /// Where to append the miss audit log
    #[arg(long, global = true, env = "NAMECACHE_MISS_LOG", hide_env = true)]
    pub miss_log: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, env = "NAMECACHE_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a configuration file
    Init {
        /// Lifetime of resolved names, in seconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        cache_ttl: Option<u64>,

        /// Lifetime of confirmed misses, in seconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        not_found_ttl: Option<u64>,

        /// How long backend queries wait on a locked database, in milliseconds
        #[arg(long)]
        busy_timeout_ms: Option<u64>,

        /// Overwrite an existing configuration file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show configuration and backend status
    Status,

    /// Display version information
    Version,

    /// Resolve ids to names
    #[command(
        visible_alias = "r",
        after_help = "EXAMPLES:\n  \
            namecache resolve 10001 10002          # Resolve two ids\n  \
            namecache resolve 10001 --format json  # JSON for scripting\n  \
            cat ids.txt | namecache resolve --stdin --stats"
    )]
    Resolve {
        /// Ids to resolve
        #[arg(required_unless_present = "stdin")]
        ids: Vec<String>,

        /// Read ids from stdin (one per line)
        #[arg(long)]
        stdin: bool,

        /// Print cache statistics after resolving
        #[arg(long)]
        stats: bool,
    },

    /// Resolve ids from stdin continuously, sweeping expired entries on a timer
    #[command(after_help = "\
Each input line is an id to resolve, or one of:
  :stats   print cache statistics
  :clean   remove expired entries now
  :clear   discard every cached entry
  :quit    exit")]
    Watch {
        /// Seconds between expired-entry sweeps
        #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u64).range(1..))]
        sweep_interval: u64,
    },

    /// Generate shell completions (static)
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

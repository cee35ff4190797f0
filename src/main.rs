//! namecache - cached id -> display name resolution for clusters and tenants

use clap::Parser;

mod audit;
mod backend;
mod cache;
mod cli;
mod config;
mod error;
mod models;
mod output;
mod resolver;

use cli::args::GlobalOptions;
use cli::init::InitArgs;
use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Warnings by default, everything at debug with `--debug`; `RUST_LOG` wins over both.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();
    log::debug!("Debug logging enabled");
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init {
            cache_ttl,
            not_found_ttl,
            busy_timeout_ms,
            force,
        } => cli::init::run(
            &opts,
            InitArgs {
                cache_ttl,
                not_found_ttl,
                busy_timeout_ms,
                force,
            },
        ),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("namecache version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Resolve { ids, stdin, stats } => {
            cli::resolve::run(&opts, ids, stdin, stats).await
        }
        Commands::Watch { sweep_interval } => cli::watch::run(&opts, sweep_interval).await,
        Commands::Completion { shell } => cli::completions::run(shell),
    }
}

//! Watch command: a long-running resolver fed from stdin
//!
//! Each line is resolved and printed as soon as it arrives. A background
//! task sweeps expired cache entries on a fixed interval for as long as the
//! command runs.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use crate::cli::args::GlobalOptions;
use crate::cli::{ResolverContext, render};
use crate::error::Result;
use crate::models::ResolutionDisplay;
use crate::resolver::Resolver;

/// A line of watch input
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Resolve(&'a str),
    Stats,
    Clean,
    Clear,
    Quit,
    Unknown(&'a str),
    Blank,
}

fn parse_line(line: &str) -> Input<'_> {
    match line.trim() {
        "" => Input::Blank,
        ":stats" => Input::Stats,
        ":clean" => Input::Clean,
        ":clear" => Input::Clear,
        ":quit" | ":q" => Input::Quit,
        cmd if cmd.starts_with(':') => Input::Unknown(cmd),
        id => Input::Resolve(id),
    }
}

/// Run the watch loop until stdin closes, `:quit`, or Ctrl-C.
pub async fn run(opts: &GlobalOptions, sweep_interval: u64) -> Result<()> {
    let ctx = ResolverContext::new(opts)?;
    if !ctx.resolver.is_backend_available() {
        eprintln!("Lookup backend unavailable; numeric ids will echo back unresolved");
    }
    let sweeper = spawn_sweeper(ctx.resolver.clone(), Duration::from_secs(sweep_interval));

    let result = watch_loop(&ctx).await;

    sweeper.abort();
    result
}

async fn watch_loop(ctx: &ResolverContext) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        match parse_line(&line) {
            Input::Blank => {}
            Input::Quit => break,
            Input::Resolve(id) => {
                let result = ctx.resolver.resolve(id).await;
                let row = ResolutionDisplay::from_result(id, &result);
                render::print_resolutions(vec![row], ctx.format)?;
            }
            Input::Stats => render::print_stats(&ctx.resolver.stats().await, ctx.format)?,
            Input::Clean => {
                let cleaned = ctx.resolver.clean_expired().await;
                println!("Removed {} expired entries", cleaned);
            }
            Input::Clear => {
                ctx.resolver.clear().await;
                println!("Cache cleared");
            }
            Input::Unknown(cmd) => {
                eprintln!("Unknown command: {} (try :stats, :clean, :clear, :quit)", cmd);
            }
        }
    }

    log::debug!("Watch input closed");
    Ok(())
}

/// Sweep expired entries every `interval` until the returned task is aborted.
pub fn spawn_sweeper(resolver: Arc<Resolver>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let cleaned = resolver.clean_expired().await;
            log::debug!("Periodic sweep removed {} entries", cleaned);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MissAuditor;
    use crate::backend::MockBackend;
    use crate::cache::clock::ManualClock;
    use crate::cache::{CacheStore, CacheTtl};

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("  100 "), Input::Resolve("100"));
        assert_eq!(parse_line("abc"), Input::Resolve("abc"));
        assert_eq!(parse_line(":stats"), Input::Stats);
        assert_eq!(parse_line(":clean"), Input::Clean);
        assert_eq!(parse_line(":clear"), Input::Clear);
        assert_eq!(parse_line(":q"), Input::Quit);
        assert_eq!(parse_line(":nope"), Input::Unknown(":nope"));
        assert_eq!(parse_line("   "), Input::Blank);
    }

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let clock = Arc::new(ManualClock::new());
        let ttl = CacheTtl::new(Duration::from_secs(3600), Duration::from_secs(5));
        let resolver = Arc::new(Resolver::with_parts(
            CacheStore::with_clock(ttl, clock.clone()),
            Some(Arc::new(MockBackend::new())),
            MissAuditor::from_writer(std::io::sink()),
        ));

        assert!(resolver.resolve("404").await.is_err());
        clock.advance(Duration::from_secs(6));
        assert_eq!(resolver.stats().await.expired, 1);

        let sweeper = spawn_sweeper(resolver.clone(), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(100)).await;
        sweeper.abort();

        assert_eq!(resolver.stats().await.total, 0);
    }
}

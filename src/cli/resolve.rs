//! Resolve command implementation

use futures::future::join_all;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::args::GlobalOptions;
use crate::cli::{ResolverContext, render};
use crate::error::Result;
use crate::models::ResolutionDisplay;

/// Resolve every id given on the command line (and stdin, if requested)
pub async fn run(
    opts: &GlobalOptions,
    mut ids: Vec<String>,
    stdin: bool,
    stats: bool,
) -> Result<()> {
    let ctx = ResolverContext::new(opts)?;

    if stdin {
        ids.extend(read_ids(tokio::io::stdin()).await?);
    }

    let rows = resolve_all(&ctx, &ids).await;
    render::print_resolutions(rows, ctx.format)?;

    if stats {
        println!();
        render::print_stats(&ctx.resolver.stats().await, ctx.format)?;
    }

    Ok(())
}

/// Resolve ids concurrently, keeping input order in the output.
async fn resolve_all(ctx: &ResolverContext, ids: &[String]) -> Vec<ResolutionDisplay> {
    let results = join_all(ids.iter().map(|id| ctx.resolver.resolve(id))).await;

    ids.iter()
        .zip(results.iter())
        .map(|(id, result)| ResolutionDisplay::from_result(id, result))
        .collect()
}

/// One id per line; surrounding whitespace trimmed, blank lines skipped.
async fn read_ids<R: tokio::io::AsyncRead + Unpin>(reader: R) -> Result<Vec<String>> {
    let mut lines = BufReader::new(reader).lines();
    let mut ids = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let id = line.trim();
        if !id.is_empty() {
            ids.push(id.to_string());
        }
    }

    Ok(ids)
}

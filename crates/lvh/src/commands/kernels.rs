//! Kernel image commands

use crate::cli::{CatalogArgs, KernelsCommands};
use crate::output;
use anyhow::Result;
use lvh_kernels::{fetch_catalog, run_query, CatalogConfig, CatalogQuery};
use tracing::debug;

/// Execute kernels command
pub async fn execute(cmd: KernelsCommands) -> Result<()> {
    match cmd {
        KernelsCommands::Catalog(args) => catalog(args).await,
    }
}

/// List kernel versions, or the tags of one version
async fn catalog(args: CatalogArgs) -> Result<()> {
    let config = CatalogConfig::new(&args.repo).with_token(args.token.clone());
    let repository = config.repository_ref()?;
    let client = config.registry_client()?;

    let query = CatalogQuery::from_version(args.version.clone());
    debug!("Running {:?} against {}", query, repository);

    let spinner = output::spinner(&format!("Listing tags from {}", repository));
    let fetched = fetch_catalog(&client, &repository).await;
    spinner.finish_and_clear();
    let catalog = fetched?;

    let lines = run_query(&catalog, &query)?;
    display_lines(&lines, args.json)
}

/// Print one entry per line, or a JSON array
fn display_lines(lines: &[String], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(lines)?);
    } else {
        for line in lines {
            println!("{}", line);
        }
    }
    Ok(())
}

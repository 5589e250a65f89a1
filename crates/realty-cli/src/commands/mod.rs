//! Command implementations

mod features;
mod inspect;
mod prepare;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use realty_core::config::CliConfigOverrides;
use realty_geo::PoiContext;
use std::path::Path;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let overrides = CliConfigOverrides { poi_dir: cli.poi_dir, ..Default::default() };

    match cli.command {
        Commands::Prepare(args) => prepare::execute(args, overrides, &output),
        Commands::Features(args) => features::execute(args, overrides, &output),
        Commands::Inspect(args) => inspect::execute(args, overrides, &output),
    }
}

/// Load every POI source table under `dir` and build the context
fn load_context(dir: &Path) -> Result<PoiContext> {
    let records = realty_store::load_poi_records(dir)
        .with_context(|| format!("Failed to load POI tables from {}", dir.display()))?;
    Ok(PoiContext::from_records(&records))
}

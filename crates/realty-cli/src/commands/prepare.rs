//! Prepare command implementation

use crate::cli::PrepareArgs;
use crate::config::load_current_config;
use crate::output::OutputWriter;
use crate::output_types::PrepareOutput;
use anyhow::{Context, Result};
use realty_core::config::{parse_property_types, CliConfigOverrides};
use realty_features::{enrich_listings, DatasetAssembler};
use realty_store::{read_listings, write_training_table};

use super::load_context;

pub fn execute(args: PrepareArgs, mut overrides: CliConfigOverrides, output: &OutputWriter) -> Result<()> {
    if let Some(types) = &args.types {
        overrides.allowed_types = Some(parse_property_types(types).context("Invalid --types")?);
    }
    let config = load_current_config(overrides)?;

    let mut listings = read_listings(&args.listings)
        .with_context(|| format!("Failed to read listings from {}", args.listings.display()))?;

    let enriched = if args.enrich {
        let context = load_context(&config.poi_dir.value)?;
        let enriched = enrich_listings(&mut listings, &context);
        if enriched == 0 {
            output.warning("No listing carried a usable lat/lon; dist/qtd columns kept as read");
        }
        enriched
    } else {
        0
    };

    let assembler = DatasetAssembler::new(config.allowed_types.value.clone());
    let table = assembler.assemble(&listings).context("Failed to assemble training table")?;

    write_training_table(&table, &args.out)
        .with_context(|| format!("Failed to write training table to {}", args.out.display()))?;

    let allowed_types: Vec<String> =
        assembler.allowed().iter().map(|t| t.label().to_string()).collect();

    if output.is_json() {
        output.result(PrepareOutput {
            listings: listings.len(),
            enriched,
            rows: table.len(),
            allowed_types,
            out: args.out.display().to_string(),
        })?;
    } else {
        output.section("Training Table");
        output.kv("Listings read", listings.len());
        if args.enrich {
            output.kv("Enriched from POIs", enriched);
        }
        output.kv("Property types", allowed_types.join(", "));
        output.kv("Rows kept", table.len());
        output.success(format!("Wrote {}", args.out.display()));
    }

    Ok(())
}

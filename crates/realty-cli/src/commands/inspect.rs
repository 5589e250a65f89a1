//! Inspect command implementation

use crate::cli::InspectArgs;
use crate::config::load_current_config;
use crate::output::OutputWriter;
use crate::output_types::{CategoryRow, ConfigEntry, InspectOutput};
use anyhow::Result;
use realty_core::config::CliConfigOverrides;
use std::collections::BTreeMap;
use tabled::Tabled;

use super::load_context;

pub fn execute(args: InspectArgs, overrides: CliConfigOverrides, output: &OutputWriter) -> Result<()> {
    let config = load_current_config(overrides)?;

    let config_entries: BTreeMap<String, ConfigEntry> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| (key, ConfigEntry { value, source: format!("{:?}", source) }))
        .collect();

    let categories: Vec<CategoryRow> = if args.config {
        Vec::new()
    } else {
        let context = load_context(&config.poi_dir.value)?;
        context
            .summary()
            .into_iter()
            .map(|summary| {
                let constants = summary.category.config();
                CategoryRow {
                    category: summary.category,
                    indexed: summary.indexed,
                    dropped: summary.dropped,
                    radius_m: constants.radius_m,
                    decay_m: constants.decay_m,
                    weight_exp: constants.weight_exp,
                    weight_count: constants.weight_count,
                }
            })
            .collect()
    };

    if output.is_json() {
        return output.result(InspectOutput {
            poi_dir: config.poi_dir.value.display().to_string(),
            categories,
            config: config_entries,
        });
    }

    if !args.config {
        output.section("POI Context");
        output.kv("Directory", config.poi_dir.value.display());
        output.table(categories);
        output.info("score = w_exp * exp(-distance / decay) + w_count * count");
    }

    output.section("Configuration Values");

    #[derive(Tabled)]
    struct ConfigRow {
        #[tabled(rename = "Key")]
        key: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Source")]
        source: String,
    }

    let rows: Vec<ConfigRow> = config_entries
        .into_iter()
        .map(|(key, entry)| ConfigRow { key, value: entry.value, source: entry.source })
        .collect();
    output.table(rows);

    output.section("Configuration Precedence");
    output.info("CLI arguments > Environment variables > Config file > Defaults");

    Ok(())
}

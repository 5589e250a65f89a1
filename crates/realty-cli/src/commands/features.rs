//! Features command implementation

use crate::cli::FeaturesArgs;
use crate::config::load_current_config;
use crate::output::OutputWriter;
use crate::output_types::{FeaturesOutput, ProximityRow};
use anyhow::{bail, Context, Result};
use realty_core::config::CliConfigOverrides;
use realty_core::models::{Coordinate, StructuralAttributes};
use realty_core::ports::Geocoder;
use realty_features::{adapt, score_vector, InferenceInput};
use realty_geocode::NominatimGeocoder;

use super::load_context;

pub fn execute(args: FeaturesArgs, mut overrides: CliConfigOverrides, output: &OutputWriter) -> Result<()> {
    overrides.geocoder_url = args.geocoder_url.clone();
    overrides.city = args.city.clone();
    let config = load_current_config(overrides)?;

    let location = match (args.lat, args.lon, &args.address) {
        (Some(lat), Some(lon), _) => Coordinate::new(lat, lon),
        (_, _, Some(address)) => {
            let geocoder = NominatimGeocoder::new(config.geocoder_url.value.clone())?
                .with_city(config.city.value.clone());
            let location = geocoder.geocode(address)?;
            output.info(format!("Geocoded '{}' to {}", geocoder.query_for(address), location));
            location
        }
        _ => bail!("Provide --lat and --lon, or --address"),
    };

    let context = load_context(&config.poi_dir.value)?;
    let vector = context.proximity(&location).context("Cannot compute proximity features")?;
    let scores = score_vector(&vector);

    let input = InferenceInput::at(
        StructuralAttributes {
            bedrooms: args.quartos,
            bathrooms: args.banheiros,
            garage_spaces: args.vagas,
            area_m2: args.area,
            neighborhood: args.bairro.clone(),
        },
        location,
    );
    let row = adapt(&input, &context)?;

    let proximity: Vec<ProximityRow> = vector
        .iter()
        .map(|(category, feature)| ProximityRow {
            category,
            nearest_distance_m: feature.nearest_distance_m,
            count_within_radius: feature.count_within_radius,
            radius_m: category.config().radius_m,
            score: scores.get(category),
        })
        .collect();

    if output.is_json() {
        output.result(FeaturesOutput {
            location,
            proximity,
            education_score: scores.education,
            features: row.named_values().into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        })?;
    } else {
        output.section("Proximity");
        output.kv("Location", location);
        output.table(proximity);
        output.kv("Education score", format!("{:.4}", scores.education));

        output.section("Feature Row");
        for (column, value) in row.named_values() {
            let text = match serde_json::to_value(&value)? {
                serde_json::Value::Null => "(missing)".to_string(),
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            output.kv(column, text);
        }
    }

    Ok(())
}

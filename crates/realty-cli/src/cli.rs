use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Realty - Proximity features for property price estimation
#[derive(Parser, Debug)]
#[command(name = "realty")]
#[command(about = "Proximity feature engine for property price estimation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the POI source tables (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub poi_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a training table from a listing table
    Prepare(PrepareArgs),

    /// Compute the feature row for one location
    Features(FeaturesArgs),

    /// Show the POI context, scoring constants, and configuration
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct PrepareArgs {
    /// Listing table (CSV)
    pub listings: PathBuf,

    /// Output path for the training table (CSV)
    #[arg(long, short = 'o')]
    pub out: PathBuf,

    /// Recompute dist/qtd columns from the POI tables for listings with lat/lon
    #[arg(long)]
    pub enrich: bool,

    /// Property types to keep, comma-separated (e.g., "casa,apartamento")
    #[arg(long, value_name = "TYPES")]
    pub types: Option<String>,
}

#[derive(Parser, Debug)]
pub struct FeaturesArgs {
    /// Latitude in decimal degrees
    #[arg(long, requires = "lon", conflicts_with = "address", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Street address to geocode (the configured city is appended)
    #[arg(long, required_unless_present = "lat")]
    pub address: Option<String>,

    /// Geocoder base URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub geocoder_url: Option<String>,

    /// City appended to geocoding queries (overrides config)
    #[arg(long)]
    pub city: Option<String>,

    /// Number of bedrooms
    #[arg(long)]
    pub quartos: Option<f64>,

    /// Number of bathrooms
    #[arg(long)]
    pub banheiros: Option<f64>,

    /// Number of garage spaces
    #[arg(long)]
    pub vagas: Option<f64>,

    /// Area in square meters
    #[arg(long)]
    pub area: Option<f64>,

    /// Neighbourhood name
    #[arg(long)]
    pub bairro: Option<String>,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Show only the configuration
    #[arg(long)]
    pub config: bool,
}

use crate::error::{RealtyError, Result};
use crate::models::PropertyType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "realty.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration. Scoring radii and weights are compiled in and never appear here.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Directory holding the POI source tables
    pub poi_dir: ConfigValue<PathBuf>,
    /// Property types kept in the training table
    pub allowed_types: ConfigValue<Vec<PropertyType>>,
    /// Base URL of the geocoding service
    pub geocoder_url: ConfigValue<String>,
    /// City appended to geocoding queries and recorded with predictions
    pub city: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            poi_dir: ConfigValue::new(PathBuf::from("data/pre"), ConfigSource::Default),
            allowed_types: ConfigValue::new(PropertyType::default_allowed(), ConfigSource::Default),
            geocoder_url: ConfigValue::new(
                "https://nominatim.openstreetmap.org".to_string(),
                ConfigSource::Default,
            ),
            city: ConfigValue::new("Ponta Grossa, PR".to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| RealtyError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| RealtyError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(poi_dir) = file_config.poi_dir {
            self.poi_dir.update(poi_dir, ConfigSource::File);
        }

        if let Some(allowed_types) = file_config.allowed_types {
            let parsed = allowed_types
                .iter()
                .map(|s| s.parse::<PropertyType>())
                .collect::<Result<Vec<_>>>()?;
            self.allowed_types.update(parsed, ConfigSource::File);
        }

        if let Some(geocoder_url) = file_config.geocoder_url {
            self.geocoder_url.update(geocoder_url, ConfigSource::File);
        }

        if let Some(city) = file_config.city {
            self.city.update(city, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load from a file only when it exists
    pub fn load_from_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().is_file() {
            self.load_from_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // REALTY_POI_DIR
        if let Ok(dir) = env::var("REALTY_POI_DIR") {
            self.poi_dir.update(PathBuf::from(dir), ConfigSource::Environment);
        }

        // REALTY_ALLOWED_TYPES
        if let Ok(types_str) = env::var("REALTY_ALLOWED_TYPES") {
            match parse_property_types(&types_str) {
                Ok(types) => self.allowed_types.update(types, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid REALTY_ALLOWED_TYPES value '{}': expected a comma-separated list of casa, apartamento, comercial, predio, terreno, outros",
                    types_str
                ),
            }
        }

        // REALTY_GEOCODER_URL
        if let Ok(url) = env::var("REALTY_GEOCODER_URL") {
            self.geocoder_url.update(url, ConfigSource::Environment);
        }

        // REALTY_CITY
        if let Ok(city) = env::var("REALTY_CITY") {
            self.city.update(city, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(poi_dir) = overrides.poi_dir {
            self.poi_dir.update(poi_dir, ConfigSource::Cli);
        }

        if let Some(allowed_types) = overrides.allowed_types {
            self.allowed_types.update(allowed_types, ConfigSource::Cli);
        }

        if let Some(geocoder_url) = overrides.geocoder_url {
            self.geocoder_url.update(geocoder_url, ConfigSource::Cli);
        }

        if let Some(city) = overrides.city {
            self.city.update(city, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "poi_dir".to_string(),
            (self.poi_dir.value.display().to_string(), self.poi_dir.source),
        );

        let types: Vec<&str> = self.allowed_types.value.iter().map(|t| t.label()).collect();
        map.insert("allowed_types".to_string(), (types.join(","), self.allowed_types.source));

        map.insert(
            "geocoder_url".to_string(),
            (self.geocoder_url.value.clone(), self.geocoder_url.source),
        );

        map.insert("city".to_string(), (self.city.value.clone(), self.city.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    poi_dir: Option<PathBuf>,
    allowed_types: Option<Vec<String>>,
    geocoder_url: Option<String>,
    city: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub poi_dir: Option<PathBuf>,
    pub allowed_types: Option<Vec<PropertyType>>,
    pub geocoder_url: Option<String>,
    pub city: Option<String>,
}

/// Parse a comma-separated property-type list
pub fn parse_property_types(s: &str) -> Result<Vec<PropertyType>> {
    let types = s
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse::<PropertyType>)
        .collect::<Result<Vec<_>>>()?;

    if types.is_empty() {
        return Err(RealtyError::ConfigInvalid {
            key: "allowed_types".to_string(),
            reason: "at least one property type is required".to_string(),
        });
    }

    Ok(types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.poi_dir.value, PathBuf::from("data/pre"));
        assert_eq!(config.poi_dir.source, ConfigSource::Default);
        assert_eq!(config.allowed_types.value, PropertyType::default_allowed());
        assert_eq!(config.city.value, "Ponta Grossa, PR");
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
poi_dir = "/srv/poi"
allowed_types = ["casa", "apartamento"]
city = "Curitiba, PR"
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.poi_dir.value, PathBuf::from("/srv/poi"));
        assert_eq!(config.poi_dir.source, ConfigSource::File);
        assert_eq!(config.allowed_types.value, vec![PropertyType::House, PropertyType::Apartment]);
        assert_eq!(config.city.value, "Curitiba, PR");
        assert_eq!(config.geocoder_url.source, ConfigSource::Default);
    }

    #[test]
    fn test_file_with_unknown_type_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"allowed_types = ["castelo"]"#).unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(RealtyError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            allowed_types: Some(vec![PropertyType::Land]),
            ..Default::default()
        });

        assert_eq!(config.allowed_types.value, vec![PropertyType::Land]);
        assert_eq!(config.allowed_types.source, ConfigSource::Cli);
        assert_eq!(config.poi_dir.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_property_types() {
        assert_eq!(
            parse_property_types("casa, comercial").unwrap(),
            vec![PropertyType::House, PropertyType::Commercial]
        );
        assert!(parse_property_types("").is_err());
        assert!(parse_property_types("casa,castelo").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let map = LayeredConfig::with_defaults().to_inspection_map();

        let (types, source) = &map["allowed_types"];
        assert_eq!(types, "casa,apartamento,comercial");
        assert_eq!(*source, ConfigSource::Default);
        assert!(map.contains_key("geocoder_url"));
    }
}

//! POI source tables.
//!
//! One CSV per POI kind under a directory. Schools share a file and are split
//! by the `tipo_escola` column.

use realty_core::error::{RealtyError, Result};
use realty_core::models::{Coordinate, PoiCategory, PoiRecord};
use std::io::Read;
use std::path::Path;

use crate::columns::{csv_error, Columns};

/// How a source file maps onto categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoiSourceFile {
    /// Every row belongs to one category
    Single(PoiCategory),

    /// Rows are split into private and public schools by `tipo_escola`
    Schools,
}

/// Source file names under the POI directory
pub const POI_SOURCE_FILES: [(&str, PoiSourceFile); 6] = [
    ("escolas.csv", PoiSourceFile::Schools),
    ("hospitais.csv", PoiSourceFile::Single(PoiCategory::Hospital)),
    ("mercados.csv", PoiSourceFile::Single(PoiCategory::Market)),
    ("farmacia.csv", PoiSourceFile::Single(PoiCategory::Pharmacy)),
    ("parques.csv", PoiSourceFile::Single(PoiCategory::Park)),
    ("policia.csv", PoiSourceFile::Single(PoiCategory::Police)),
];

/// Load every POI source table under `dir`.
///
/// A missing file leaves its categories empty and is logged; a missing
/// directory is an error.
pub fn load_poi_records(dir: &Path) -> Result<Vec<PoiRecord>> {
    if !dir.is_dir() {
        return Err(RealtyError::SourceNotFound { path: dir.to_path_buf() });
    }

    let mut records = Vec::new();
    for (file_name, source) in POI_SOURCE_FILES {
        let path = dir.join(file_name);
        if !path.exists() {
            tracing::warn!(path = %path.display(), "POI source missing, category will be empty");
            continue;
        }

        let file = std::fs::File::open(&path)?;
        let loaded = read_poi_records_from(file, source)?;
        tracing::info!(path = %path.display(), records = loaded.len(), "Loaded POI source");
        records.extend(loaded);
    }

    Ok(records)
}

/// Read one POI source table.
///
/// Numeric `lat`/`lon` columns are used when present; the geometry text is
/// taken from `geometry_std` if that column exists, else `geometry`.
pub fn read_poi_records_from(reader: impl Read, source: PoiSourceFile) -> Result<Vec<PoiRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = Columns::new(reader.headers().map_err(csv_error)?);

    let geometry_column = if columns.contains("geometry_std") { "geometry_std" } else { "geometry" };
    let has_lat_lon = columns.contains("lat") && columns.contains("lon");

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;

        let category = match source {
            PoiSourceFile::Single(category) => category,
            PoiSourceFile::Schools => match columns.text(&record, "tipo_escola") {
                Some("privada") => PoiCategory::PrivateSchool,
                Some("publica") => PoiCategory::PublicSchool,
                other => {
                    tracing::debug!(tipo_escola = ?other, "Skipping school of unknown type");
                    continue;
                }
            },
        };

        let coordinate = if has_lat_lon {
            lenient_number(&columns, &record, "lat")
                .zip(lenient_number(&columns, &record, "lon"))
                .map(|(lat, lon)| Coordinate::new(lat, lon))
        } else {
            None
        };

        records.push(PoiRecord {
            category,
            geometry: columns.text(&record, geometry_column).map(String::from),
            coordinate,
        });
    }

    Ok(records)
}

/// POI coordinates that fail to parse count as absent; the row is then
/// resolved from geometry or dropped during extraction.
fn lenient_number(columns: &Columns, record: &csv::StringRecord, name: &str) -> Option<f64> {
    columns.text(record, name).and_then(|text| text.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schools_are_split_by_type() {
        let table = "\
nome,tipo_escola,geometry
A,privada,POINT (-50.16 -25.09)
B,publica,POINT (-50.17 -25.10)
C,federal,POINT (-50.18 -25.11)
";
        let records = read_poi_records_from(table.as_bytes(), PoiSourceFile::Schools).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].category, PoiCategory::PrivateSchool);
        assert_eq!(records[1].category, PoiCategory::PublicSchool);
        assert_eq!(records[0].geometry.as_deref(), Some("POINT (-50.16 -25.09)"));
    }

    #[test]
    fn test_geometry_std_is_preferred() {
        let table = "geometry,geometry_std\n\"POINT (1 1)\",\"POINT (2 2)\"\n";
        let records =
            read_poi_records_from(table.as_bytes(), PoiSourceFile::Single(PoiCategory::Park)).unwrap();
        assert_eq!(records[0].geometry.as_deref(), Some("POINT (2 2)"));
    }

    #[test]
    fn test_lat_lon_columns_are_used() {
        let table = "lat,lon,geometry\n-25.1,-50.2,\nbad,-50.2,\"POINT (-50.3 -25.3)\"\n";
        let records =
            read_poi_records_from(table.as_bytes(), PoiSourceFile::Single(PoiCategory::Police)).unwrap();

        assert_eq!(records[0].coordinate, Some(Coordinate::new(-25.1, -50.2)));
        assert_eq!(records[0].geometry, None);
        assert_eq!(records[1].coordinate, None);
        assert!(records[1].geometry.is_some());
    }
}

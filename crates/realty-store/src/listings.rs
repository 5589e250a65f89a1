//! Listing table reader.

use realty_core::error::{RealtyError, Result};
use realty_core::models::{
    Coordinate, ListingRecord, PoiCategory, RawProximity, StructuralAttributes,
};
use std::io::Read;
use std::path::Path;

use crate::columns::{csv_error, line_of, Columns};

/// Read listings from a CSV file.
///
/// Unknown columns are ignored. A malformed numeric cell fails the whole read
/// with `InvalidRecord` naming the line and column.
pub fn read_listings(path: &Path) -> Result<Vec<ListingRecord>> {
    if !path.exists() {
        return Err(RealtyError::SourceNotFound { path: path.to_path_buf() });
    }

    let file = std::fs::File::open(path)?;
    let listings = read_listings_from(file)?;
    tracing::info!(path = %path.display(), listings = listings.len(), "Loaded listing table");
    Ok(listings)
}

/// Read listings from any CSV source
pub fn read_listings_from(reader: impl Read) -> Result<Vec<ListingRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = Columns::new(reader.headers().map_err(csv_error)?);

    let mut listings = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(csv_error)?;
        let row = line_of(&record, index + 2);
        listings.push(parse_listing(&columns, &record, row)?);
    }

    Ok(listings)
}

fn parse_listing(columns: &Columns, record: &csv::StringRecord, row: usize) -> Result<ListingRecord> {
    let structural = StructuralAttributes {
        bedrooms: columns.number(record, "quartos", row)?,
        bathrooms: columns.number(record, "banheiros", row)?,
        garage_spaces: columns.number(record, "vagas_garagem", row)?,
        area_m2: columns.number(record, "area_m2", row)?,
        neighborhood: columns.text(record, "bairro").map(String::from),
    };

    let location = match (columns.number(record, "lat", row)?, columns.number(record, "lon", row)?) {
        (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
        _ => None,
    };

    let mut proximity = RawProximity::default();
    for category in PoiCategory::ALL {
        let config = category.config();
        let entry = proximity.get_mut(category);
        entry.distance_m = columns.number(record, config.distance_column, row)?;
        entry.count = columns.number(record, config.count_column, row)?;
    }

    Ok(ListingRecord {
        price: columns.number(record, "preco", row)?,
        property_type_text: columns.text(record, "tipo_imovel").map(String::from),
        structural,
        location,
        proximity,
    })
}

//! Header lookup and cell parsing shared by the CSV readers.

use realty_core::error::{RealtyError, Result};
use std::collections::HashMap;

/// Column positions by trimmed header name
pub(crate) struct Columns {
    positions: HashMap<String, usize>,
}

impl Columns {
    pub(crate) fn new(headers: &csv::StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        Self { positions }
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Trimmed, non-empty text of a cell; absent columns read as empty
    pub(crate) fn text<'r>(&self, record: &'r csv::StringRecord, name: &str) -> Option<&'r str> {
        let position = *self.positions.get(name)?;
        record.get(position).map(str::trim).filter(|s| !s.is_empty())
    }

    /// Numeric cell. Empty and `nan` cells are missing; anything else must parse.
    pub(crate) fn number(
        &self,
        record: &csv::StringRecord,
        name: &str,
        row: usize,
    ) -> Result<Option<f64>> {
        let Some(text) = self.text(record, name) else {
            return Ok(None);
        };
        if text.eq_ignore_ascii_case("nan") {
            return Ok(None);
        }

        text.parse::<f64>().map(Some).map_err(|_| RealtyError::InvalidRecord {
            row,
            reason: format!("column {}: '{}' is not a number", name, text),
        })
    }
}

/// 1-based line number of a record, header included
pub(crate) fn line_of(record: &csv::StringRecord, fallback: usize) -> usize {
    record.position().map_or(fallback, |p| p.line() as usize)
}

pub(crate) fn csv_error(error: csv::Error) -> RealtyError {
    let row = error.position().map_or(0, |p| p.line() as usize);
    let reason = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(io) => RealtyError::Io(io),
        _ => RealtyError::InvalidRecord { row, reason },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Columns, csv::StringRecord) {
        let headers = csv::StringRecord::from(vec![" preco ", "quartos", "bairro", "area_m2"]);
        let record = csv::StringRecord::from(vec!["350000", "", "  Centro ", "NaN"]);
        (Columns::new(&headers), record)
    }

    #[test]
    fn test_text_cells() {
        let (columns, record) = fixture();
        assert_eq!(columns.text(&record, "bairro"), Some("Centro"));
        assert_eq!(columns.text(&record, "quartos"), None);
        assert_eq!(columns.text(&record, "missing"), None);
    }

    #[test]
    fn test_number_cells() {
        let (columns, record) = fixture();
        assert_eq!(columns.number(&record, "preco", 2).unwrap(), Some(350000.0));
        assert_eq!(columns.number(&record, "quartos", 2).unwrap(), None);
        assert_eq!(columns.number(&record, "area_m2", 2).unwrap(), None);
    }

    #[test]
    fn test_malformed_number_names_row_and_column() {
        let (columns, record) = fixture();
        let err = columns.number(&record, "bairro", 7).unwrap_err();
        match err {
            RealtyError::InvalidRecord { row, reason } => {
                assert_eq!(row, 7);
                assert!(reason.contains("bairro"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}

//! Median imputation over the numeric columns of a training table.

use realty_core::error::{RealtyError, Result};
use realty_core::models::{PoiCategory, TrainingRow, TrainingTable, TARGET_COLUMN};

/// A numeric column of the training table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericColumn {
    Bedrooms,
    Bathrooms,
    GarageSpaces,
    Area,
    Score(PoiCategory),
    Education,
    Distance(PoiCategory),
    Count(PoiCategory),
    Price,
    LogPrice,
}

impl NumericColumn {
    /// Every numeric column, in table order
    pub fn all() -> Vec<NumericColumn> {
        let mut columns = vec![
            NumericColumn::Bedrooms,
            NumericColumn::Bathrooms,
            NumericColumn::GarageSpaces,
            NumericColumn::Area,
        ];
        columns.extend(PoiCategory::ALL.map(NumericColumn::Score));
        columns.push(NumericColumn::Education);
        for category in PoiCategory::ALL {
            columns.push(NumericColumn::Distance(category));
            columns.push(NumericColumn::Count(category));
        }
        columns.push(NumericColumn::Price);
        columns.push(NumericColumn::LogPrice);
        columns
    }

    pub fn name(self) -> &'static str {
        match self {
            NumericColumn::Bedrooms => "quartos",
            NumericColumn::Bathrooms => "banheiros",
            NumericColumn::GarageSpaces => "vagas_garagem",
            NumericColumn::Area => "area_m2",
            NumericColumn::Score(c) => c.config().score_column,
            NumericColumn::Education => "score_educacao",
            NumericColumn::Distance(c) => c.config().distance_column,
            NumericColumn::Count(c) => c.config().count_column,
            NumericColumn::Price => "preco",
            NumericColumn::LogPrice => TARGET_COLUMN,
        }
    }

    /// Distance columns may be missing throughout: an empty POI category has
    /// no nearest distance, which is a value rather than a gap.
    fn may_stay_missing(self) -> bool {
        matches!(self, NumericColumn::Distance(_))
    }

    fn slot(self, row: &mut TrainingRow) -> &mut Option<f64> {
        match self {
            NumericColumn::Bedrooms => &mut row.features.bedrooms,
            NumericColumn::Bathrooms => &mut row.features.bathrooms,
            NumericColumn::GarageSpaces => &mut row.features.garage_spaces,
            NumericColumn::Area => &mut row.features.area_m2,
            NumericColumn::Score(c) => &mut row.features.scores[c.index()],
            NumericColumn::Education => &mut row.education_score,
            NumericColumn::Distance(c) => &mut row.proximity.get_mut(c).distance_m,
            NumericColumn::Count(c) => &mut row.proximity.get_mut(c).count,
            NumericColumn::Price => &mut row.price,
            NumericColumn::LogPrice => &mut row.log_price,
        }
    }

    fn value(self, row: &TrainingRow) -> Option<f64> {
        match self {
            NumericColumn::Bedrooms => row.features.bedrooms,
            NumericColumn::Bathrooms => row.features.bathrooms,
            NumericColumn::GarageSpaces => row.features.garage_spaces,
            NumericColumn::Area => row.features.area_m2,
            NumericColumn::Score(c) => row.features.scores[c.index()],
            NumericColumn::Education => row.education_score,
            NumericColumn::Distance(c) => row.proximity.get(c).distance_m,
            NumericColumn::Count(c) => row.proximity.get(c).count,
            NumericColumn::Price => row.price,
            NumericColumn::LogPrice => row.log_price,
        }
    }
}

/// Median of the values; even counts average the two middle values
pub fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable_by(f64::total_cmp);

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Replace every missing numeric cell with its column's median.
///
/// Medians come from the rows of this table only. A column with gaps but no
/// observed value cannot be imputed and fails the whole table, except for
/// distance columns, which stay missing.
pub fn impute_medians(table: &mut TrainingTable) -> Result<()> {
    for column in NumericColumn::all() {
        let observed: Vec<f64> = table.rows.iter().filter_map(|row| column.value(row)).collect();
        if observed.len() == table.rows.len() {
            continue;
        }

        let fill = match median(observed) {
            Some(fill) => fill,
            None if column.may_stay_missing() => continue,
            None => {
                return Err(RealtyError::EmptyColumnMedian { column: column.name().to_string() })
            }
        };

        let mut filled = 0usize;
        for row in &mut table.rows {
            let slot = column.slot(row);
            if slot.is_none() {
                *slot = Some(fill);
                filled += 1;
            }
        }
        tracing::debug!(column = column.name(), filled, median = fill, "Imputed missing values");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use realty_core::models::{FeatureRow, PropertyType, RawProximity};

    fn row(bedrooms: Option<f64>, price: Option<f64>) -> TrainingRow {
        TrainingRow {
            features: FeatureRow { bedrooms, ..Default::default() },
            property_type: PropertyType::House,
            education_score: Some(0.0),
            proximity: RawProximity::default(),
            price,
            log_price: price.map(|p| p.max(1.0).ln()),
        }
    }

    /// Fill every column except the ones under test
    fn complete(mut row: TrainingRow) -> TrainingRow {
        for column in NumericColumn::all() {
            if !matches!(column, NumericColumn::Bedrooms | NumericColumn::Price | NumericColumn::LogPrice) {
                column.slot(&mut row).get_or_insert(1.0);
            }
        }
        row
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(vec![]), None);
    }

    #[test]
    fn test_column_names_follow_header() {
        let header = TrainingTable::header();
        for column in NumericColumn::all() {
            assert!(header.iter().any(|h| h == column.name()), "{}", column.name());
        }
    }

    #[test]
    fn test_missing_cells_get_post_filter_median() {
        let mut table = TrainingTable {
            rows: vec![
                complete(row(Some(2.0), Some(100.0))),
                complete(row(None, Some(300.0))),
                complete(row(Some(4.0), None)),
            ],
        };

        impute_medians(&mut table).unwrap();

        assert_eq!(table.rows[1].features.bedrooms, Some(3.0));
        assert_eq!(table.rows[2].price, Some(200.0));
        assert_eq!(table.rows[2].log_price, Some((100f64.ln() + 300f64.ln()) / 2.0));
    }

    #[test]
    fn test_all_missing_column_fails() {
        let mut table = TrainingTable { rows: vec![complete(row(None, Some(1.0)))] };
        let err = impute_medians(&mut table).unwrap_err();
        assert!(matches!(err, RealtyError::EmptyColumnMedian { ref column } if column == "quartos"));
    }

    #[test]
    fn test_all_missing_distance_stays_missing() {
        let mut first = complete(row(Some(2.0), Some(1.0)));
        let mut second = complete(row(Some(3.0), Some(2.0)));
        first.proximity.get_mut(PoiCategory::Park).distance_m = None;
        second.proximity.get_mut(PoiCategory::Park).distance_m = None;
        let mut table = TrainingTable { rows: vec![first, second] };

        impute_medians(&mut table).unwrap();

        assert_eq!(table.rows[0].proximity.get(PoiCategory::Park).distance_m, None);
    }

    #[test]
    fn test_empty_table_is_untouched() {
        let mut table = TrainingTable::default();
        assert!(impute_medians(&mut table).is_ok());
    }
}

use serde::{Deserialize, Serialize};

use super::features::{FeatureRow, FeatureValue};
use super::listing::{PropertyType, RawProximity};
use super::poi::PoiCategory;

/// Name of the regression target column
pub const TARGET_COLUMN: &str = "log_preco";

/// One frozen row of the training table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    /// Model inputs
    pub features: FeatureRow,

    /// Classified property type
    pub property_type: PropertyType,

    /// Education composite score
    pub education_score: Option<f64>,

    /// Raw distance/count columns the scores were derived from
    pub proximity: RawProximity,

    /// Raw sale price
    pub price: Option<f64>,

    /// `ln(max(price, 1))`
    pub log_price: Option<f64>,
}

impl TrainingRow {
    /// Values in [`TrainingTable::header`] order; missing cells are empty strings
    pub fn to_record(&self) -> Vec<String> {
        let mut record: Vec<String> = self
            .features
            .values()
            .into_iter()
            .map(|value| match value {
                FeatureValue::Number(n) => format_number(n),
                FeatureValue::Category(c) => c.unwrap_or_default(),
            })
            .collect();

        record.push(self.property_type.label().to_string());
        record.push(format_number(self.education_score));
        for entry in &self.proximity.entries {
            record.push(format_number(entry.distance_m));
            record.push(format_number(entry.count));
        }
        record.push(format_number(self.price));
        record.push(format_number(self.log_price));
        record
    }
}

/// Training feature/target table after filtering and imputation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingTable {
    pub rows: Vec<TrainingRow>,
}

impl TrainingTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Output columns: model features, derived columns, raw proximity, price, target
    pub fn header() -> Vec<String> {
        let mut header: Vec<String> = FeatureRow::columns().iter().map(|c| c.to_string()).collect();
        header.push("tipo_imovel_cat".to_string());
        header.push("score_educacao".to_string());
        for category in PoiCategory::ALL {
            let config = category.config();
            header.push(config.distance_column.to_string());
            header.push(config.count_column.to_string());
        }
        header.push("preco".to_string());
        header.push(TARGET_COLUMN.to_string());
        header
    }
}

fn format_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_width_matches_header() {
        let row = TrainingRow {
            features: FeatureRow::default(),
            property_type: PropertyType::House,
            education_score: Some(0.5),
            proximity: RawProximity::default(),
            price: Some(250000.0),
            log_price: Some(250000f64.ln()),
        };
        assert_eq!(row.to_record().len(), TrainingTable::header().len());
        assert_eq!(TrainingTable::header().last().map(String::as_str), Some(TARGET_COLUMN));
    }
}

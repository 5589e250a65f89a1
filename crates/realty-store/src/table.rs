use realty_core::error::Result;
use realty_core::models::TrainingTable;
use std::io::Write;
use std::path::Path;

use crate::columns::csv_error;

/// Write the training table as CSV, creating parent directories as needed
pub fn write_training_table(table: &TrainingTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    write_training_table_to(table, file)?;

    tracing::info!(path = %path.display(), rows = table.len(), "Wrote training table");
    Ok(())
}

/// Write the training table as CSV to any sink
pub fn write_training_table_to(table: &TrainingTable, writer: impl Write) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(TrainingTable::header()).map_err(csv_error)?;
    for row in &table.rows {
        writer.write_record(row.to_record()).map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

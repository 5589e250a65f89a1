//! Prediction sink implementations.

use realty_core::error::{RealtyError, Result};
use realty_core::models::PredictionRecord;
use realty_core::ports::PredictionSink;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// In-memory sink, mostly for tests and one-shot CLI runs
#[derive(Debug, Clone, Default)]
pub struct MemoryPredictionSink {
    records: Arc<RwLock<Vec<PredictionRecord>>>,
}

impl MemoryPredictionSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored prediction, in arrival order
    pub fn records(&self) -> Vec<PredictionRecord> {
        self.records.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PredictionSink for MemoryPredictionSink {
    fn record(&self, prediction: &PredictionRecord) -> Result<()> {
        self.records.write().unwrap_or_else(PoisonError::into_inner).push(prediction.clone());
        Ok(())
    }
}

/// Appends one JSON object per prediction to a file
#[derive(Debug)]
pub struct JsonLinesPredictionSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonLinesPredictionSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PredictionSink for JsonLinesPredictionSink {
    fn record(&self, prediction: &PredictionRecord) -> Result<()> {
        let mut line = serde_json::to_string(prediction)
            .map_err(|e| RealtyError::Serialization(e.to_string()))?;
        line.push('\n');

        // Serialize appends so concurrent lines never interleave
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;

        tracing::debug!(id = %prediction.id, path = %self.path.display(), "Appended prediction");
        Ok(())
    }
}

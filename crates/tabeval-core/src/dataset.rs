//! Fixture loading. The only fallible surface in the crate: everything past
//! a successful load is a total function.

use std::collections::BTreeSet;
use std::path::Path;

use crate::model::{BenchmarkData, Final25Data};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse benchmark fixture: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid dataset: {0}")]
    Invalid(String),
}

impl BenchmarkData {
    pub fn from_json_str(raw: &str) -> Result<Self, DatasetError> {
        let data: BenchmarkData = serde_json::from_str(raw)?;
        data.validate()?;
        tracing::debug!(models = data.models.len(), "loaded benchmark fixture");
        Ok(data)
    }

    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    fn validate(&self) -> Result<(), DatasetError> {
        let mut seen = BTreeSet::new();
        for m in &self.models {
            if !seen.insert(m.model.as_str()) {
                return Err(DatasetError::Invalid(format!(
                    "duplicate model id: {}",
                    m.model
                )));
            }
            for (key, value) in &m.metrics {
                if !(0.0..=1.0).contains(value) {
                    return Err(DatasetError::Invalid(format!(
                        "{}: metric {} = {} out of [0,1]",
                        m.model, key, value
                    )));
                }
            }
            for ex in &m.examples {
                if !(0.0..=1.0).contains(&ex.score_correctness)
                    || !(0.0..=1.0).contains(&ex.score_efficiency)
                {
                    return Err(DatasetError::Invalid(format!(
                        "{}: example {} has a score out of [0,1]",
                        m.model, ex.example_id
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Final25Data {
    pub fn from_json_str(raw: &str) -> Result<Self, DatasetError> {
        let data: Final25Data = serde_json::from_str(raw)?;
        let mut seen = BTreeSet::new();
        for m in &data.models {
            if !seen.insert(m.model.as_str()) {
                return Err(DatasetError::Invalid(format!(
                    "duplicate model id: {}",
                    m.model
                )));
            }
        }
        tracing::debug!(
            models = data.models.len(),
            tasks = data.tasks.len(),
            "loaded final-25 fixture"
        );
        Ok(data)
    }

    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

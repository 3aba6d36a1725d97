// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! JSON persistence for the result store.
//!
//! Every flush rewrites two files in the output directory:
//! `results.json` (name to samples) and `results-descriptions.json`
//! (name to description). Nothing is merged with what is already on disk.

use crate::metrics::ResultStore;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File holding benchmark name to sample array.
pub const RESULTS_FILE: &str = "results.json";
/// File holding benchmark name to description.
pub const DESCRIPTIONS_FILE: &str = "results-descriptions.json";

/// Errors that can occur while persisting results.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize results: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// JSON reporter for the result store.
#[derive(Debug, Clone)]
pub struct JsonReporter {
    /// Directory both artifacts are written to
    output_dir: PathBuf,
}

impl JsonReporter {
    /// Create a new JSON reporter with the specified output directory.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, ReporterError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir).map_err(|source| ReporterError::Io {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    /// Path of the samples artifact.
    pub fn results_path(&self) -> PathBuf {
        self.output_dir.join(RESULTS_FILE)
    }

    /// Path of the descriptions artifact.
    pub fn descriptions_path(&self) -> PathBuf {
        self.output_dir.join(DESCRIPTIONS_FILE)
    }

    /// Overwrite both artifacts with the current contents of `store`.
    pub async fn save(&self, store: &ResultStore) -> Result<(), ReporterError> {
        let results = serde_json::to_vec(store.all_samples())?;
        let descriptions = serde_json::to_vec(store.all_descriptions())?;

        write(&self.results_path(), &results).await?;
        write(&self.descriptions_path(), &descriptions).await?;

        tracing::debug!(
            benchmarks = store.all_samples().len(),
            dir = %self.output_dir.display(),
            "Flushed benchmark results"
        );
        Ok(())
    }

    /// Load a previously flushed store from `dir`.
    pub async fn load(dir: impl AsRef<Path>) -> Result<ResultStore, ReporterError> {
        let dir = dir.as_ref();
        let samples: BTreeMap<String, Vec<u64>> =
            serde_json::from_slice(&read(&dir.join(RESULTS_FILE)).await?)?;
        let descriptions: BTreeMap<String, String> =
            serde_json::from_slice(&read(&dir.join(DESCRIPTIONS_FILE)).await?)?;
        Ok(ResultStore::from_parts(samples, descriptions))
    }
}

async fn write(path: &Path, contents: &[u8]) -> Result<(), ReporterError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| ReporterError::Io {
            path: path.to_path_buf(),
            source,
        })
}

async fn read(path: &Path) -> Result<Vec<u8>, ReporterError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| ReporterError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_store() -> ResultStore {
        let mut store = ResultStore::new();
        for ms in [48, 52, 50] {
            store.record_sample("get-entity-types", ms);
        }
        store.set_description("get-entity-types", "31 entities");
        store
    }

    #[tokio::test]
    async fn test_reporter_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let reporter = JsonReporter::new(temp_dir.path()).unwrap();
        let store = sample_store();

        reporter.save(&store).await.unwrap();
        assert!(reporter.results_path().exists());
        assert!(reporter.descriptions_path().exists());

        let loaded = JsonReporter::load(temp_dir.path()).await.unwrap();
        assert_eq!(loaded, store);
    }

    #[tokio::test]
    async fn test_artifact_format() {
        let temp_dir = TempDir::new().unwrap();
        let reporter = JsonReporter::new(temp_dir.path()).unwrap();
        reporter.save(&sample_store()).await.unwrap();

        let results = fs::read_to_string(reporter.results_path()).unwrap();
        let descriptions = fs::read_to_string(reporter.descriptions_path()).unwrap();
        assert_eq!(results, r#"{"get-entity-types":[48,52,50]}"#);
        assert_eq!(descriptions, r#"{"get-entity-types":"31 entities"}"#);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let reporter = JsonReporter::new(temp_dir.path()).unwrap();
        reporter.save(&sample_store()).await.unwrap();

        let mut other = ResultStore::new();
        other.record_sample("other", 7);
        reporter.save(&other).await.unwrap();

        let loaded = JsonReporter::load(temp_dir.path()).await.unwrap();
        assert_eq!(loaded, other);
        assert_eq!(loaded.sample_count("get-entity-types"), 0);
    }

    #[test]
    fn test_creates_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("runs").join("today");
        let reporter = JsonReporter::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(reporter.results_path(), nested.join(RESULTS_FILE));
    }
}

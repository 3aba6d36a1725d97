// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Adaptive sampling harness.
//!
//! [`BenchmarkHarness::measure`] samples a [`RunSpec`] until at least
//! [`MIN_SAMPLES`] samples exist for the benchmark *and* the time budget has
//! elapsed since the call started (setup included), then flushes the whole
//! result store to disk.
//!
//! Samples are taken strictly one after another. A failing setup, body or
//! describe step aborts the call immediately; samples gathered so far stay
//! in memory but are not flushed by that call.

use std::io;
use std::time::Duration;

use okapi_bench_core::OkapiError;
use thiserror::Error;
use tokio::time::Instant;

use crate::metrics::{BenchmarkSummary, ResultStore};
use crate::progress::{Progress, TerminalProgress};
use crate::reporter::{JsonReporter, ReporterError};
use crate::run::RunSpec;

/// Minimum number of samples per benchmark, whatever the time budget.
pub const MIN_SAMPLES: usize = 3;

/// Errors that abort a benchmark.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Okapi session failed: {0}")]
    Session(#[from] OkapiError),

    #[error("Setup for benchmark '{name}' failed: {source}")]
    Setup {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Benchmark '{name}' failed on sample {sample}: {source}")]
    Invocation {
        name: String,
        sample: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("Describing the result of benchmark '{name}' failed: {source}")]
    Describe {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to persist results: {0}")]
    Persist(#[from] ReporterError),

    #[error("Failed to write progress: {0}")]
    Terminal(#[from] io::Error),
}

/// Owns the result store and drives benchmarks one at a time.
pub struct BenchmarkHarness<P = TerminalProgress<io::Stdout>> {
    store: ResultStore,
    reporter: JsonReporter,
    progress: P,
}

impl BenchmarkHarness {
    /// Create a harness that reports progress on stdout.
    pub fn new(reporter: JsonReporter) -> Self {
        Self::with_progress(reporter, TerminalProgress::stdout())
    }
}

impl<P: Progress> BenchmarkHarness<P> {
    /// Create a harness with a custom progress sink.
    pub fn with_progress(reporter: JsonReporter, progress: P) -> Self {
        Self {
            store: ResultStore::new(),
            reporter,
            progress,
        }
    }

    /// Results accumulated so far in this process.
    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Where results are flushed.
    pub fn reporter(&self) -> &JsonReporter {
        &self.reporter
    }

    /// The progress sink.
    pub fn progress(&self) -> &P {
        &self.progress
    }

    /// Sample `run` under `name` for at least `max_time` and [`MIN_SAMPLES`]
    /// samples, then flush the store.
    ///
    /// Re-running a name appends to its existing samples; its description is
    /// only ever computed once.
    pub async fn measure<T, R>(
        &mut self,
        name: &str,
        run: RunSpec<T, R>,
        max_time: Duration,
    ) -> Result<BenchmarkSummary, BenchError>
    where
        T: Send + Sync + 'static,
        R: Send + 'static,
    {
        self.store.ensure(name);
        let overall_start = Instant::now();
        self.progress.start(name)?;

        tracing::debug!(benchmark = name, stateful = run.is_stateful(), "Preparing run");
        let mut prepared = run.prepare().await.map_err(|source| BenchError::Setup {
            name: name.to_string(),
            source,
        })?;

        while self.store.sample_count(name) < MIN_SAMPLES || overall_start.elapsed() < max_time {
            let start = Instant::now();
            let result = prepared
                .invoke()
                .await
                .map_err(|source| BenchError::Invocation {
                    name: name.to_string(),
                    sample: self.store.sample_count(name) + 1,
                    source,
                })?;
            let elapsed_ms = millis(start.elapsed());

            self.store.record_sample(name, elapsed_ms);
            if self.store.description(name).is_none() {
                let description =
                    prepared
                        .describe(result)
                        .await
                        .map_err(|source| BenchError::Describe {
                            name: name.to_string(),
                            source,
                        })?;
                self.store.set_description(name, description);
            }

            self.progress.sample(
                name,
                self.store.description(name),
                self.store.sample_count(name),
                elapsed_ms,
            )?;
        }

        let summary = self.store.summary(name);
        self.progress.finish(&summary)?;

        self.reporter.save(&self.store).await?;
        tracing::info!(
            benchmark = name,
            samples = summary.samples,
            mean_ms = summary.mean_ms,
            "Benchmark complete"
        );

        Ok(summary)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::QuietProgress;
    use tempfile::TempDir;

    fn quiet_harness(dir: &TempDir) -> BenchmarkHarness<QuietProgress> {
        BenchmarkHarness::with_progress(JsonReporter::new(dir.path()).unwrap(), QuietProgress)
    }

    #[test]
    fn test_millis_truncates() {
        assert_eq!(millis(Duration::from_micros(49_999)), 49);
        assert_eq!(millis(Duration::from_millis(50)), 50);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_budget_takes_minimum_samples() {
        let dir = TempDir::new().unwrap();
        let mut harness = quiet_harness(&dir);

        let summary = harness
            .measure(
                "instant",
                RunSpec::stateless(|| async { Ok(()) }, |_: ()| async { Ok("noop".to_string()) }),
                Duration::ZERO,
            )
            .await
            .unwrap();

        assert_eq!(summary.samples, MIN_SAMPLES);
        assert_eq!(harness.store().samples("instant"), &[0, 0, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_describe_failure_aborts_without_flush() {
        let dir = TempDir::new().unwrap();
        let mut harness = quiet_harness(&dir);

        let err = harness
            .measure(
                "undescribable",
                RunSpec::stateless(
                    || async { Ok(()) },
                    |_: ()| async { Err(anyhow::anyhow!("bad body")) },
                ),
                Duration::ZERO,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, BenchError::Describe { .. }));
        assert_eq!(harness.store().sample_count("undescribable"), 1);
        assert!(!harness.reporter().results_path().exists());
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! In-memory result store and per-benchmark summaries.
//!
//! The store maps each benchmark name to its raw latency samples (milliseconds,
//! in completion order) and to a description computed from the first result.
//! Samples only ever grow; a description, once set, never changes. Derived
//! numbers such as the mean are recomputed from the samples on every read.
//!
//! The store has a single writer: the harness that owns it. It is handed out
//! by shared reference only.

use std::collections::BTreeMap;
use std::fmt;

/// Benchmark name to samples, plus benchmark name to description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultStore {
    samples: BTreeMap<String, Vec<u64>>,
    descriptions: BTreeMap<String, String>,
}

impl ResultStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from previously persisted maps.
    pub fn from_parts(
        samples: BTreeMap<String, Vec<u64>>,
        descriptions: BTreeMap<String, String>,
    ) -> Self {
        Self {
            samples,
            descriptions,
        }
    }

    /// Make sure `name` has a sample sequence. An existing one is kept as is.
    pub fn ensure(&mut self, name: &str) {
        if !self.samples.contains_key(name) {
            self.samples.insert(name.to_string(), Vec::new());
        }
    }

    /// Append one sample to `name`, creating the entry if needed.
    pub fn record_sample(&mut self, name: &str, duration_ms: u64) {
        self.ensure(name);
        if let Some(samples) = self.samples.get_mut(name) {
            samples.push(duration_ms);
        }
    }

    /// Store the description for `name` unless one already exists.
    ///
    /// Returns `true` if the description was stored.
    pub fn set_description(&mut self, name: &str, description: impl Into<String>) -> bool {
        if self.descriptions.contains_key(name) {
            return false;
        }
        self.descriptions
            .insert(name.to_string(), description.into());
        true
    }

    /// Samples recorded for `name`, oldest first.
    pub fn samples(&self, name: &str) -> &[u64] {
        self.samples.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of samples recorded for `name`.
    pub fn sample_count(&self, name: &str) -> usize {
        self.samples(name).len()
    }

    /// Description for `name`, if computed.
    pub fn description(&self, name: &str) -> Option<&str> {
        self.descriptions.get(name).map(String::as_str)
    }

    /// Arithmetic mean of the samples for `name`, or `None` without samples.
    pub fn mean_ms(&self, name: &str) -> Option<f64> {
        mean(self.samples(name))
    }

    /// Benchmark names that have a sample sequence.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.samples.keys().map(String::as_str)
    }

    /// All sample sequences, keyed by benchmark name.
    pub fn all_samples(&self) -> &BTreeMap<String, Vec<u64>> {
        &self.samples
    }

    /// All descriptions, keyed by benchmark name.
    pub fn all_descriptions(&self) -> &BTreeMap<String, String> {
        &self.descriptions
    }

    /// Summary of `name` computed from its current samples.
    pub fn summary(&self, name: &str) -> BenchmarkSummary {
        BenchmarkSummary {
            name: name.to_string(),
            mean_ms: self.mean_ms(name).unwrap_or(0.0),
            samples: self.sample_count(name),
        }
    }
}

fn mean(samples: &[u64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let sum: u64 = samples.iter().sum();
    Some(sum as f64 / samples.len() as f64)
}

/// Outcome of one benchmark run, as printed on the summary line.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSummary {
    /// Name of the benchmark
    pub name: String,
    /// Mean latency over every stored sample, in milliseconds
    pub mean_ms: f64,
    /// Total number of stored samples
    pub samples: usize,
}

impl fmt::Display for BenchmarkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: approx {:.2}ms ({} samples)",
            self.name, self.mean_ms, self.samples
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_keeps_existing_samples() {
        let mut store = ResultStore::new();
        store.record_sample("get-entity-types", 12);
        store.ensure("get-entity-types");
        assert_eq!(store.samples("get-entity-types"), &[12]);

        store.ensure("other");
        assert_eq!(store.sample_count("other"), 0);
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["get-entity-types", "other"]);
    }

    #[test]
    fn test_samples_keep_insertion_order() {
        let mut store = ResultStore::new();
        for ms in [30, 10, 20] {
            store.record_sample("a", ms);
        }
        assert_eq!(store.samples("a"), &[30, 10, 20]);
    }

    #[test]
    fn test_description_is_write_once() {
        let mut store = ResultStore::new();
        assert!(store.set_description("a", "12 entities"));
        assert!(!store.set_description("a", "13 entities"));
        assert_eq!(store.description("a"), Some("12 entities"));
        assert_eq!(store.description("b"), None);
    }

    #[test]
    fn test_mean() {
        let mut store = ResultStore::new();
        assert_eq!(store.mean_ms("a"), None);
        for ms in [10, 20, 40] {
            store.record_sample("a", ms);
        }
        let mean = store.mean_ms("a").unwrap();
        assert!((mean - 23.333).abs() < 0.01);
    }

    #[test]
    fn test_summary_line() {
        let mut store = ResultStore::new();
        for ms in [49, 50, 51, 50] {
            store.record_sample("get-entity-types", ms);
        }
        let summary = store.summary("get-entity-types");
        assert_eq!(summary.samples, 4);
        assert_eq!(
            summary.to_string(),
            "get-entity-types: approx 50.00ms (4 samples)"
        );
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Okapi Benchmarking Framework
//!
//! Times asynchronous operations against an Okapi gateway with an adaptive
//! stopping rule: each benchmark samples until it has at least three samples
//! and its time budget has elapsed.
//!
//! # Data Output
//!
//! After every benchmark the full in-memory store is written to
//! `results.json` (name to millisecond samples) and
//! `results-descriptions.json` (name to description).

pub mod catalog;
pub mod harness;
pub mod metrics;
pub mod progress;
pub mod reporter;
pub mod run;

pub use catalog::{connect, Benchmark};
pub use harness::{BenchError, BenchmarkHarness, MIN_SAMPLES};
pub use metrics::{BenchmarkSummary, ResultStore};
pub use progress::{Progress, QuietProgress, TerminalProgress};
pub use reporter::JsonReporter;
pub use run::RunSpec;

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Okapi Bench Core Library
//!
//! Plumbing shared by the benchmark harness: environment configuration,
//! the login exchange, and a tenant-scoped HTTP client.

pub mod client;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use client::{OkapiClient, TENANT_HEADER, TOKEN_HEADER};
pub use config::OkapiConfig;
pub use error::{OkapiError, OkapiResult};

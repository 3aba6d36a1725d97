// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Error types for the Okapi session and client layer.
//!
//! Every variant is fatal to a benchmark run: nothing here is retried.

use thiserror::Error;

/// Top-level error type for configuration, login and tenant-scoped requests.
#[derive(Debug, Error)]
pub enum OkapiError {
    // =========================================================================
    // Configuration Errors - Fail-Fast before any network call
    // =========================================================================
    #[error("Configuration parse error: {field} = {value} - {reason}")]
    ConfigParse {
        field: &'static str,
        value: String,
        reason: String,
    },

    // =========================================================================
    // Credential Errors - no benchmark may run without a token
    // =========================================================================
    #[error("Login request to {url} failed: {source}")]
    Login {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Login response from {url} carried no x-okapi-token header")]
    MissingToken { url: String },

    #[error("Invalid header value for {header}: {reason}")]
    InvalidHeader {
        header: &'static str,
        reason: String,
    },

    // =========================================================================
    // Transport Errors
    // =========================================================================
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Result type alias using OkapiError.
pub type OkapiResult<T> = Result<T, OkapiError>;

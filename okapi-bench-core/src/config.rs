// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Environment-driven Okapi configuration.
//!
//! Values come from `USER`, `PASSWORD`, `TENANT` and `OKAPI_URL`, each with a
//! default suited to a local FOLIO development stack. The URL is validated
//! up front so a typo fails before any login attempt.

use serde::Serialize;

use crate::error::{OkapiError, OkapiResult};

/// Default login name.
pub const DEFAULT_USERNAME: &str = "folio";
/// Default login password.
pub const DEFAULT_PASSWORD: &str = "folio";
/// Default tenant identifier.
pub const DEFAULT_TENANT: &str = "fs09000000";
/// Default Okapi gateway.
pub const DEFAULT_OKAPI_URL: &str = "http://localhost:9130";

/// Validated connection settings for one Okapi tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OkapiConfig {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub tenant: String,
    pub okapi_url: String,
}

impl OkapiConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> OkapiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Missing keys fall back to the defaults; the URL is trimmed of trailing
    /// slashes and must use the http or https scheme.
    pub fn from_lookup<F>(lookup: F) -> OkapiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = lookup("USER").unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let password = lookup("PASSWORD").unwrap_or_else(|| DEFAULT_PASSWORD.to_string());
        let tenant = lookup("TENANT").unwrap_or_else(|| DEFAULT_TENANT.to_string());
        let okapi_url = lookup("OKAPI_URL").unwrap_or_else(|| DEFAULT_OKAPI_URL.to_string());

        if tenant.is_empty() {
            return Err(OkapiError::ConfigParse {
                field: "TENANT",
                value: tenant,
                reason: "tenant cannot be empty".to_string(),
            });
        }

        Ok(Self {
            username,
            password,
            tenant,
            okapi_url: Self::validate_url(okapi_url)?,
        })
    }

    fn validate_url(url: String) -> OkapiResult<String> {
        let trimmed = url.trim_end_matches('/');
        let has_host = ["http://", "https://"]
            .iter()
            .any(|scheme| trimmed.len() > scheme.len() && trimmed.starts_with(scheme));

        if !has_host {
            return Err(OkapiError::ConfigParse {
                field: "OKAPI_URL",
                value: url,
                reason: "must be an absolute http(s) URL".to_string(),
            });
        }

        Ok(trimmed.to_string())
    }

    /// Absolute URL of the login endpoint.
    pub fn login_url(&self) -> String {
        format!("{}/authn/login", self.okapi_url)
    }
}

impl Default for OkapiConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            tenant: DEFAULT_TENANT.to_string(),
            okapi_url: DEFAULT_OKAPI_URL.to_string(),
        }
    }
}

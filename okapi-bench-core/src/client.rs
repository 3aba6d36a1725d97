// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Session bootstrap and the tenant-scoped HTTP client.
//!
//! [`OkapiClient::login`] performs a single `/authn/login` exchange and returns
//! a client whose every request carries `x-okapi-tenant` and `x-okapi-token`.
//! Request paths are resolved against the configured gateway URL.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;

use crate::config::OkapiConfig;
use crate::error::{OkapiError, OkapiResult};

/// Tenant header sent with every Okapi request.
pub const TENANT_HEADER: &str = "x-okapi-tenant";
/// Credential header returned by login and sent with every later request.
pub const TOKEN_HEADER: &str = "x-okapi-token";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    tenant: &'a str,
}

/// HTTP client pre-bound to one tenant and one session token.
#[derive(Debug, Clone)]
pub struct OkapiClient {
    http: Client,
    base_url: String,
}

impl OkapiClient {
    /// Log in and build a client carrying the returned token.
    pub async fn login(config: &OkapiConfig) -> OkapiResult<Self> {
        let token = fetch_token(&Client::new(), config).await?;
        tracing::info!(tenant = %config.tenant, url = %config.okapi_url, "Obtained Okapi session token");
        Self::with_token(config, &token)
    }

    /// Build a client from an already obtained token.
    pub fn with_token(config: &OkapiConfig, token: &str) -> OkapiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(TENANT_HEADER, header_value(TENANT_HEADER, &config.tenant)?);
        headers.insert(TOKEN_HEADER, header_value(TOKEN_HEADER, token)?);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(OkapiError::Client)?;

        Ok(Self {
            http,
            base_url: config.okapi_url.clone(),
        })
    }

    /// Resolve a path against the gateway URL. A leading `/` is ignored.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a GET request for `path`.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }
}

async fn fetch_token(http: &Client, config: &OkapiConfig) -> OkapiResult<String> {
    let url = config.login_url();
    let login_err = |source| OkapiError::Login {
        url: url.clone(),
        source,
    };

    let response = http
        .post(&url)
        .header(TENANT_HEADER, config.tenant.as_str())
        .header(CONTENT_TYPE, "application/json")
        .json(&LoginRequest {
            username: &config.username,
            password: &config.password,
            tenant: &config.tenant,
        })
        .send()
        .await
        .map_err(login_err)?
        .error_for_status()
        .map_err(login_err)?;

    let token = response
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| OkapiError::MissingToken { url: url.clone() })?;

    Ok(token.to_string())
}

fn header_value(header: &'static str, value: &str) -> OkapiResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| OkapiError::InvalidHeader {
        header,
        reason: e.to_string(),
    })
}

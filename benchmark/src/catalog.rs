// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Named benchmarks against the FOLIO query metadata API.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use okapi_bench_core::{OkapiClient, OkapiConfig};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::harness::{BenchError, BenchmarkHarness};
use crate::metrics::BenchmarkSummary;
use crate::progress::Progress;
use crate::reporter::JsonReporter;
use crate::run::RunSpec;

/// Entry of the `GET entity-types` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityTypeSummary {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Body of `GET entity-types/{id}`; only the parts the benchmarks describe.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityTypeDefinition {
    #[serde(default)]
    pub columns: Vec<serde_json::Value>,
}

/// Benchmarks known to `run_benchmarks`, in default run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Benchmark {
    /// List every entity type visible to the tenant
    #[value(name = "get-entity-types")]
    EntityTypes,
    /// Fetch the full definition of one entity type
    #[value(name = "get-entity-type-definition")]
    EntityTypeDefinition,
}

impl Benchmark {
    pub const ALL: [Benchmark; 2] = [Benchmark::EntityTypes, Benchmark::EntityTypeDefinition];

    /// Name used as the result store key.
    pub fn name(self) -> &'static str {
        match self {
            Benchmark::EntityTypes => "get-entity-types",
            Benchmark::EntityTypeDefinition => "get-entity-type-definition",
        }
    }

    /// Run this benchmark through `harness`.
    pub async fn run<P: Progress>(
        self,
        harness: &mut BenchmarkHarness<P>,
        client: &OkapiClient,
        max_time: Duration,
    ) -> Result<BenchmarkSummary, BenchError> {
        match self {
            Benchmark::EntityTypes => {
                harness
                    .measure(self.name(), entity_types(client.clone()), max_time)
                    .await
            }
            Benchmark::EntityTypeDefinition => {
                harness
                    .measure(self.name(), entity_type_definition(client.clone()), max_time)
                    .await
            }
        }
    }
}

/// Log in, then prepare the output directory.
///
/// Login comes first so a credential failure leaves no trace on disk.
pub async fn connect(
    config: &OkapiConfig,
    output_dir: impl AsRef<Path>,
) -> Result<(OkapiClient, JsonReporter), BenchError> {
    let client = OkapiClient::login(config).await?;
    let reporter = JsonReporter::new(output_dir)?;
    Ok((client, reporter))
}

/// `GET entity-types`, described by the number of entries.
pub fn entity_types(client: OkapiClient) -> RunSpec<(), Vec<EntityTypeSummary>> {
    RunSpec::stateless(
        move || fetch_json(client.get("entity-types")),
        |entities: Vec<EntityTypeSummary>| async move { Ok(format!("{} entities", entities.len())) },
    )
}

/// `GET entity-types/{id}` for the first listed entity type, described by
/// its column count.
pub fn entity_type_definition(client: OkapiClient) -> RunSpec<String, EntityTypeDefinition> {
    let setup_client = client.clone();
    RunSpec::stateful(
        move || async move {
            let entities: Vec<EntityTypeSummary> =
                fetch_json(setup_client.get("entity-types")).await?;
            let first = entities
                .into_iter()
                .next()
                .context("no entity types available to fetch")?;
            tracing::debug!(id = %first.id, label = ?first.label, "Selected entity type");
            Ok(first.id)
        },
        move |id: Arc<String>| fetch_json(client.get(&format!("entity-types/{id}"))),
        |definition: EntityTypeDefinition| async move {
            Ok(format!("{} columns", definition.columns.len()))
        },
    )
}

async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> anyhow::Result<T> {
    let response = request.send().await?.error_for_status()?;
    Ok(response.json().await?)
}

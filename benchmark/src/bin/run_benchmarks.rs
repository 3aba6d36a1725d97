// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI tool to run the Okapi benchmarks and persist their samples.

use clap::Parser;
use okapi_bench_core::{OkapiClient, OkapiConfig};
use okapi_benchmark::{connect, Benchmark, BenchmarkHarness, Progress, QuietProgress};
use std::path::PathBuf;
use std::time::Duration;

/// Connection settings come from USER, PASSWORD, TENANT and OKAPI_URL.
#[derive(Parser)]
#[command(name = "run_benchmarks")]
#[command(about = "Time Okapi API calls and write results.json / results-descriptions.json")]
struct Args {
    /// Output directory for results.json and results-descriptions.json
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Minimum wall-clock time to spend on each benchmark, in milliseconds
    #[arg(short, long, default_value_t = 5000)]
    max_time_ms: u64,

    /// Benchmarks to run, in order (all if not specified)
    #[arg(short, long, value_enum)]
    benchmark: Vec<Benchmark>,

    /// List available benchmarks and exit
    #[arg(long)]
    list: bool,

    /// Suppress the live status line
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging on stderr so the status line owns stdout
    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if args.list {
        for benchmark in Benchmark::ALL {
            println!("{}", benchmark.name());
        }
        return Ok(());
    }

    let config = OkapiConfig::from_env()?;
    let (client, reporter) = connect(&config, &args.output).await?;

    let benchmarks = if args.benchmark.is_empty() {
        Benchmark::ALL.to_vec()
    } else {
        args.benchmark
    };
    let max_time = Duration::from_millis(args.max_time_ms);

    if args.quiet {
        let harness = BenchmarkHarness::with_progress(reporter, QuietProgress);
        run_suite(harness, &client, &benchmarks, max_time).await
    } else {
        run_suite(BenchmarkHarness::new(reporter), &client, &benchmarks, max_time).await
    }
}

async fn run_suite<P: Progress>(
    mut harness: BenchmarkHarness<P>,
    client: &OkapiClient,
    benchmarks: &[Benchmark],
    max_time: Duration,
) -> anyhow::Result<()> {
    for benchmark in benchmarks {
        benchmark.run(&mut harness, client, max_time).await?;
    }

    tracing::info!(
        results = %harness.reporter().results_path().display(),
        descriptions = %harness.reporter().descriptions_path().display(),
        "Benchmark results saved"
    );
    Ok(())
}

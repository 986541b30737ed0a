//! Command-line interface for dynamo-loadtest
//!
//! # Usage Examples
//!
//! ```bash
//! # Four workers for one minute (the defaults)
//! dynamo-loadtest -t my-table
//!
//! # Sixteen workers for five minutes against DynamoDB Local
//! dynamo-loadtest -t my-table -w 16 -d 300 \
//!   --endpoint-url http://localhost:8000 --region us-east-1
//!
//! # Show the discovered key schema without writing anything
//! dynamo-loadtest -t my-table --dry-run
//!
//! # Reproducible data, with the run report written as JSON
//! dynamo-loadtest -t my-table --seed 42 --metrics-output report.json
//! ```
//!
//! Logging is controlled with `RUST_LOG` (default `info`); `RUST_LOG=debug`
//! logs every batch.

use anyhow::Context;
use clap::Parser;
use loadtest_populate_dynamodb::{DynamoDBPopulateArgs, DynamoDBPopulator};
use tracing::info;

#[derive(Parser)]
#[command(name = "dynamo-loadtest")]
#[command(about = "Generate sustained random write load against a DynamoDB table")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    args: DynamoDBPopulateArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() { 1 } else { 0 };
            e.print()?;
            std::process::exit(code);
        }
    };
    let args = cli.args;

    let populator = DynamoDBPopulator::connect(&args).await;
    let schema = populator
        .discover_schema()
        .await
        .context("Failed to discover DynamoDB table schema")?;

    if args.common.dry_run {
        info!(
            "Dry run for table {}: no data will be written",
            populator.table_name()
        );
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let report = populator
        .populate(schema, &args.pool_config())
        .await
        .context("Failed to run load")?;

    if let Some(path) = &args.common.metrics_output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write metrics to {path:?}"))?;
        info!("Metrics written to {:?}", path);
    }

    Ok(())
}

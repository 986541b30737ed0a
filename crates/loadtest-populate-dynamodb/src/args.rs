//! CLI argument definitions for the DynamoDB populator.

use crate::pool::PoolConfig;
use crate::service::ConnectOptions;
use clap::Args;
use loadtest_populate::CommonPopulateArgs;

/// DynamoDB-specific populate arguments.
#[derive(Args, Clone, Debug)]
pub struct DynamoDBPopulateArgs {
    /// Name of the DynamoDB table to write to
    #[arg(long = "table", short = 't', env = "DYNAMODB_TABLE")]
    pub table_name: String,

    /// AWS region (defaults to the environment / profile region)
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Custom DynamoDB endpoint, e.g. http://localhost:8000 for DynamoDB Local
    #[arg(long, env = "DYNAMODB_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    #[command(flatten)]
    pub common: CommonPopulateArgs,
}

impl DynamoDBPopulateArgs {
    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
        }
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.common.workers, self.common.duration())
            .with_shutdown_grace(self.common.shutdown_grace())
            .with_seed(self.common.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::time::Duration;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: DynamoDBPopulateArgs,
    }

    #[test]
    fn test_pool_config_from_args() {
        let cli = TestCli::try_parse_from([
            "test", "-t", "events", "-w", "2", "-d", "1", "--seed", "9",
        ])
        .unwrap();

        assert_eq!(cli.args.table_name, "events");
        let config = cli.args.pool_config();
        assert_eq!(config.worker_count, 2);
        assert_eq!(config.deadline, Duration::from_secs(1));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_batches, None);
        assert!(!cli.args.common.dry_run);
        assert!(cli.args.common.metrics_output.is_none());
    }

    #[test]
    fn test_dry_run_and_metrics_output() {
        let cli = TestCli::try_parse_from([
            "test",
            "-t",
            "events",
            "--dry-run",
            "--metrics-output",
            "report.json",
        ])
        .unwrap();

        assert!(cli.args.common.dry_run);
        assert_eq!(
            cli.args.common.metrics_output.as_deref(),
            Some(std::path::Path::new("report.json"))
        );
        assert_eq!(cli.args.pool_config(), PoolConfig::default());
    }

    #[test]
    fn test_endpoint_override() {
        let cli = TestCli::try_parse_from([
            "test",
            "--table",
            "events",
            "--endpoint-url",
            "http://localhost:8000",
            "--region",
            "us-east-1",
        ])
        .unwrap();

        let options = cli.args.connect_options();
        assert_eq!(options.endpoint_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(options.region.as_deref(), Some("us-east-1"));
    }
}

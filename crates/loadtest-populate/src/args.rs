//! Common CLI argument definitions shared by all populators.

use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// Default number of concurrent workers.
pub const DEFAULT_WORKERS: usize = 4;
/// Default load duration, in seconds.
pub const DEFAULT_DURATION_SECS: u64 = 60;
/// Default time allowed for workers to stop after the deadline, in seconds.
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;

/// Common arguments shared by all populators.
#[derive(Args, Clone, Debug)]
pub struct CommonPopulateArgs {
    /// Number of concurrent workers
    #[arg(long = "workers", short = 'w', default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// How long to generate load, in seconds
    #[arg(long = "duration", short = 'd', default_value_t = DEFAULT_DURATION_SECS)]
    pub duration_secs: u64,

    /// How long to wait for workers to stop after the deadline, in seconds
    #[arg(long = "shutdown-grace", default_value_t = DEFAULT_SHUTDOWN_GRACE_SECS)]
    pub shutdown_grace_secs: u64,

    /// Base random seed (same seed and worker count = same data); defaults to the clock
    #[arg(long)]
    pub seed: Option<u64>,

    /// Dry-run mode: discover the schema without writing any data
    #[arg(long)]
    pub dry_run: bool,

    /// Write the final run report as JSON to this path
    #[arg(long)]
    pub metrics_output: Option<PathBuf>,
}

impl CommonPopulateArgs {
    /// Load duration as a `Duration`.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    /// Shutdown grace period as a `Duration`.
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        common: CommonPopulateArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::parse_from(["test"]);
        assert_eq!(cli.common.workers, 4);
        assert_eq!(cli.common.duration(), Duration::from_secs(60));
        assert_eq!(cli.common.shutdown_grace(), Duration::from_secs(5));
        assert_eq!(cli.common.seed, None);
        assert!(!cli.common.dry_run);
        assert!(cli.common.metrics_output.is_none());
    }

    #[test]
    fn test_short_flags() {
        let cli = TestCli::parse_from(["test", "-w", "8", "-d", "30", "--seed", "42"]);
        assert_eq!(cli.common.workers, 8);
        assert_eq!(cli.common.duration_secs, 30);
        assert_eq!(cli.common.seed, Some(42));
    }
}

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use flatobj::config::{CliArgs, InspectConfig};
use flatobj::inspect::Inspector;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Init tracing
    let filter = if args.verbose {
        EnvFilter::new("flatobj=debug")
    } else {
        EnvFilter::new("flatobj=info")
    };
    if args.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config: InspectConfig = args.into();

    // Configure rayon thread pool
    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure rayon thread pool")?;
    }

    match Inspector::run(&config) {
        Ok(summary) if summary.failures > 0 => Err(anyhow::anyhow!(
            "{} of {} files failed",
            summary.failures,
            summary.files
        )),
        Ok(summary) => {
            eprintln!(
                "Done: {} files inspected in {:.2}s",
                summary.files,
                summary.duration.as_secs_f64()
            );
            Ok(())
        }
        Err(e) => {
            error!(%e, "Inspection failed");
            Err(anyhow::anyhow!(e)).context("flatobj inspection failed")
        }
    }
}

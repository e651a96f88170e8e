//! `strata` binary: parse arguments, run the extraction pipeline, map
//! failures to their exit codes. All diagnostics go to stderr so `--stdout`
//! fact output stays clean.

mod args;

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use strata_core::errors::{PipelineError, UsageError};
use strata_core::resolve::SnapshotResolver;
use strata_extract::run_pipeline;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<_> = std::env::args_os().skip(1).collect();
    let config = match args::parse(argv) {
        Ok(config) => config,
        Err(e) => return usage_exit(e),
    };

    match run_pipeline(&config, &SnapshotResolver::new()) {
        Ok(report) => {
            info!(
                classes = report.facts.submitted,
                failed = report.facts.failed,
                provenance_rows = report.provenance_rows,
                "fact generation finished"
            );
            ExitCode::SUCCESS
        }
        Err(PipelineError::Usage(e)) => usage_exit(e),
        Err(e) => {
            error!(error = %e, "fact generation failed");
            ExitCode::FAILURE
        }
    }
}

fn usage_exit(e: UsageError) -> ExitCode {
    if matches!(e, UsageError::NoArguments) {
        eprintln!("{}", args::USAGE);
    } else {
        eprintln!("{e}");
    }
    ExitCode::from(e.exit_code() as u8)
}

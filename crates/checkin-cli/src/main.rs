//! `checkin`: admit identifiers through a Bloom filter
//!
//! ```text
//! checkin alice bob alice
//! alice: checked in
//! bob: checked in
//! alice: already present
//! ```

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use checkin_cli::{logging, settings, Args};

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    let config = settings::resolve_config(&args)?;
    debug!(
        expected_items = config.expected_items,
        target_fpr = config.target_fpr,
        "Resolved filter configuration"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = checkin_cli::run(&args, &config, stdin.lock(), stdout.lock())?;

    Ok(outcome.exit_code())
}

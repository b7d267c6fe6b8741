//! # Check-in CLI
//!
//! Thin front end over `checkin-filter`: gathers identifiers from the
//! command line or an interactive prompt, checks each one in, and prints
//! `<id>: checked in` or `<id>: already present`.
//!
//! ## Modules
//!
//! - `args`: clap argument definitions
//! - `settings`: config file / environment / flag layering
//! - `input`: read-until-sentinel prompt loop
//! - `report`: verdict formatting
//! - `logging`: tracing subscriber setup

pub mod args;
pub mod input;
pub mod logging;
pub mod report;
pub mod settings;

use std::io::{BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use checkin_filter::{CheckInApi, CheckInService, FilterConfig, Item, Metrics};
use tracing::info;

pub use args::Args;
use report::{verdict_line, Verdict};

/// How a run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No identifiers were given or entered
    NoIdentifiers,
    /// Every identifier was checked in and reported
    Completed {
        checked_in: usize,
        already_present: usize,
    },
}

impl Outcome {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::NoIdentifiers => ExitCode::FAILURE,
            Outcome::Completed { .. } => ExitCode::SUCCESS,
        }
    }
}

/// Build the filter, gather identifiers and report a verdict for each
///
/// `input` is only read when `args.ids` is empty. Prompts and verdicts are
/// written to `out`.
pub fn run<R, W>(args: &Args, config: &FilterConfig, input: R, mut out: W) -> Result<Outcome>
where
    R: BufRead,
    W: Write,
{
    let metrics = Arc::new(Metrics::new());
    let service = CheckInService::from_config(config, Arc::clone(&metrics))
        .context("Invalid filter configuration")?;

    let ids = if args.ids.is_empty() {
        input::collect_identifiers(input, &mut out, &args.sentinel)
            .context("Failed to read identifiers")?
    } else {
        args.ids.clone()
    };

    if ids.is_empty() {
        writeln!(out, "No IDs provided; exiting.")?;
        return Ok(Outcome::NoIdentifiers);
    }

    for id in &ids {
        let verdict = Verdict::from(service.check_in(&Item::from(id)));
        writeln!(out, "{}", verdict_line(id, verdict))?;
    }
    out.flush()?;

    let snapshot = metrics.snapshot();
    let stats = service.stats();
    info!(
        checked_in = snapshot.checkins_admitted,
        already_present = snapshot.checkins_rejected,
        bits_set = stats.bits_set,
        estimated_fpr = stats.estimated_fpr,
        "Run complete"
    );

    Ok(Outcome::Completed {
        checked_in: snapshot.checkins_admitted as usize,
        already_present: snapshot.checkins_rejected as usize,
    })
}

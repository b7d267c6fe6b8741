//! Command-line arguments

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Default word that ends interactive input
pub const DEFAULT_SENTINEL: &str = "confirm";

/// Check identifiers in against a Bloom filter
///
/// Each identifier is reported as "checked in" the first time it is seen and
/// "already present" afterwards. Without identifiers on the command line,
/// they are read one per line from standard input.
#[derive(Parser, Debug, Clone)]
#[command(name = "checkin")]
#[command(about = "Check identifiers in against a Bloom filter", long_about = None)]
pub struct Args {
    /// Identifiers to check in, in order
    pub ids: Vec<String>,

    /// Design capacity of the filter
    #[arg(short = 'n', long, value_name = "N")]
    pub expected_items: Option<u64>,

    /// Target false positive rate, strictly between 0 and 1
    #[arg(short = 'p', long = "fpr", value_name = "P")]
    pub target_fpr: Option<f64>,

    /// JSON file with `expected_items` / `target_fpr`
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Word that ends interactive input (case-insensitive)
    #[arg(long, default_value = DEFAULT_SENTINEL)]
    pub sentinel: String,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

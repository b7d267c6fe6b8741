//! Verdict reporting

use std::fmt;

/// Outcome of checking one identifier in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// First time seen, now recorded
    CheckedIn,
    /// Seen before (or a false positive)
    AlreadyPresent,
}

impl From<bool> for Verdict {
    fn from(admitted: bool) -> Self {
        if admitted {
            Verdict::CheckedIn
        } else {
            Verdict::AlreadyPresent
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::CheckedIn => f.write_str("checked in"),
            Verdict::AlreadyPresent => f.write_str("already present"),
        }
    }
}

/// One output line: `<id>: <verdict>`
pub fn verdict_line(id: &str, verdict: Verdict) -> String {
    format!("{}: {}", id, verdict)
}

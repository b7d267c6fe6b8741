//! Interactive identifier collection
//!
//! Reads identifiers one per line until the sentinel word or end of input.
//! The whole list is collected before any check-in happens.

use std::io::{self, BufRead, Write};

use tracing::debug;

/// Prompt printed before each line
pub const PROMPT: &str = "ID> ";

/// Collect identifiers from `reader`, prompting on `out`
///
/// Lines are trimmed, blank lines are skipped, and a line equal to
/// `sentinel` (ignoring case) ends the input. End of input ends it too.
pub fn collect_identifiers<R, W>(reader: R, mut out: W, sentinel: &str) -> io::Result<Vec<String>>
where
    R: BufRead,
    W: Write,
{
    writeln!(
        out,
        "Enter IDs(letters+numbers)* one per line (type '{}' to finish):",
        sentinel
    )?;

    let sentinel = sentinel.to_lowercase();
    let mut ids = Vec::new();
    let mut lines = reader.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            // Keep the shell prompt off the "ID> " line
            writeln!(out)?;
            debug!(count = ids.len(), "Input closed");
            break;
        };

        let entry = line.trim();
        if entry.to_lowercase() == sentinel {
            debug!(count = ids.len(), "Sentinel received");
            break;
        }
        if !entry.is_empty() {
            ids.push(entry.to_string());
        }
    }

    Ok(ids)
}

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::time::Duration;

use crate::cli::Cli;
use crate::entry::{Entry, EntryBuilder, PendingEntry};
use crate::slowlog::SlowlogParser;

/// Run configuration derived from the CLI arguments.
pub struct ReplayConfig {
    pub target_url: Option<String>,
    pub index_override: Vec<String>,
    pub max_duration: Option<Duration>,
}

impl ReplayConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            target_url: cli.target_url.clone().filter(|url| !url.is_empty()),
            index_override: cli.index_override.clone(),
            // A zero cap means no cap, same as leaving the flag out.
            max_duration: cli.max_duration.filter(|d| !d.is_zero()),
        }
    }
}

/// Runs the whole pipeline: read and parse every input line, build entries
/// for the query-phase records, sort them by absolute timestamp, then emit
/// the delay-encoded loadspec. The summary goes to the diagnostic writer,
/// never to the output stream.
pub fn run<R: BufRead, W: Write, D: Write>(
    config: &ReplayConfig,
    input: R,
    output: W,
    diag: D,
) -> Result<()> {
    let parser = SlowlogParser::new()?;
    let mut builder = EntryBuilder::new(config.target_url.as_deref(), config.index_override.clone());

    let mut entries = Vec::new();
    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let record = parser.parse(&line)?;
        if let Some(entry) = builder.build(&record)? {
            entries.push(entry);
        }
    }

    // Slowlog lines are not guaranteed to be timestamp ordered. The sort is
    // stable, so equal timestamps keep their input encounter order.
    entries.sort_by_key(|e| e.timestamp_nanos);

    emit(entries, config.max_duration, output, diag)
}

/// Walks the sorted entries, rewriting each absolute timestamp as the delay
/// since the previous entry and assigning sequential ids, one JSON object per
/// output line. Emission stops once the cumulative delay reaches the cap; the
/// entry that crosses it is still emitted.
fn emit<W: Write, D: Write>(
    entries: Vec<PendingEntry>,
    max_duration: Option<Duration>,
    mut output: W,
    mut diag: D,
) -> Result<()> {
    let mut elapsed: i64 = 0;
    let mut previous = entries.first().map(|e| e.timestamp_nanos).unwrap_or(0);

    for (id, pending) in entries.into_iter().enumerate() {
        let delay = pending.timestamp_nanos - previous;
        previous = pending.timestamp_nanos;

        let entry = Entry {
            id,
            url: pending.url,
            source: pending.source,
            delay_since_last_nanos: delay,
        };
        let json = serde_json::to_string(&entry).context("Failed to encode loadspec entry")?;
        writeln!(output, "{}", json).context("Failed to write loadspec entry")?;

        elapsed += delay;
        if let Some(max) = max_duration {
            // Compared in u128: the cap can exceed what fits in i64 nanoseconds.
            if elapsed as u128 >= max.as_nanos() {
                break;
            }
        }
    }
    output.flush().context("Failed to flush loadspec output")?;

    let total = Duration::from_nanos(elapsed.max(0) as u64);
    writeln!(diag, "Test duration: {}", humantime::format_duration(total))
        .context("Failed to write summary")?;
    Ok(())
}

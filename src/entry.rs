use anyhow::Result;
use serde::Serialize;

use crate::slowlog::SlowlogRecord;

/// One request descriptor in the emitted loadspec.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Entry {
    /// Position of this entry in the final emitted order (0-based).
    pub id: usize,
    pub url: String,
    pub source: String,
    /// Delay relative to the previous emitted entry, 0 for the first one.
    #[serde(rename = "delaySinceLastNanos")]
    pub delay_since_last_nanos: i64,
}

/// A request descriptor that still carries its absolute timestamp. The
/// relative delay and the id are assigned only after the whole set has been
/// sorted, so pending entries keep the two notions of time separate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEntry {
    /// Absolute timestamp of the slowlog line, nanoseconds since the epoch.
    pub timestamp_nanos: i64,
    pub url: String,
    pub source: String,
}

/// Builds pending entries from parsed slowlog records, applying the host and
/// index overrides. The round-robin position is explicit builder state,
/// advanced once per accepted (query-phase) record.
pub struct EntryBuilder {
    host_override: Option<String>,
    index_override: Vec<String>,
    accepted: usize,
}

impl EntryBuilder {
    pub fn new(target_url: Option<&str>, index_override: Vec<String>) -> Self {
        Self {
            host_override: target_url
                .filter(|url| !url.is_empty())
                .map(normalize_target_url),
            index_override,
            accepted: 0,
        }
    }

    /// Builds a pending entry from one slowlog record. Returns None for
    /// records that are not query-phase lines (e.g. the fetch phase); those
    /// do not advance the round-robin position.
    pub fn build(&mut self, record: &SlowlogRecord) -> Result<Option<PendingEntry>> {
        if !record.is_query() {
            return Ok(None);
        }
        let timestamp_nanos = record.timestamp_nanos()?;

        let host = self.host_override.as_deref().unwrap_or(&record.host);
        let index = if self.index_override.is_empty() {
            record.index.as_str()
        } else {
            &self.index_override[self.accepted % self.index_override.len()]
        };

        let mut url = [host, index, &record.types, "_search"].join("/");
        if !record.search_type.is_empty() {
            url.push_str("?search_type=");
            url.push_str(&record.search_type.to_lowercase());
        }

        self.accepted += 1;
        Ok(Some(PendingEntry {
            timestamp_nanos,
            url,
            source: record.source.clone(),
        }))
    }
}

/// Reduces a target URL to scheme://host[:port], dropping any path. This
/// keeps the host argument consistent with how the replay generator treats
/// its target.
pub fn normalize_target_url(url: &str) -> String {
    let (scheme, rest) = if let Some(rest) = url.strip_prefix("http://") {
        ("http://", rest)
    } else if let Some(rest) = url.strip_prefix("https://") {
        ("https://", rest)
    } else {
        ("", url)
    };
    let host = match rest.find('/') {
        Some(i) if i > 0 => &rest[..i],
        _ => rest,
    };
    format!("{}{}", scheme, host)
}

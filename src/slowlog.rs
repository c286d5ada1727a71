use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use regex::Regex;

/// Timestamp layout used by the slowlog, e.g. "2020-01-01 10:00:00,000".
/// Milliseconds are separated by a comma, not a dot.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Log category of query-phase slowlog lines. Lines of any other category
/// (e.g. the fetch phase) are filtered out, not treated as errors.
pub const QUERY_LOG_TYPE: &str = "index.search.slowlog.query";

/// One slow query log line, broken into its structural fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlowlogRecord {
    pub timestamp: String,
    pub log_type: String,
    pub host: String,
    pub index: String,
    pub types: String,
    pub search_type: String,
    pub source: String,
}

impl SlowlogRecord {
    /// Whether this line records the query phase of a search.
    pub fn is_query(&self) -> bool {
        self.log_type == QUERY_LOG_TYPE
    }

    /// The absolute timestamp of this line as nanoseconds since the Unix
    /// epoch. The slowlog carries no timezone, so the timestamp is read as UTC.
    pub fn timestamp_nanos(&self) -> Result<i64> {
        let dt = NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
            .with_context(|| format!("Invalid slowlog timestamp: '{}'", self.timestamp))?;
        dt.and_utc()
            .timestamp_nanos_opt()
            .with_context(|| format!("Slowlog timestamp out of range: '{}'", self.timestamp))
    }
}

pub struct SlowlogParser {
    line_regex: Regex,
}

impl SlowlogParser {
    pub fn new() -> Result<Self> {
        // Elasticsearch search slowlog line
        // Example: [2020-01-01 10:00:00,000][INFO ][index.search.slowlog.query] [host1] [myindex] [] took[1ms], took_millis[1], types[mytype], stats[], search_type[QUERY_THEN_FETCH], total_shards[1], source[{"query":{"match_all":{}}}], extra_source[]
        let line_regex = Regex::new(
            r"\[(?P<ts>[^\]]+)\].?\[.*\].?\[(?P<log_type>[^\]]+)\].?\[(?P<host>[^\]]+)\].?\[(?P<index>[^\]]+)\].?\[.*\].*types\[(?P<types>[^\]]+)\].*search_type\[(?P<search_type>[^\]]+)\].*source\[(?P<source>.*)\], extra_source",
        )
        .context("Failed to compile slowlog line regex")?;

        Ok(Self { line_regex })
    }

    /// Extract the structural fields from one slowlog line. A line that does
    /// not match the expected layout is an error, not a skip: the run aborts
    /// rather than silently dropping input.
    pub fn parse(&self, line: &str) -> Result<SlowlogRecord> {
        let captures = self
            .line_regex
            .captures(line)
            .with_context(|| format!("malformed slowlog line: {}", line))?;

        // The named groups are all non-optional in the pattern, so a
        // successful match always carries every field.
        let field = |name: &str| captures.name(name).map(|m| m.as_str().to_string());
        Ok(SlowlogRecord {
            timestamp: field("ts").unwrap_or_default(),
            log_type: field("log_type").unwrap_or_default(),
            host: field("host").unwrap_or_default(),
            index: field("index").unwrap_or_default(),
            types: field("types").unwrap_or_default(),
            search_type: field("search_type").unwrap_or_default(),
            source: field("source").unwrap_or_default(),
        })
    }
}

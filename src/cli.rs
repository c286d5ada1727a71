// CLI-specific types and structures
// This module contains the command-line interface definitions and parsing logic

use clap::Parser;
use std::time::Duration;

// CLI structure - contains all command-line arguments and options
#[derive(Parser, Debug)]
#[command(name = "loadspec")]
#[command(about = "Converts a search-engine slow query log into a replayable load-test specification")]
#[command(
    long_about = "Reads an Elasticsearch slow query log from stdin and writes a replayable load-test\nspecification to stdout: one JSON request descriptor per line, sorted by timestamp\nand annotated with the delay since the previous request in nanoseconds. A summary\nof the total simulated duration is printed to stderr.\n\nCOMMON EXAMPLES:\n  loadspec < slowlog.txt\n  loadspec http://localhost:9200 < slowlog.txt\n  loadspec --index-override idx-a --index-override idx-b < slowlog.txt\n  loadspec --max-duration 5m < slowlog.txt"
)]
#[command(version)]
pub struct Cli {
    /// Target URL. Overrides the host captured from the slowlog; only the
    /// scheme://host[:port] part of the URL is kept.
    pub target_url: Option<String>,

    /// Override slowlog indexes. It is a list, the flag can be repeated if
    /// you would like the loadtest to hit many indexes (assigned round-robin).
    #[arg(long = "index-override", value_name = "INDEX")]
    pub index_override: Vec<String>,

    /// Maximum duration of the generated loadspec (e.g. "30s", "5m"). It can
    /// be smaller, if the slowlog comprises a smaller time frame.
    #[arg(
        long = "max-duration",
        value_name = "DURATION",
        value_parser = humantime::parse_duration
    )]
    pub max_duration: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_args() {
        let cli = Cli::parse_from(["loadspec"]);
        assert!(cli.target_url.is_none());
        assert!(cli.index_override.is_empty());
        assert!(cli.max_duration.is_none());
    }

    #[test]
    fn test_parse_all_args() {
        let cli = Cli::parse_from([
            "loadspec",
            "http://localhost:9200",
            "--index-override",
            "idx-a",
            "--index-override",
            "idx-b",
            "--max-duration",
            "1m30s",
        ]);
        assert_eq!(cli.target_url.as_deref(), Some("http://localhost:9200"));
        assert_eq!(cli.index_override, vec!["idx-a", "idx-b"]);
        assert_eq!(cli.max_duration, Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_invalid_duration_rejected() {
        assert!(Cli::try_parse_from(["loadspec", "--max-duration", "bogus"]).is_err());
    }
}

// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Stdio};

/// Helper function to run loadspec with given arguments and input via stdin
pub fn run_loadspec_with_input(args: &[&str], input: &str) -> (String, String, i32) {
    // Use the built binary directly instead of cargo run to avoid compilation output
    let binary_path = if cfg!(debug_assertions) {
        "./target/debug/loadspec"
    } else {
        "./target/release/loadspec"
    };

    let mut cmd = Command::new(binary_path)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start loadspec");

    // Write input to stdin
    if let Some(stdin) = cmd.stdin.as_mut() {
        stdin
            .write_all(input.as_bytes())
            .expect("Failed to write to stdin");
    }

    let output = cmd.wait_with_output().expect("Failed to read output");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Builds one query-phase slowlog line with the given timestamp
pub fn query_line(timestamp: &str) -> String {
    format!(
        r#"[{}][INFO ][index.search.slowlog.query] [host1] [myindex] [] took[1ms], took_millis[1], types[mytype], stats[], search_type[QUERY_THEN_FETCH], total_shards[1], source[{{"query":{{"match_all":{{}}}}}}], extra_source[]"#,
        timestamp
    )
}

/// Parses newline-delimited JSON output into values
pub fn parse_output(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("Output line should be valid JSON"))
        .collect()
}

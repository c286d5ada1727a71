use clap::Parser;
use std::io::{self, BufWriter};

mod cli;
mod entry;
mod pipeline;
mod slowlog;

use cli::Cli;
use pipeline::ReplayConfig;

fn main() {
    let cli = Cli::parse();
    let config = ReplayConfig::from_cli(&cli);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = pipeline::run(
        &config,
        stdin.lock(),
        BufWriter::new(stdout.lock()),
        io::stderr(),
    );

    if let Err(e) = result {
        eprintln!("loadspec: Error: {:#}", e);
        std::process::exit(1);
    }
}

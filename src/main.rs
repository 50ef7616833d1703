//! Sales Metrics CLI
//!
//! Aggregates a CSV sales log and prints revenue and best-seller
//! reports to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- sales.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use log::info;
use sales_metrics::{EngineError, Result, SalesPipeline};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(EngineError::MissingArgument);
    }

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut pipeline = SalesPipeline::new();
    let summary = pipeline.ingest_csv(reader)?;
    info!(
        "{} records ingested, {} rows dropped",
        summary.ingested,
        summary.dropped.len()
    );

    let stdout = io::stdout();
    let handle = stdout.lock();
    pipeline.write_report(handle)?;

    Ok(())
}

use std::path::PathBuf;

use clap::Parser;

use stock_reorder_rs::batch::{
    process_rows, read_rows_from_path, summarize, write_results_to_path, write_summary_json,
};
use stock_reorder_rs::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "batch")]
#[command(about = "Compute order recommendations for every row of a CSV file")]
struct Args {
    /// Input CSV with one order request per row
    #[arg(long, default_value = "orders.csv")]
    input: PathBuf,

    /// Output CSV with inputs and recommendations
    #[arg(long, default_value = "recommendations.csv")]
    output: PathBuf,

    /// Optional JSON file for batch totals
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    let rows = match read_rows_from_path(&args.input) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Error reading {:?}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    println!("Loaded {} rows from {:?}", rows.len(), args.input);
    tracing::info!(rows = rows.len(), "processing batch");

    let results = process_rows(rows);
    let summary = summarize(&results);

    println!(
        "Total: exact {:.2} lbs, rounded {} lbs",
        summary.total_exact, summary.total_rounded
    );

    if let Err(e) = write_results_to_path(&args.output, &results) {
        eprintln!("Error writing CSV: {}", e);
        std::process::exit(1);
    }
    println!("Wrote recommendations to {:?}", args.output);

    if let Some(path) = &args.summary {
        if let Err(e) = write_summary_json(path, &summary) {
            eprintln!("Error writing JSON: {}", e);
            std::process::exit(1);
        }
        println!("Wrote summary to {:?}", path);
    }
}

//! Sales table generator
//!
//! Writes one synthetic sales table to CSV.
//!
//! Usage:
//!   cargo run --release --bin generate_sales -- [OPTIONS]
//!
//! Options:
//!   --rows <N>       Rows to generate (default: 500, env SALES_ROWS)
//!   --seed <N>       Random seed for reproducibility (optional, env SALES_SEED)
//!   --output <PATH>  Output CSV path (default: data/sales_data.csv)

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use sales_dashboard::aggregate::aggregate;
use sales_dashboard::config::DashboardConfig;
use sales_dashboard::format::{format_count, format_currency};
use sales_dashboard::generator::SalesGenerator;
use sales_dashboard::table::write_csv;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate_sales")]
#[command(about = "Generate a synthetic sales table as CSV")]
struct Args {
    #[command(flatten)]
    config: DashboardConfig,

    /// Output CSV path
    #[arg(long, default_value = "data/sales_data.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let today = Local::now().date_naive();

    println!("Sales Data Generator");
    println!("{}", "━".repeat(60));
    println!("Output:       {}", args.output.display());
    println!("Rows:         {}", args.config.rows);
    println!("As of:        {}", today);
    if let Some(seed) = args.config.seed {
        println!("Random seed:  {}", seed);
    }
    println!();

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let table = SalesGenerator::from_seed(args.config.seed).generate(args.config.rows, today);

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    write_csv(&table, file).with_context(|| format!("writing {}", args.output.display()))?;

    let agg = aggregate(&table);
    println!("Generation complete");
    println!("{}", "━".repeat(60));
    println!("Records written:  {:>14}", format_count(agg.row_count));
    println!("Grand total:      {:>14}", format_currency(agg.grand_total));
    println!("Mean ticket:      {:>14}", format_currency(agg.mean_total));
    println!("Output file:      {}", args.output.display());

    Ok(())
}

//! Growth-rate and payer-mix sensitivity of projected revenue
//!
//! Usage: cargo run --bin sensitivity -- --growth 4,8,12 --bpjs 50,65,80

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use abk_projection::format::{format_percent, format_rupiah};
use abk_projection::inputs::load_inputs_json;
use abk_projection::scenario::ScenarioResult;
use abk_projection::{ProjectionInputs, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(name = "sensitivity", about = "Compare projections across growth rates and BPJS shares")]
struct Args {
    /// JSON file with base inputs
    #[arg(long)]
    inputs: Option<PathBuf>,

    /// Growth rates to compare, percent
    #[arg(long, value_delimiter = ',', default_values_t = vec![0.0, 4.0, 8.0, 12.0])]
    growth: Vec<f64>,

    /// BPJS shares to compare, percent
    #[arg(long, value_delimiter = ',', default_values_t = vec![50.0, 65.0, 80.0])]
    bpjs: Vec<f64>,
}

fn print_table(title: &str, results: &[ScenarioResult]) {
    println!("\n{}", title);
    println!("{:<14} {:>24} {:>24} {:>24} {:>10}", "Skenario", "Total Tahun Dasar", "Total Tahun Akhir", "Kumulatif", "CAGR");
    println!("{}", "-".repeat(100));
    for result in results {
        let s = result.summary();
        println!(
            "{:<14} {:>24} {:>24} {:>24} {:>10}",
            result.name,
            format_rupiah(s.base_total_revenue),
            format_rupiah(s.final_total_revenue),
            format_rupiah(s.cumulative_revenue),
            format_percent(s.revenue_cagr_pct),
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let base = match &args.inputs {
        Some(path) => load_inputs_json(path).with_context(|| format!("loading inputs from {}", path.display()))?,
        None => ProjectionInputs::default(),
    };

    let runner = ScenarioRunner::new(base).context("invalid base inputs")?;
    println!(
        "Base year {} with {} projected years",
        runner.base_inputs().base_year,
        runner.base_inputs().projection_years
    );

    let growth = runner.run_growth_rates(&args.growth)?;
    print_table("Sensitivitas Growth Rate", &growth);

    let bpjs = runner.run_bpjs_shares(&args.bpjs)?;
    print_table("Sensitivitas Porsi BPJS", &bpjs);

    Ok(())
}

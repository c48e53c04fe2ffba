//! ABK Financial Intelligence CLI
//!
//! Projects inpatient revenue for the configured hospital and optionally writes
//! Excel, PDF, and CSV reports.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use abk_projection::export::{
    export_with_notice, CsvSummaryExporter, PdfReportExporter, ReportExporter, WorkbookExporter,
};
use abk_projection::format::{format_growth, format_num, format_percent, format_rupiah};
use abk_projection::inputs::{load_bed_table, load_inputs_json};
use abk_projection::projection::assess;
use abk_projection::{InputField, ProjectionInputs, ProjectionSession, ProjectionSummary, YearProjection};

#[derive(Debug, Parser)]
#[command(name = "abk_projection", version, about = "Hospital inpatient revenue projection")]
struct Cli {
    /// JSON file with projection inputs (missing keys use defaults)
    #[arg(long)]
    inputs: Option<PathBuf>,

    /// CSV bed table with columns Kelas,TT,BOR,ALOS,Tarif
    #[arg(long)]
    beds: Option<PathBuf>,

    /// Base (year 0) calendar year
    #[arg(long)]
    base_year: Option<i32>,

    /// Number of projected years after the base year
    #[arg(long)]
    years: Option<u32>,

    /// Annual growth rate, percent
    #[arg(long)]
    growth: Option<f64>,

    /// Override a form field, e.g. --set ttVIP=12 --set pctBPJS=70
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    overrides: Vec<String>,

    /// Print the per-class breakdown and indicators for every year
    #[arg(long)]
    detail: bool,

    /// Print the projection as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Write the Excel workbook to this path
    #[arg(long)]
    xlsx: Option<PathBuf>,

    /// Write the PDF report to this path
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// Write the summary CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write all reports with their default file names into this directory
    #[arg(long, value_name = "DIR")]
    export_all: Option<PathBuf>,
}

fn build_inputs(cli: &Cli) -> Result<ProjectionInputs> {
    let mut inputs = match &cli.inputs {
        Some(path) => load_inputs_json(path).with_context(|| format!("loading inputs from {}", path.display()))?,
        None => ProjectionInputs::default(),
    };

    if let Some(path) = &cli.beds {
        inputs.bed_classes = load_bed_table(path, &inputs.bed_classes)
            .with_context(|| format!("loading bed table from {}", path.display()))?;
    }
    if let Some(year) = cli.base_year {
        inputs.base_year = year;
    }
    if let Some(years) = cli.years {
        inputs.projection_years = years;
    }
    if let Some(growth) = cli.growth {
        inputs.growth_rate_pct = growth;
    }

    for item in &cli.overrides {
        let (key, value) = item
            .split_once('=')
            .with_context(|| format!("override {:?} is not FIELD=VALUE", item))?;
        let field: InputField = key.trim().parse().map_err(anyhow::Error::msg)?;
        field.set_raw(&mut inputs, value);
    }

    Ok(inputs)
}

fn print_dashboard(years: &[YearProjection], summary: &ProjectionSummary) {
    let base = &years[0];
    println!("ABK Financial Intelligence");
    println!("==========================\n");
    println!("Total Pendapatan {}: {}", base.year_label, format_rupiah(base.total_revenue));
    println!("  Rawat Inap:  {}", format_rupiah(base.inpatient_revenue));
    println!("  Penunjang:   {}", format_rupiah(base.ancillary.total));
    println!("  BOR:         {}", format_percent(base.indicators.occupancy_rate));
    println!("  Pasien:      {}", format_num(base.indicators.total_patients));
    println!();

    println!(
        "{:<14} {:>24} {:>24} {:>24} {:>10} {:>8}",
        "Tahun", "Rawat Inap", "Penunjang", "Total", "Growth", "BOR"
    );
    println!("{}", "-".repeat(109));
    for year in years {
        let growth = if year.is_base_year() {
            "-".to_string()
        } else {
            format_growth(year.revenue_growth_pct)
        };
        println!(
            "{:<14} {:>24} {:>24} {:>24} {:>10} {:>8}",
            year.year_label,
            format_rupiah(year.inpatient_revenue),
            format_rupiah(year.ancillary.total),
            format_rupiah(year.total_revenue),
            growth,
            format_percent(year.indicators.occupancy_rate),
        );
    }

    println!("\nSummary:");
    println!("  Years:              {} ({}-{})", summary.total_years, summary.first_year, summary.last_year);
    println!("  Cumulative revenue: {}", format_rupiah(summary.cumulative_revenue));
    println!("  Revenue CAGR:       {}", format_percent(summary.revenue_cagr_pct));
}

fn print_detail(years: &[YearProjection]) {
    for year in years {
        println!("\n{}", year.year_label);
        println!("{}", "=".repeat(year.year_label.len()));
        println!(
            "{:<10} {:>6} {:>8} {:>12} {:>12} {:>24}",
            "Kelas", "TT", "BOR", "Hari Rawat", "Pasien", "Pendapatan"
        );
        for d in &year.class_details {
            println!(
                "{:<10} {:>6} {:>8} {:>12} {:>12} {:>24}",
                d.class_name,
                d.beds,
                format_percent(d.target_occupancy_pct),
                format_num(d.display_patient_days),
                format_num(d.display_patient_count),
                format_rupiah(d.revenue),
            );
        }
        for (label, value) in year.ancillary.components() {
            println!("  {:<14} {:>24}", label, format_rupiah(value));
        }
        println!("  {:<14} {:>24}", "TOTAL", format_rupiah(year.total_revenue));

        for a in assess(&year.indicators) {
            println!(
                "  {:<24} {:>18} {:>12} {}",
                a.kpi.label(),
                format_num(a.value),
                a.kpi.ideal_range_label(),
                a.status.label()
            );
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let inputs = build_inputs(&cli)?;
    let mut session = ProjectionSession::new(inputs);
    let years = session.projection().context("invalid projection inputs")?.to_vec();
    let inputs = session.inputs().clone();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&years)?);
    } else {
        print_dashboard(&years, &ProjectionSummary::from_years(&years));
        if cli.detail {
            print_detail(&years);
        }
    }

    let mut jobs: Vec<(&dyn ReportExporter, PathBuf)> = Vec::new();
    if let Some(path) = &cli.xlsx {
        jobs.push((&WorkbookExporter as &dyn ReportExporter, path.clone()));
    }
    if let Some(path) = &cli.pdf {
        jobs.push((&PdfReportExporter as &dyn ReportExporter, path.clone()));
    }
    if let Some(path) = &cli.csv {
        jobs.push((&CsvSummaryExporter as &dyn ReportExporter, path.clone()));
    }
    if let Some(dir) = &cli.export_all {
        for exporter in [&WorkbookExporter as &dyn ReportExporter, &PdfReportExporter, &CsvSummaryExporter] {
            jobs.push((exporter, dir.join(exporter.default_file_name())));
        }
    }

    let mut failures = 0;
    for (exporter, path) in jobs {
        let notice = export_with_notice(exporter, &years, &inputs, &path);
        eprintln!("{}", notice.message);
        if !notice.success {
            failures += 1;
        }
    }
    if failures > 0 {
        bail!("{} export(s) failed", failures);
    }

    Ok(())
}

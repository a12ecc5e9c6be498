//! Sales dashboard in the terminal
//!
//! Generates a sales table, applies the filters given on the command line and
//! prints the dashboard.
//!
//! Run: ./target/release/sales_dashboard [options] [section]
//! Sections: all, summary, charts, records, report
//!
//! Example:
//!   sales_dashboard --seed 7 --region North --region South --start 2024-01-01 report

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use sales_dashboard::config::DashboardConfig;
use sales_dashboard::filter::DateRange;
use sales_dashboard::format::{format_count, format_currency};
use sales_dashboard::models::{Product, Region, Salesperson};
use sales_dashboard::session::{ChartBand, DashboardSession, DashboardView};
use sales_dashboard::table::{sort_records, SortKey, SortOrder};

#[derive(Parser, Debug)]
#[command(name = "sales_dashboard")]
#[command(about = "Filter a synthetic sales table and print the dashboard")]
struct Args {
    #[command(flatten)]
    config: DashboardConfig,

    /// Only this salesperson (repeatable)
    #[arg(long = "salesperson")]
    salespeople: Vec<Salesperson>,

    /// Only this region (repeatable)
    #[arg(long = "region")]
    regions: Vec<Region>,

    /// Only this product (repeatable)
    #[arg(long = "product")]
    products: Vec<Product>,

    /// First day included, YYYY-MM-DD (default: 364 days ago)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day included, YYYY-MM-DD (default: today)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Record table sort column
    #[arg(long, default_value = "total")]
    sort: SortKey,

    /// Record table sort direction (asc, desc)
    #[arg(long, default_value = "desc")]
    order: SortOrder,

    /// Record table rows to print
    #[arg(long, default_value_t = 20)]
    limit: usize,

    /// Section to print: all, summary, charts, records, report
    #[arg(default_value = "all")]
    section: String,
}

const BAR_WIDTH: f64 = 30.0;

fn print_section_header(title: &str) {
    println!("\n{}", "═".repeat(80));
    println!("  {}", title);
    println!("{}\n", "═".repeat(80));
}

fn print_subsection(title: &str) {
    println!("\n{}", title);
    println!("{}", "─".repeat(70));
}

fn bar(value: f64, max: f64) -> String {
    filled_bar(value, max, '#')
}

fn filled_bar(value: f64, max: f64, fill: char) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    fill.to_string().repeat((value / max * BAR_WIDTH).round() as usize)
}

fn band_fill(band: ChartBand) -> char {
    match band {
        ChartBand::High => '#',
        ChartBand::Mid => '=',
        ChartBand::Low => '-',
    }
}

fn share(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let mut session = DashboardSession::new(&args.config)?;
    let current = session.selection().clone();
    let selection = current
        .clone()
        .with_salespeople(args.salespeople.iter().copied())
        .with_regions(args.regions.iter().copied())
        .with_products(args.products.iter().copied())
        .with_date_range(DateRange::new(
            args.start.unwrap_or(current.date_range.start),
            args.end.unwrap_or(current.date_range.end),
        ));
    session.set_selection(selection);

    let mut view = session.view();
    sort_records(&mut view.records, args.sort, args.order);

    println!("\n{}", "█".repeat(80));
    println!("{}  SALES DASHBOARD  {}", "█".repeat(31), "█".repeat(30));
    println!("{}", "█".repeat(80));
    println!(
        "  Period: {} to {}",
        view.selection.date_range.start, view.selection.date_range.end
    );

    match args.section.as_str() {
        "all" => {
            print_summary(&view);
            print_charts(&view);
            print_records(&view, args.limit);
            print_report(&view);
        }
        "summary" => print_summary(&view),
        "charts" => print_charts(&view),
        "records" => print_records(&view, args.limit),
        "report" => print_report(&view),
        _ => {
            println!("Unknown section: {}", args.section);
            println!("Available: all, summary, charts, records, report");
        }
    }

    println!("\n{}", "█".repeat(80));
    Ok(())
}

fn print_summary(view: &DashboardView) {
    print_section_header("1. SUMMARY");

    println!("  Total Sales:        {:>16}", view.summary.grand_total);
    println!("  Transactions:       {:>16}", view.summary.record_count);
    println!("  Mean Ticket:        {:>16}", view.summary.mean_ticket);
    println!("  Best Performer:     {:>16}", view.summary.best_performer);
}

fn print_charts(view: &DashboardView) {
    print_section_header("2. CHARTS");

    if view.records.is_empty() {
        println!("  No data available for the selected filters.");
        return;
    }

    let charts = &view.charts;
    let grand_total = view.report.grand_total;

    print_subsection("Sales by Salesperson");
    let max = charts.by_salesperson.iter().map(|s| s.total).fold(0.0, f64::max);
    for s in charts.salespeople_by_total() {
        println!(
            "  {:16} {:>14}  {}",
            s.salesperson.name(),
            format_currency(s.total),
            filled_bar(s.total, max, band_fill(ChartBand::of(s.total)))
        );
    }
    println!("  # >= 40,000   = >= 25,000   - below");

    print_subsection("Sales by Region");
    for r in &charts.by_region {
        println!(
            "  {:10} {:>14}  {:>5.1}%",
            r.region.name(),
            format_currency(r.total),
            share(r.total, grand_total)
        );
    }

    print_subsection("Sales by Product");
    let max = charts.by_product.iter().map(|p| p.total).fold(0.0, f64::max);
    let mean = charts.product_mean();
    for p in charts.products_by_total() {
        let fill = if p.total > mean { '#' } else { '-' };
        println!(
            "  {:10} {:>14}  {}",
            p.product.name(),
            format_currency(p.total),
            filled_bar(p.total, max, fill)
        );
    }
    println!("  # above mean ({})   - at or below", format_currency(mean));

    print_subsection("Monthly Trend");
    let max = charts.by_month.iter().map(|m| m.total).fold(0.0, f64::max);
    for m in &charts.by_month {
        println!(
            "  {:8} {:>6} {:>14}  {}",
            m.month,
            m.count,
            format_currency(m.total),
            bar(m.total, max)
        );
    }
}

fn print_records(view: &DashboardView, limit: usize) {
    print_section_header("3. RECORDS");

    println!(
        "  {:10} {:16} {:9} {:7} {:>4} {:>11} {:>12} {:>8}",
        "Date", "Salesperson", "Product", "Region", "Qty", "Unit Price", "Total", "Bonus"
    );
    println!("  {}", "─".repeat(84));
    for t in view.records.iter().take(limit) {
        println!(
            "  {:10} {:16} {:9} {:7} {:>4} {:>11} {:>12} {:>8}",
            t.date.format("%Y-%m-%d").to_string(),
            t.salesperson.name(),
            t.product.name(),
            t.region.name(),
            t.quantity,
            format_currency(t.unit_price),
            format_currency(t.total_amount),
            format_currency(t.seller_bonus)
        );
    }
    if view.records.len() > limit {
        println!(
            "  ... {} more of {}",
            format_count(view.records.len() - limit),
            format_count(view.records.len())
        );
    }
}

fn print_report(view: &DashboardView) {
    print_section_header("4. PERFORMANCE REPORT");

    let report = &view.report;
    if report.is_empty() {
        println!("  No data available for the selected filters.");
        return;
    }

    print_subsection("Performance by Salesperson");
    println!(
        "  {:16} {:>14} {:>7} {:>10} {:>12}",
        "Salesperson", "Total", "Sales", "Tier", "Bonus"
    );
    println!("  {}", "─".repeat(63));
    for line in &report.salespeople {
        println!(
            "  {:16} {:>14} {:>7} {:>10} {:>12}",
            line.salesperson.name(),
            format_currency(line.total),
            line.count,
            line.tier.label(),
            format_currency(line.bonus_total)
        );
    }

    let tiers: Vec<String> = report
        .tier_counts()
        .into_iter()
        .map(|(tier, n)| format!("{} {}", tier, n))
        .collect();
    println!("\n  Tiers: {}", tiers.join(" | "));

    print_subsection("Performance by Region");
    for line in &report.regions {
        println!(
            "  {:10} {:>14} {:>7} sales",
            line.region.name(),
            format_currency(line.total),
            line.count
        );
    }

    print_subsection("Overall");
    println!("  Grand Total:        {:>16}", format_currency(report.grand_total));
    println!("  Mean per Sale:      {:>16}", format_currency(report.mean_total));
}

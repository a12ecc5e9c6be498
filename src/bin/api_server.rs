//! REST API server for the sales dashboard
//!
//! Usage:
//!   ./target/release/api_server [options]
//!
//! Options:
//!   --port PORT       Port to listen on (default: 8080, env SALES_PORT)
//!   --rows N          Rows per generated table (default: 500, env SALES_ROWS)
//!   --seed N          Random seed (env SALES_SEED)
//!
//! REST endpoints:
//!   GET  /api/v1/health       - Health check
//!   GET  /api/v1/dashboard    - Summary, report, charts, records (?limit=&sort=&order=)
//!   GET  /api/v1/options      - Values available to the filters
//!   GET  /api/v1/selection    - Current filter selection
//!   PUT  /api/v1/selection    - Replace the filter selection
//!   POST /api/v1/regenerate   - Replace the sales table with a fresh one
//!   GET  /api/v1/export.csv   - Filtered records as CSV

use anyhow::{Context, Result};
use clap::Parser;
use sales_dashboard::api::{self, DashboardService};
use sales_dashboard::config::DashboardConfig;
use sales_dashboard::session::DashboardSession;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "api_server")]
#[command(about = "Serve the sales dashboard over REST")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "SALES_PORT", default_value_t = 8080)]
    port: u16,

    #[command(flatten)]
    config: DashboardConfig,
}

fn print_banner(port: u16, rows: usize) {
    println!("============================================================");
    println!("              SALES DASHBOARD API SERVER");
    println!("============================================================");
    println!();
    println!("  Port:     {}", port);
    println!("  REST:     http://localhost:{}/api/v1/", port);
    println!("  Rows:     {}", rows);
    println!();
    println!("REST Endpoints:");
    println!("  GET  /api/v1/health         Health check");
    println!("  GET  /api/v1/dashboard      Dashboard view");
    println!("  GET  /api/v1/options        Filter options");
    println!("  GET  /api/v1/selection      Current selection");
    println!("  PUT  /api/v1/selection      Replace selection");
    println!("  POST /api/v1/regenerate     New sales table");
    println!("  GET  /api/v1/export.csv     Filtered records");
    println!();
    println!("============================================================");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .init();

    let args = Args::parse();
    print_banner(args.port, args.config.rows);

    let session = DashboardSession::new(&args.config)?;
    let service = Arc::new(DashboardService::new(session));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let app = api::router(service);

    tracing::info!("Starting REST server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

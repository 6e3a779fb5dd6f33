use anyhow::Result;
use axum::Router;
use clap::Parser;
use crawler::CrawlerConfig;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};
use server::build_app;
use textcore::{AnalysisOptions, IdfMode};
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Maximum number of URLs visited per request (soft limit)
    #[arg(long, default_value_t = 20)]
    max_visits: usize,
    /// Maximum number of fetches in flight per request
    #[arg(long, default_value_t = 5)]
    concurrency: usize,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// Use smoothed IDF = log10(1 + N/df)
    #[arg(long, default_value_t = false)]
    smoothed_idf: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let crawler = CrawlerConfig {
        max_visits: args.max_visits,
        concurrency: args.concurrency.max(1),
        timeout: Duration::from_secs(args.timeout_secs),
        ..Default::default()
    };
    let analysis = AnalysisOptions {
        idf: if args.smoothed_idf { IdfMode::Smoothed } else { IdfMode::Standard },
        ..Default::default()
    };
    let app: Router = build_app(crawler, analysis)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

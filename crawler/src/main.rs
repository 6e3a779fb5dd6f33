use anyhow::{anyhow, Result};
use clap::Parser;
use crawler::{Crawler, CrawlerConfig};
use serde::Serialize;
use sha1::{Digest, Sha1};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::time::Duration;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(about = "Crawl one host to JSONL, one record per page")]
struct Cli {
    /// URL to start from; only links on its host are followed
    #[arg(long)]
    seed: String,
    /// Output JSONL file path
    #[arg(long, default_value = "./sample_data/pages.jsonl")]
    output: String,
    /// Maximum number of URLs to visit (soft limit)
    #[arg(long, default_value_t = 20)]
    max_visits: usize,
    /// Maximum number of fetches in flight
    #[arg(long, default_value_t = 5)]
    concurrency: usize,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// User-Agent string sent with every request
    #[arg(long)]
    user_agent: Option<String>,
}

#[derive(Serialize)]
struct OutDoc<'a> {
    id: String,
    url: &'a str,
    title: &'a str,
    text_blocks: &'a [String],
    timestamp: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();
    if let Some(dir) = std::path::Path::new(&args.output).parent() {
        fs::create_dir_all(dir).ok();
    }

    let mut config = CrawlerConfig {
        max_visits: args.max_visits,
        concurrency: args.concurrency,
        timeout: Duration::from_secs(args.timeout_secs),
        ..Default::default()
    };
    if let Some(ua) = args.user_agent {
        config.user_agent = ua;
    }
    if config.concurrency == 0 {
        return Err(anyhow!("concurrency must be at least 1"));
    }

    let crawler = Crawler::with_http(config)?;
    let pages = crawler.crawl(&args.seed).await?;

    let mut out = BufWriter::new(File::create(&args.output)?);
    for page in &pages {
        let mut hasher = Sha1::new();
        hasher.update(page.url.as_str().as_bytes());
        let id = format!("{:x}", hasher.finalize());
        let ts = time::OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
        let rec = OutDoc { id, url: page.url.as_str(), title: &page.title, text_blocks: &page.text_blocks, timestamp: ts };
        serde_json::to_writer(&mut out, &rec)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    tracing::info!(emitted = pages.len(), output = %args.output, "done");
    Ok(())
}

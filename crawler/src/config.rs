use std::time::Duration;

/// Limits and client settings for one crawl.
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Soft ceiling on the number of URLs marked visited
    pub max_visits: usize,
    /// Maximum number of fetches in flight at once
    pub concurrency: usize,
    pub user_agent: String,
    pub timeout: Duration,
    /// Larger response bodies are rejected
    pub max_body_bytes: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_visits: 20,
            concurrency: 5,
            user_agent: format!("sitekw-crawler/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(12),
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

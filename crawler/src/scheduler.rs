use crate::config::CrawlerConfig;
use crate::error::{CrawlError, FetchError};
use crate::extract::extract;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::registry::VisitRegistry;
use std::sync::Arc;
use textcore::{normalize_url, NormalizedUrl, PageDocument};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Crawls the pages of a single host, at most once per normalized URL.
pub struct Crawler {
    config: CrawlerConfig,
    fetcher: Arc<dyn Fetcher>,
}

/// Pages collected by a crawl and every URL it claimed, including the ones
/// whose fetch or extraction failed.
#[derive(Debug, Default)]
pub struct CrawlReport {
    pub pages: Vec<PageDocument>,
    pub visited: Vec<NormalizedUrl>,
}

struct CrawlState {
    domain: Url,
    registry: VisitRegistry,
    permits: Semaphore,
    max_visits: usize,
    fetcher: Arc<dyn Fetcher>,
}

#[derive(Default)]
struct Visit {
    page: Option<PageDocument>,
    links: Vec<String>,
}

impl Crawler {
    pub fn new(config: CrawlerConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { config, fetcher }
    }

    pub fn with_http(config: CrawlerConfig) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::new(config, Arc::new(fetcher)))
    }

    pub fn config(&self) -> &CrawlerConfig { &self.config }

    pub async fn crawl(&self, seed: &str) -> Result<Vec<PageDocument>, CrawlError> {
        Ok(self.crawl_report(seed).await?.pages)
    }

    /// Every discovered link becomes its own task. Tasks queue on a semaphore
    /// of `concurrency` permits; the crawl ends once the task set drains.
    pub async fn crawl_report(&self, seed: &str) -> Result<CrawlReport, CrawlError> {
        normalize_url(seed)?;
        let domain = Url::parse(seed.trim()).map_err(|e| textcore::InvalidUrl {
            input: seed.to_string(),
            reason: e.to_string(),
        })?;
        tracing::info!(
            seed = %domain,
            max_visits = self.config.max_visits,
            concurrency = self.config.concurrency,
            "crawl started"
        );

        let state = Arc::new(CrawlState {
            domain,
            registry: VisitRegistry::new(),
            permits: Semaphore::new(self.config.concurrency.max(1)),
            max_visits: self.config.max_visits,
            fetcher: self.fetcher.clone(),
        });

        let mut tasks = JoinSet::new();
        tasks.spawn(visit_page(state.clone(), seed.trim().to_string()));
        let mut pages = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(visit) => {
                    for link in visit.links {
                        tasks.spawn(visit_page(state.clone(), link));
                    }
                    pages.extend(visit.page);
                }
                Err(e) => tracing::warn!(error = %e, "crawl task failed"),
            }
        }

        pages.sort_by(|a, b| a.url.cmp(&b.url));
        let visited = state.registry.snapshot();
        tracing::info!(pages = pages.len(), visited = visited.len(), "crawl finished");
        Ok(CrawlReport { pages, visited })
    }
}

/// Hrefs without a base are taken relative to the crawl's domain.
fn resolve(domain: &Url, raw: &str) -> Result<Url, url::ParseError> {
    match Url::parse(raw) {
        Err(url::ParseError::RelativeUrlWithoutBase) => domain.join(raw),
        other => other,
    }
}

async fn visit_page(state: Arc<CrawlState>, raw: String) -> Visit {
    let Ok(_permit) = state.permits.acquire().await else {
        return Visit::default();
    };
    if state.registry.len() >= state.max_visits {
        return Visit::default();
    }

    let url = match resolve(&state.domain, &raw) {
        Ok(u) => u,
        Err(e) => {
            tracing::debug!(href = %raw, error = %e, "unparseable link");
            return Visit::default();
        }
    };
    if !matches!(url.scheme(), "http" | "https") || url.host_str() != state.domain.host_str() {
        tracing::debug!(url = %url, "skipping off-site link");
        return Visit::default();
    }

    let key = NormalizedUrl::from(&url);
    if !state.registry.try_mark(&key) {
        return Visit::default();
    }

    tracing::info!(url = %url, "crawling");
    let html = match state.fetcher.fetch(&url).await {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "fetch failed");
            return Visit::default();
        }
    };
    match extract(&html) {
        Ok(page) => Visit {
            page: Some(PageDocument::new(key, page.title, page.text_blocks)),
            links: page.links,
        },
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "extraction failed");
            Visit::default()
        }
    }
}

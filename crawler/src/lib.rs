pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod registry;
pub mod scheduler;

pub use config::CrawlerConfig;
pub use error::{CrawlError, ExtractError, FetchError};
pub use extract::{extract, ExtractedPage};
pub use fetch::{Fetcher, HttpFetcher};
pub use registry::VisitRegistry;
pub use scheduler::{CrawlReport, Crawler};

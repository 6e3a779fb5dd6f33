use crate::config::CrawlerConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use url::Url;

/// Resolves a URL to the HTML it serves.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, max_body_bytes: config.max_body_bytes })
    }
}

fn is_html(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::DeadLink);
        }
        if status.is_client_error() {
            return Err(FetchError::ClientError(status.as_u16()));
        }
        if !status.is_success() {
            return Err(FetchError::ServerError(status.as_u16()));
        }
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !is_html(&content_type) {
            return Err(FetchError::UnsupportedContentType(content_type));
        }
        let bytes = resp.bytes().await?;
        if bytes.len() > self.max_body_bytes {
            return Err(FetchError::TooLarge(bytes.len()));
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

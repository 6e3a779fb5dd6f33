use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("dead link")]
    DeadLink,
    #[error("client error: HTTP {0}")]
    ClientError(u16),
    #[error("unexpected status: HTTP {0}")]
    ServerError(u16),
    #[error("content type not html: {0:?}")]
    UnsupportedContentType(String),
    #[error("body too large: {0} bytes")]
    TooLarge(usize),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    InvalidUrl(#[from] textcore::InvalidUrl),
}

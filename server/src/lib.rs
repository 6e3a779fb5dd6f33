use anyhow::Result;
use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use crawler::{CrawlError, Crawler, CrawlerConfig, Fetcher, HttpFetcher};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use textcore::{analyze_corpus, AnalysisOptions, DocumentReport};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct DataRequest {
    pub url: String,
    /// Lower the server's visit budget for this request
    #[serde(default)]
    pub max_visits: Option<usize>,
}

#[derive(Serialize)]
pub struct DataResponse {
    pub url: String,
    pub took_s: f64,
    pub pages: usize,
    pub documents: Vec<DocumentReport>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, msg: impl ToString) -> ApiError {
    let error = msg.to_string();
    tracing::warn!(%status, %error, "request failed");
    (status, Json(ErrorResponse { error }))
}

#[derive(Clone)]
pub struct AppState {
    pub crawler: CrawlerConfig,
    pub analysis: AnalysisOptions,
    pub fetcher: Arc<dyn Fetcher>,
}

pub fn build_app(crawler: CrawlerConfig, analysis: AnalysisOptions) -> Result<Router> {
    let fetcher = Arc::new(HttpFetcher::new(&crawler)?);
    Ok(build_app_with_state(AppState { crawler, analysis, fetcher }))
}

pub fn build_app_with_state(state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/data", post(data_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Crawls the requested site, then extracts keywords and TF-IDF weights for every page.
pub async fn data_handler(State(state): State<AppState>, Json(req): Json<DataRequest>) -> Result<Json<DataResponse>, ApiError> {
    let start = std::time::Instant::now();
    let mut config = state.crawler.clone();
    if let Some(n) = req.max_visits {
        config.max_visits = config.max_visits.min(n);
    }

    let crawler = Crawler::new(config, state.fetcher.clone());
    let pages = crawler.crawl(&req.url).await.map_err(|e| match e {
        CrawlError::InvalidUrl(_) => api_error(StatusCode::BAD_REQUEST, e),
    })?;
    let num_pages = pages.len();

    let analysis = state.analysis;
    let documents = tokio::task::spawn_blocking(move || analyze_corpus(&pages, &analysis))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    let elapsed = start.elapsed();
    tracing::info!(url = %req.url, pages = num_pages, documents = documents.len(), "crawl analyzed");
    Ok(Json(DataResponse { url: req.url, took_s: elapsed.as_secs_f64(), pages: num_pages, documents }))
}

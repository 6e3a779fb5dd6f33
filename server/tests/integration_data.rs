use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use crawler::{CrawlerConfig, FetchError, Fetcher};
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use textcore::AnalysisOptions;
use tower::ServiceExt;
use url::Url;

/// Serves a fixed set of pages keyed by path.
struct StaticSite(HashMap<&'static str, &'static str>);

#[async_trait]
impl Fetcher for StaticSite {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let path = match url.path().trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        self.0.get(path).map(|s| s.to_string()).ok_or(FetchError::DeadLink)
    }
}

fn test_app() -> Router {
    let site = StaticSite(HashMap::from([
        (
            "/",
            r#"<html><head><title>home</title></head><body>
               <p>Compatibility of systems of linear constraints over the set of natural numbers.</p>
               <a href="/pricing">pricing</a></body></html>"#,
        ),
        (
            "/pricing",
            r#"<html><head><title>pricing</title></head><body>
               <h1>Cloud storage pricing</h1><p>The monthly bill is sent by email.</p></body></html>"#,
        ),
    ]));
    server::build_app_with_state(server::AppState {
        crawler: CrawlerConfig::default(),
        analysis: AnalysisOptions::default(),
        fetcher: Arc::new(site),
    })
}

async fn call(app: Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

fn post_json(body: &str) -> Request<Body> {
    Request::post("/api/data")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = call(test_app(), Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn data_returns_keywords_for_every_page() {
    let (status, body) = call(test_app(), post_json(r#"{"url":"https://site.test/"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["url"], "https://site.test/");
    assert_eq!(json["pages"], 2);

    let docs = json["documents"].as_array().unwrap();
    let urls: Vec<&str> = docs.iter().map(|d| d["url"].as_str().unwrap()).collect();
    assert_eq!(urls, vec!["site.test", "site.test/pricing"]);
    let home_keywords = docs[0]["keywords"].as_array().unwrap();
    assert!(home_keywords.iter().any(|k| k == "linear constraints"));
    assert!(!docs[1]["tfidf"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn max_visits_limits_the_crawl() {
    let (status, body) = call(test_app(), post_json(r#"{"url":"https://site.test/","max_visits":1}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["pages"], 1);
}

#[tokio::test]
async fn invalid_url_is_a_bad_request() {
    let (status, body) = call(test_app(), post_json(r#"{"url":"not a url"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("not a url"));
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (status, _) = call(test_app(), post_json(r#"{"address":1}"#)).await;
    assert!(status.is_client_error());
}

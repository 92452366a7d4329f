//! In-process test harness: the full router over a memory store and a mock
//! fetcher, driven with `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use extraction::{MockFetcher, ProductExtractor, UrlValidator, ValidatedFetcher};
use serde_json::Value;
use server_core::domains::lists::ListService;
use server_core::server::{build_app, AppState};
use server_core::store::MemoryKvStore;
use server_core::DEFAULT_LIST_TTL_DAYS;
use tower::ServiceExt;

/// Host the mock fetcher serves; allowed through the URL validator without DNS.
pub const SHOP_HOST: &str = "shop.test";

pub struct TestApp {
    pub router: Router,
    pub fetcher: MockFetcher,
    pub store: Arc<MemoryKvStore>,
}

#[allow(dead_code)]
impl TestApp {
    pub fn new() -> Self {
        Self::with_fetcher(MockFetcher::new())
    }

    pub fn with_fetcher(fetcher: MockFetcher) -> Self {
        Self::build(fetcher, Duration::from_secs(DEFAULT_LIST_TTL_DAYS * 24 * 60 * 60))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::build(MockFetcher::new(), ttl)
    }

    fn build(fetcher: MockFetcher, ttl: Duration) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let store = Arc::new(MemoryKvStore::new());
        let lists = ListService::new(store.clone(), ttl);

        // Production validation rules, plus the fixture host
        let validator = UrlValidator::new().allow_host(SHOP_HOST);
        let extractor = ProductExtractor::with_fetcher(ValidatedFetcher::with_validator(
            fetcher.clone(),
            validator,
        ));

        let router = build_app(AppState::new(lists, extractor), &[]);

        Self {
            router,
            fetcher,
            store,
        }
    }

    /// Send a request with an optional JSON body; returns status and parsed body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let body = body.map(|json| json.to_string());
        self.raw_request(method, uri, body).await
    }

    /// Send a request with an arbitrary JSON-typed body.
    pub async fn raw_request(
        &self,
        method: Method,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(text) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(text)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Create a list and return its id.
    pub async fn create_list(&self, owner: &str, password: Option<&str>) -> String {
        let mut body = serde_json::json!({ "owner": owner, "birthday": "2025-03-14" });
        if let Some(password) = password {
            body["password"] = Value::from(password);
        }

        let (status, json) = self.post("/api/list", body).await;
        assert_eq!(status, StatusCode::OK, "create failed: {}", json);
        json["data"]["id"].as_str().unwrap().to_string()
    }
}

/// A minimal product page with OpenGraph tags and a price meta tag.
pub fn product_page(title: &str, price: &str) -> String {
    format!(
        r#"<html><head>
            <meta property="og:title" content="{title}">
            <meta property="og:image" content="/images/product.jpg">
            <meta property="og:site_name" content="Test Shop">
            <meta property="product:price:amount" content="{price}">
        </head><body></body></html>"#
    )
}

//! WishPocket API client.
//!
//! Talks to the WishPocket HTTP API and falls back to a local JSON file when
//! the backend is unreachable, so lists can still be created and edited
//! offline.
//!
//! # Example
//!
//! ```rust,ignore
//! use wishpocket_client::{CreateListRequest, LocalDb, WishPocketClient};
//!
//! let client = WishPocketClient::new("http://localhost:8080/api", LocalDb::new(LocalDb::default_path()?))?;
//! let list = client
//!     .create_list(&CreateListRequest { owner: "지우".into(), birthday: "2025-03-14".into(), password: None })
//!     .await?;
//! println!("{}", share_link("http://localhost:5173", &list.id));
//! ```

pub mod error;
pub mod local;
pub mod types;

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

pub use error::{ClientError, LocalDbError, Result};
pub use local::{LocalDb, LOCAL_DB_FILE};
pub use types::{CreateListRequest, ListPatch, ScrapedData, WishItem, WishList};

use types::{AddItemRequest, ApiResponse};

pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

pub const DEMO_TITLE: &str = "상품 정보를 가져올 수 없습니다 (Demo Mode)";
pub const DEMO_IMAGE: &str = "https://via.placeholder.com/150?text=No+Image";
const DEMO_DESCRIPTION: &str =
    "백엔드 서버가 연결되지 않았거나 차단되었습니다. URL을 직접 입력해보세요.";

/// Viewer link for a list.
pub fn share_link(share_base: &str, id: &str) -> String {
    format!("{}/#/view/{}", share_base.trim_end_matches('/'), id)
}

/// Editor link for a list.
pub fn edit_link(share_base: &str, id: &str) -> String {
    format!("{}/#/edit/{}", share_base.trim_end_matches('/'), id)
}

/// Placeholder record used when the scrape endpoint cannot be reached.
pub fn demo_record(url: &str) -> ScrapedData {
    let host = Url::parse(url)
        .or_else(|_| Url::parse(&format!("https://{}", url.trim())))
        .ok()
        .and_then(|u| u.host_str().map(String::from))
        .unwrap_or_default();

    ScrapedData {
        title: DEMO_TITLE.to_string(),
        image: DEMO_IMAGE.to_string(),
        price: "0".to_string(),
        description: DEMO_DESCRIPTION.to_string(),
        site_name: host,
        url: url.to_string(),
    }
}

pub struct WishPocketClient {
    http: reqwest::Client,
    api_base: String,
    local: LocalDb,
}

impl WishPocketClient {
    pub fn new(api_base: impl Into<String>, local: LocalDb) -> Result<Self> {
        Self::with_timeout(api_base, local, DEFAULT_TIMEOUT)
    }

    /// `timeout` bounds each request end to end.
    pub fn with_timeout(
        api_base: impl Into<String>,
        local: LocalDb,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            local,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn local(&self) -> &LocalDb {
        &self.local
    }

    /// Extract product data for `url`. Never fails: any error yields
    /// [`demo_record`].
    pub async fn scrape_url(&self, url: &str) -> ScrapedData {
        match self.try_scrape_url(url).await {
            Ok(data) => data,
            Err(e) => {
                warn!(url, error = %e, "Scraping failed, falling back to demo data");
                demo_record(url)
            }
        }
    }

    /// Extract product data for `url`, surfacing errors.
    pub async fn try_scrape_url(&self, url: &str) -> Result<ScrapedData> {
        let request = self
            .http
            .post(self.endpoint("/scrape"))
            .json(&serde_json::json!({ "url": url }));
        self.send_for_data(request).await
    }

    pub async fn create_list(&self, request: &CreateListRequest) -> Result<WishList> {
        let result = self
            .send_for_data(self.http.post(self.endpoint("/list")).json(request))
            .await;

        match result {
            Err(e) if e.is_unavailable() => {
                warn!(error = %e, "API unavailable, creating list locally");
                Ok(self.local.create(request)?)
            }
            other => other,
        }
    }

    /// Fetch a list. A 404 from the server is final; the local copy is only
    /// consulted when the server is unavailable.
    pub async fn get_list(&self, id: &str) -> Result<WishList> {
        let result = self
            .send_for_data(self.http.get(self.list_endpoint(id, "")))
            .await;

        match result.map_err(|e| not_found(e, id)) {
            Err(e) if e.is_unavailable() => {
                warn!(list_id = id, error = %e, "API unavailable, reading list locally");
                self.local
                    .get(id)
                    .ok_or_else(|| ClientError::NotFound(id.to_string()))
            }
            other => other,
        }
    }

    pub async fn update_list(&self, id: &str, patch: ListPatch) -> Result<WishList> {
        let result = self
            .send_for_data(self.http.patch(self.list_endpoint(id, "")).json(&patch))
            .await;

        match result.map_err(|e| not_found(e, id)) {
            Err(e) if e.is_unavailable() => {
                warn!(list_id = id, error = %e, "API unavailable, updating list locally");
                self.local
                    .update(id, patch)?
                    .ok_or_else(|| ClientError::NotFound(id.to_string()))
            }
            other => other,
        }
    }

    /// Delete on the server (best effort) and drop the local copy.
    pub async fn delete_list(&self, id: &str) -> Result<()> {
        let result = self
            .send::<serde_json::Value>(self.http.delete(self.list_endpoint(id, "")))
            .await;
        if let Err(e) = result {
            warn!(list_id = id, error = %e, "Server delete failed");
        }

        if self.local.remove(id)? {
            debug!(list_id = id, "Removed local copy");
        }
        Ok(())
    }

    /// Add a product by URL. The server extracts it; offline, the item is
    /// built from [`scrape_url`](Self::scrape_url) and appended locally.
    pub async fn add_item(
        &self,
        id: &str,
        url: &str,
        comment: Option<&str>,
        priority: Option<u8>,
    ) -> Result<WishList> {
        let body = AddItemRequest {
            url,
            comment,
            priority,
        };
        let result = self
            .send_for_data(self.http.post(self.list_endpoint(id, "/items")).json(&body))
            .await;

        match result.map_err(|e| not_found(e, id)) {
            Err(e) if e.is_unavailable() => {
                warn!(list_id = id, error = %e, "API unavailable, adding item locally");
                let mut list = self
                    .local
                    .get(id)
                    .ok_or_else(|| ClientError::NotFound(id.to_string()))?;

                let data = self.scrape_url(url).await;
                list.items
                    .push(WishItem::from_scraped(data, comment.map(String::from), priority));
                self.local
                    .update(id, ListPatch::items(list.items))?
                    .ok_or_else(|| ClientError::NotFound(id.to_string()))
            }
            other => other,
        }
    }

    pub async fn remove_item(&self, id: &str, item_id: &str) -> Result<WishList> {
        let path = format!("/items/{}", item_id);
        let result = self
            .send_for_data(self.http.delete(self.list_endpoint(id, &path)))
            .await;

        match result.map_err(|e| not_found(e, id)) {
            Err(e) if e.is_unavailable() => {
                warn!(list_id = id, error = %e, "API unavailable, removing item locally");
                let mut list = self
                    .local
                    .get(id)
                    .ok_or_else(|| ClientError::NotFound(id.to_string()))?;

                list.items.retain(|item| item.id != item_id);
                self.local
                    .update(id, ListPatch::items(list.items))?
                    .ok_or_else(|| ClientError::NotFound(id.to_string()))
            }
            other => other,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn list_endpoint(&self, id: &str, suffix: &str) -> String {
        format!("{}/list/{}{}", self.api_base, id, suffix)
    }

    async fn send_for_data<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.send(request)
            .await?
            .ok_or_else(|| ClientError::InvalidResponse {
                status: StatusCode::OK.as_u16(),
                detail: "response has no data".to_string(),
            })
    }

    /// Send a request and unwrap the `{ success, data, error }` envelope.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>> {
        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        let envelope: ApiResponse<T> =
            serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse {
                status: status.as_u16(),
                detail: e.to_string(),
            })?;

        if status.is_success() && envelope.success {
            return Ok(envelope.data);
        }

        Err(ClientError::Api {
            status: status.as_u16(),
            message: envelope
                .error
                .unwrap_or_else(|| format!("Server error: {}", status)),
        })
    }
}

fn not_found(err: ClientError, id: &str) -> ClientError {
    match err {
        ClientError::Api { status: 404, .. } => ClientError::NotFound(id.to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_use_hash_routes() {
        assert_eq!(
            share_link("https://wish.example/", "abc"),
            "https://wish.example/#/view/abc"
        );
        assert_eq!(
            edit_link("https://wish.example", "abc"),
            "https://wish.example/#/edit/abc"
        );
    }

    #[test]
    fn demo_record_keeps_url_and_host() {
        let record = demo_record("https://smartstore.naver.com/shop/products/1");
        assert_eq!(record.title, DEMO_TITLE);
        assert_eq!(record.price, "0");
        assert_eq!(record.site_name, "smartstore.naver.com");
        assert_eq!(record.url, "https://smartstore.naver.com/shop/products/1");

        assert_eq!(demo_record("ohou.se/productions/1").site_name, "ohou.se");
    }

    #[test]
    fn unavailability_classification() {
        assert!(ClientError::InvalidResponse {
            status: 200,
            detail: "html".into()
        }
        .is_unavailable());
        assert!(ClientError::Api {
            status: 503,
            message: "down".into()
        }
        .is_unavailable());
        assert!(!ClientError::Api {
            status: 400,
            message: "Missing required fields".into()
        }
        .is_unavailable());
        assert!(!ClientError::NotFound("x".into()).is_unavailable());
    }

    #[test]
    fn not_found_only_maps_404() {
        let err = not_found(
            ClientError::Api {
                status: 404,
                message: "List not found".into(),
            },
            "abc",
        );
        assert!(matches!(err, ClientError::NotFound(id) if id == "abc"));

        let err = not_found(
            ClientError::Api {
                status: 400,
                message: "bad".into(),
            },
            "abc",
        );
        assert!(matches!(err, ClientError::Api { status: 400, .. }));
    }
}

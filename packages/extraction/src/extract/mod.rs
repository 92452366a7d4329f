//! Product extraction pipeline.
//!
//! Order of precedence for each field:
//!
//! 1. OpenGraph tags (title, image, description, site name)
//! 2. JSON-LD `Product` data (title, image, price), overriding OpenGraph
//! 3. Per-site selectors for Naver, Musinsa and Ohouse, only for empty fields
//! 4. Cleanup: digits-only price, trimmed text, absolute image, URL-derived title

mod cleanup;
mod html;
mod json_ld;
mod opengraph;
mod sites;

use std::sync::Arc;

use scraper::Html;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ExtractionError, FetchError, Result};
use crate::fetch::PageFetcher;
use crate::types::{FetchedPage, ScrapedData};

pub use cleanup::{clean_price, title_from_url};
pub use json_ld::ProductLd;
pub use opengraph::OpenGraph;
pub use sites::Platform;

/// Fetches product pages and turns them into [`ScrapedData`].
#[derive(Clone)]
pub struct ProductExtractor {
    fetcher: Arc<dyn PageFetcher>,
}

impl ProductExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    pub fn with_fetcher(fetcher: impl PageFetcher + 'static) -> Self {
        Self::new(Arc::new(fetcher))
    }

    /// Fetch `url` and extract a product record.
    ///
    /// A non-2xx response is returned as `FetchError::Status`. Nothing is retried.
    pub async fn extract(&self, url: &str) -> Result<ScrapedData> {
        let url = normalize_url(url)?;
        debug!(url = %url, fetcher = self.fetcher.name(), "Extracting product page");

        let page = self.fetcher.fetch(&url).await?;
        let record = extract_page(&url, &page);

        info!(
            url = %url,
            site = %record.site_name,
            has_price = !record.price.is_empty(),
            has_image = !record.image.is_empty(),
            "Product extracted"
        );

        Ok(record)
    }

    /// Like [`extract`](Self::extract), but never fails: any error yields
    /// [`fallback_record`] for the original URL.
    pub async fn extract_or_fallback(&self, url: &str) -> ScrapedData {
        match self.extract(url).await {
            Ok(record) => record,
            Err(e) => {
                warn!(url = %url, error = %e, "Extraction failed, using fallback record");
                fallback_record(url)
            }
        }
    }
}

/// Prepend `https://` when the input has no scheme, then parse.
pub fn normalize_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ExtractionError::MissingUrl);
    }

    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    Url::parse(&candidate)
        .map(|u| u.to_string())
        .map_err(|_| FetchError::InvalidUrl { url: raw.to_string() }.into())
}

/// Record returned when a page could not be fetched.
///
/// Keeps the original URL so the item still links somewhere useful.
pub fn fallback_record(url: &str) -> ScrapedData {
    let parsed = normalize_url(url).ok().and_then(|u| Url::parse(&u).ok());

    let (title, site_name) = match &parsed {
        Some(u) => (
            title_from_url(u),
            u.host_str().unwrap_or_default().to_string(),
        ),
        None => (url.trim().to_string(), String::new()),
    };

    ScrapedData {
        title,
        image: String::new(),
        price: "0".to_string(),
        description: String::new(),
        site_name,
        url: url.to_string(),
    }
}

/// Extract a record from HTML that was served at `url`.
pub fn extract_from_html(url: &str, html: &str) -> ScrapedData {
    extract_page(url, &FetchedPage::new(url, html))
}

/// Extract from a fetched page. `url` is the requested URL and is what the
/// record reports; the page's final URL drives site detection.
fn extract_page(url: &str, page: &FetchedPage) -> ScrapedData {
    let document = Html::parse_document(&page.html);
    let page_url = Url::parse(&page.url).or_else(|_| Url::parse(url)).ok();

    // 1. OpenGraph defaults
    let og = OpenGraph::read(&document);
    let mut record = ScrapedData {
        title: og.title.unwrap_or_default(),
        image: og.image.unwrap_or_default(),
        price: String::new(),
        description: og.description.unwrap_or_default(),
        site_name: og
            .site_name
            .or_else(|| page_url.as_ref().and_then(|u| u.host_str().map(String::from)))
            .unwrap_or_default(),
        url: url.to_string(),
    };

    // 2. JSON-LD wins over OpenGraph
    let product = ProductLd::read(&document);
    if let Some(name) = product.name {
        record.title = name;
    }
    if let Some(image) = product.image {
        record.image = image;
    }
    if let Some(price) = product.price {
        record.price = price;
    }

    // 3. Site fallbacks
    if let Some(platform) = page_url.as_ref().and_then(Platform::detect) {
        debug!(url = %url, platform = ?platform, "Applying site selectors");
        platform.apply(&document, &mut record);
    }
    if record.price.trim().is_empty() {
        if let Some(amount) = html::meta_property(&document, "product:price:amount") {
            record.price = amount;
        }
    }

    // 4. Cleanup
    record.price = clean_price(&record.price);
    record.title = record.title.trim().to_string();
    record.description = record.description.trim().to_string();
    if let Some(page_url) = &page_url {
        record.image = cleanup::resolve_image(page_url, &record.image);
        if record.title.is_empty() {
            record.title = title_from_url(page_url);
        }
    } else {
        record.image = record.image.trim().to_string();
    }

    record
}

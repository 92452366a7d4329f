//! Product Page Extraction Library
//!
//! Turns a product page URL into a normalized [`ScrapedData`] record
//! (title, image, price, description, site name) using OpenGraph tags,
//! embedded JSON-LD, and per-site selectors for Naver Shopping, Musinsa and
//! Ohouse.
//!
//! # Usage
//!
//! ```rust,ignore
//! use extraction::{ProductExtractor, UrlValidator, ValidatedFetcher};
//!
//! let fetcher = ValidatedFetcher::http(UrlValidator::new(), None)?;
//! let extractor = ProductExtractor::with_fetcher(fetcher);
//!
//! let product = extractor.extract("https://www.musinsa.com/app/goods/1234567").await?;
//! println!("{} - {}원", product.title, product.price);
//! ```
//!
//! # Modules
//!
//! - [`extract`] - The extraction pipeline and its pure helpers
//! - [`fetch`] - Page fetchers (HTTP, SSRF-validated, mock)
//! - [`security`] - SSRF protection
//! - [`types`] - Output types

pub mod error;
pub mod extract;
pub mod fetch;
pub mod security;
pub mod types;

pub use error::{ExtractionError, FetchError, SecurityError};
pub use extract::{
    clean_price, extract_from_html, fallback_record, normalize_url, title_from_url, Platform,
    ProductExtractor,
};
pub use fetch::{HttpFetcher, MockFetcher, PageFetcher, ValidatedFetcher};
pub use security::UrlValidator;
pub use types::{FetchedPage, ScrapedData};

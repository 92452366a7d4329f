//! Extraction output types.

use serde::{Deserialize, Serialize};

/// Normalized product record derived from a product page.
///
/// Transient: it is never stored on its own, only wrapped into a wishlist
/// item by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedData {
    pub title: String,
    pub image: String,
    /// Digits only (e.g. `"12900"`), empty when no price was found.
    pub price: String,
    pub description: String,
    pub site_name: String,
    pub url: String,
}

/// A fetched page, after redirects.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,

    /// Raw HTML body
    pub html: String,

    /// HTTP status code
    pub status: u16,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            status: 200,
        }
    }
}

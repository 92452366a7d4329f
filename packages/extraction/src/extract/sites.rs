//! Per-site fallback selectors.
//!
//! Applied after OpenGraph and JSON-LD, and only to fields that are still
//! empty. The site name is always replaced with the platform label.

use scraper::Html;
use url::Url;

use super::html;
use crate::types::ScrapedData;

/// Shops with dedicated selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Naver Shopping / SmartStore
    Naver,
    Musinsa,
    /// Ohouse (오늘의집)
    Ohouse,
}

impl Platform {
    /// Detect the platform from the page host.
    pub fn detect(url: &Url) -> Option<Self> {
        let host = url.host_str()?.to_ascii_lowercase();
        let on = |domain: &str| host == domain || host.ends_with(&format!(".{}", domain));

        if on("naver.com") {
            Some(Platform::Naver)
        } else if on("musinsa.com") {
            Some(Platform::Musinsa)
        } else if on("ohou.se") {
            Some(Platform::Ohouse)
        } else {
            None
        }
    }

    /// Fill empty fields from site-specific markup.
    pub fn apply(self, document: &Html, record: &mut ScrapedData) {
        match self {
            Platform::Naver => {
                fill(&mut record.price, || {
                    first_text(document, &["._22kNQuEXmb", "span.lowest_price", ".price_num"])
                });
                record.site_name = "Naver Shopping".to_string();
            }
            Platform::Musinsa => {
                fill(&mut record.price, || {
                    first_text(document, &["#goods_price", ".product_article_price"])
                        .or_else(|| html::meta_property(document, "product:price:amount"))
                });
                record.site_name =
                    match html::text(document, ".product_info_head .item_categories a") {
                        Some(brand) => format!("Musinsa ({})", brand),
                        None => "Musinsa".to_string(),
                    };
            }
            Platform::Ohouse => {
                fill(&mut record.title, || {
                    html::text(document, ".production-selling-header__title__name")
                });
                fill(&mut record.price, || {
                    html::text(
                        document,
                        ".production-selling-header__price__price .number",
                    )
                });
                record.site_name = "오늘의집".to_string();
            }
        }
    }
}

fn fill(field: &mut String, source: impl FnOnce() -> Option<String>) {
    if field.trim().is_empty() {
        if let Some(value) = source() {
            *field = value;
        }
    }
}

fn first_text(document: &Html, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|css| html::text(document, css))
}

//! OpenGraph defaults.

use scraper::Html;

use super::html;

/// Preview metadata read from OpenGraph tags, with plain-HTML fallbacks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OpenGraph {
    pub title: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub site_name: Option<String>,
}

impl OpenGraph {
    pub fn read(document: &Html) -> Self {
        Self {
            title: html::meta_property(document, "og:title")
                .or_else(|| html::text(document, "title")),
            image: html::meta_property(document, "og:image")
                .or_else(|| html::meta_name(document, "twitter:image")),
            description: html::meta_property(document, "og:description")
                .or_else(|| html::meta_name(document, "description")),
            site_name: html::meta_property(document, "og:site_name"),
        }
    }
}

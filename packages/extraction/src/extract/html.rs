//! Small CSS-selector helpers over a parsed document.

use scraper::{Html, Selector};

/// First non-empty value of `attr` among elements matching `css`.
pub(crate) fn attr(document: &Html, css: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(String::from)
}

/// Trimmed text of the first element matching `css` that has any text.
pub(crate) fn text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|t| !t.is_empty())
}

/// `content` of a `<meta property=...>` tag.
pub(crate) fn meta_property(document: &Html, property: &str) -> Option<String> {
    attr(
        document,
        &format!(r#"meta[property="{}"]"#, property),
        "content",
    )
}

/// `content` of a `<meta name=...>` tag.
pub(crate) fn meta_name(document: &Html, name: &str) -> Option<String> {
    attr(document, &format!(r#"meta[name="{}"]"#, name), "content")
}

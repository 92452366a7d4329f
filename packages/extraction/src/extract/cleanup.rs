//! Final normalisation of an extracted record.

use percent_encoding::percent_decode_str;
use url::Url;

/// Keep only the integer digits of a price.
///
/// A trailing one- or two-digit decimal fraction (`"12900.00"`, `"₩8,900.5"`)
/// is dropped first so it does not get glued onto the integer part.
pub fn clean_price(raw: &str) -> String {
    let integral = match raw.rfind('.') {
        Some(dot) if is_fraction(&raw[dot + 1..]) => &raw[..dot],
        _ => raw,
    };

    integral.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn is_fraction(tail: &str) -> bool {
    let digits = tail.chars().take_while(|c| c.is_ascii_digit()).count();
    (1..=2).contains(&digits) && !tail[digits..].chars().any(|c| c.is_ascii_digit())
}

/// Derive a readable title from the URL path, else the host.
pub fn title_from_url(url: &Url) -> String {
    let from_path = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(|segment| {
            percent_decode_str(segment)
                .decode_utf8_lossy()
                .replace(['-', '_', '+'], " ")
                .trim()
                .to_string()
        })
        .filter(|t| !t.is_empty());

    from_path.unwrap_or_else(|| url.host_str().unwrap_or_default().to_string())
}

/// Resolve a possibly relative image URL against the page URL.
pub fn resolve_image(page_url: &Url, image: &str) -> String {
    let image = image.trim();
    if image.is_empty() {
        return String::new();
    }
    page_url
        .join(image)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| image.to_string())
}

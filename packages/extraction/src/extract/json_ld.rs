//! Embedded JSON-LD product data.
//!
//! Shops emit `schema.org/Product` in many shapes: a bare object, an array of
//! objects, or a `@graph` container, with `image` and `offers` as either single
//! values or arrays. Each `<script>` block is parsed on its own so a malformed
//! block never hides a good one.

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

/// Product fields found in JSON-LD. The first block that sets a field wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProductLd {
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
}

impl ProductLd {
    pub fn read(document: &Html) -> Self {
        let mut product = Self::default();

        let selector = match Selector::parse(r#"script[type="application/ld+json"]"#) {
            Ok(s) => s,
            Err(_) => return product,
        };

        for (index, script) in document.select(&selector).enumerate() {
            let raw = script.text().collect::<String>();
            let value: Value = match serde_json::from_str(raw.trim()) {
                Ok(v) => v,
                Err(e) => {
                    debug!(block = index, error = %e, "Skipping malformed JSON-LD block");
                    continue;
                }
            };

            let mut nodes = Vec::new();
            collect_products(&value, &mut nodes);
            for node in nodes {
                product.merge_node(node);
            }
        }

        product
    }

    fn merge_node(&mut self, node: &Value) {
        if self.name.is_none() {
            self.name = node.get("name").and_then(non_empty_string);
        }
        if self.image.is_none() {
            self.image = node.get("image").and_then(image_url);
        }
        if self.price.is_none() {
            self.price = node.get("offers").and_then(offer_price);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.image.is_none() && self.price.is_none()
    }
}

fn collect_products<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_products(item, out);
            }
        }
        Value::Object(map) => {
            if is_product(value) {
                out.push(value);
            }
            if let Some(graph) = map.get("@graph") {
                collect_products(graph, out);
            }
        }
        _ => {}
    }
}

fn is_product(node: &Value) -> bool {
    let is_product_type = |t: &str| t == "Product" || t == "ProductGroup";
    match node.get("@type") {
        Some(Value::String(t)) => is_product_type(t),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(is_product_type),
        _ => false,
    }
}

fn non_empty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn image_url(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => non_empty_string(value),
        Value::Array(items) => items.iter().find_map(image_url),
        Value::Object(map) => map
            .get("url")
            .or_else(|| map.get("contentUrl"))
            .and_then(non_empty_string),
        _ => None,
    }
}

fn offer_price(value: &Value) -> Option<String> {
    match value {
        Value::Array(offers) => offers.iter().find_map(offer_price),
        Value::Object(map) => map
            .get("price")
            .or_else(|| map.get("lowPrice"))
            .and_then(scalar_string),
        _ => None,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => non_empty_string(value),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

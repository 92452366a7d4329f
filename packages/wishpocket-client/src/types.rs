use serde::{Deserialize, Serialize};

/// Standard API envelope: `{ success, data?, error? }`.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Product data returned by `POST /scrape`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

impl WishItem {
    pub fn from_scraped(data: ScrapedData, comment: Option<String>, priority: Option<u8>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: data.title,
            image: data.image,
            price: data.price,
            description: data.description,
            site_name: data.site_name,
            url: data.url,
            comment: comment.filter(|c| !c.trim().is_empty()),
            priority,
        }
    }

    pub fn is_high_priority(&self) -> bool {
        self.priority == Some(1)
    }
}

/// A wishlist. Server responses never carry `password`; lists created by the
/// local fallback keep it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishList {
    pub id: String,
    pub owner: String,
    pub birthday: String,
    #[serde(default)]
    pub items: Vec<WishItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    pub owner: String,
    pub birthday: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Partial update; only the fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<WishItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ListPatch {
    pub fn items(items: Vec<WishItem>) -> Self {
        Self {
            items: Some(items),
            ..Default::default()
        }
    }

    /// Apply this patch to `list` in place.
    pub fn apply_to(self, list: &mut WishList) {
        if let Some(owner) = self.owner {
            list.owner = owner;
        }
        if let Some(birthday) = self.birthday {
            list.birthday = birthday;
        }
        if let Some(items) = self.items {
            list.items = items;
        }
        if let Some(password) = self.password {
            list.password = Some(password).filter(|p| !p.is_empty());
        }
    }
}

/// Body of `POST /list/{id}/items`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct AddItemRequest<'a> {
    pub url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

use extraction::ScrapedData;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product saved to a wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    /// Digits only
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
    /// 0 = normal, 1 = high
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

impl WishItem {
    /// Wrap an extraction result into a new item with a fresh id.
    pub fn from_scraped(data: ScrapedData, comment: Option<String>, priority: Option<u8>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
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
}

/// Stored wishlist record, including the password.
///
/// Never serialized into a response; convert with [`WishList::into_public`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishList {
    pub id: String,
    pub owner: String,
    /// YYYY-MM-DD
    pub birthday: String,
    #[serde(default)]
    pub items: Vec<WishItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Epoch milliseconds
    pub created_at: i64,
}

impl WishList {
    pub fn into_public(self) -> PublicWishList {
        PublicWishList {
            id: self.id,
            owner: self.owner,
            birthday: self.birthday,
            items: self.items,
            created_at: self.created_at,
        }
    }
}

/// Wishlist as returned to clients: no password field at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicWishList {
    pub id: String,
    pub owner: String,
    pub birthday: String,
    pub items: Vec<WishItem>,
    pub created_at: i64,
}

/// Body of `POST /api/list`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub birthday: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Body of `PATCH /api/list/{id}`. Absent fields are left untouched;
/// `id` and `createdAt` are ignored if sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPatch {
    pub owner: Option<String>,
    pub birthday: Option<String>,
    pub items: Option<Vec<WishItem>>,
    pub password: Option<String>,
}

/// Body of `POST /api/wishlist`: a full record, with or without an id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertListRequest {
    pub id: Option<String>,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub birthday: String,
    #[serde(default)]
    pub items: Vec<WishItem>,
    pub password: Option<String>,
    pub created_at: Option<i64>,
}

/// Body of `POST /api/list/{id}/items`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    #[serde(default)]
    pub url: String,
    pub comment: Option<String>,
    pub priority: Option<u8>,
}

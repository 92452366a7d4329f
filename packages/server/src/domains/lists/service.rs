//! Wishlist persistence on top of a [`KvStore`].
//!
//! Records are stored as JSON under `list:{id}` and every write refreshes the
//! TTL. There is no concurrency control: concurrent writers overwrite each
//! other (last write wins).

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use extraction::ProductExtractor;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::models::{
    AddItemRequest, CreateListRequest, ListPatch, PublicWishList, UpsertListRequest, WishItem,
    WishList,
};
use crate::store::{KvStore, StoreError};

#[derive(Debug, Error)]
pub enum ListError {
    #[error("List not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("corrupt list record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type ListResult<T> = std::result::Result<T, ListError>;

pub struct ListService {
    store: Arc<dyn KvStore>,
    ttl: Duration,
}

impl ListService {
    pub fn new(store: Arc<dyn KvStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    /// Create a new, empty list.
    pub async fn create(&self, request: CreateListRequest) -> ListResult<PublicWishList> {
        let owner = request.owner.trim();
        let birthday = request.birthday.trim();
        if owner.is_empty() || birthday.is_empty() {
            return Err(ListError::Validation("Missing required fields".into()));
        }
        validate_birthday(birthday)?;

        let list = WishList {
            id: Uuid::new_v4().to_string(),
            owner: owner.to_string(),
            birthday: birthday.to_string(),
            items: Vec::new(),
            password: request.password.filter(|p| !p.is_empty()),
            created_at: Utc::now().timestamp_millis(),
        };

        self.save(&list).await?;
        info!(list_id = %list.id, "Wishlist created");

        Ok(list.into_public())
    }

    /// Read a list by id, password stripped.
    pub async fn read(&self, id: &str) -> ListResult<PublicWishList> {
        Ok(self.load(id).await?.into_public())
    }

    /// Merge `patch` into the stored list. The id and `createdAt` never change.
    pub async fn update(&self, id: &str, patch: ListPatch) -> ListResult<PublicWishList> {
        let mut list = self.load(id).await?;

        if let Some(owner) = patch.owner {
            let owner = owner.trim();
            if owner.is_empty() {
                return Err(ListError::Validation("owner must not be empty".into()));
            }
            list.owner = owner.to_string();
        }
        if let Some(birthday) = patch.birthday {
            let birthday = birthday.trim();
            validate_birthday(birthday)?;
            list.birthday = birthday.to_string();
        }
        if let Some(items) = patch.items {
            validate_items(&items)?;
            list.items = items;
        }
        if let Some(password) = patch.password {
            list.password = Some(password).filter(|p| !p.is_empty());
        }

        self.save(&list).await?;
        debug!(list_id = %id, items = list.items.len(), "Wishlist updated");

        Ok(list.into_public())
    }

    /// Delete a list. Deleting an unknown id succeeds.
    pub async fn delete(&self, id: &str) -> ListResult<()> {
        self.store.delete(&key(id)).await?;
        info!(list_id = %id, "Wishlist deleted");
        Ok(())
    }

    /// Save a full record under its id, or a new id when none is given.
    ///
    /// A record sent without a password keeps the stored one, since read
    /// responses never include it.
    pub async fn upsert(&self, request: UpsertListRequest) -> ListResult<PublicWishList> {
        let owner = request.owner.trim();
        let birthday = request.birthday.trim();
        if owner.is_empty() || birthday.is_empty() {
            return Err(ListError::Validation("Missing required fields".into()));
        }
        validate_birthday(birthday)?;
        validate_items(&request.items)?;

        let id = request
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let existing = match self.load(&id).await {
            Ok(list) => Some(list),
            Err(ListError::NotFound) => None,
            Err(e) => return Err(e),
        };

        let password = match request.password.filter(|p| !p.is_empty()) {
            Some(p) => Some(p),
            None => existing.as_ref().and_then(|l| l.password.clone()),
        };
        let created_at = existing
            .as_ref()
            .map(|l| l.created_at)
            .or(request.created_at)
            .unwrap_or_else(|| Utc::now().timestamp_millis());

        let list = WishList {
            id,
            owner: owner.to_string(),
            birthday: birthday.to_string(),
            items: request.items,
            password,
            created_at,
        };

        self.save(&list).await?;
        info!(list_id = %list.id, existed = existing.is_some(), "Wishlist saved");

        Ok(list.into_public())
    }

    /// Extract `request.url` and append it to the list.
    ///
    /// Extraction failures do not fail the call: the item is saved from the
    /// fallback record, which keeps the original URL.
    pub async fn add_item(
        &self,
        id: &str,
        request: AddItemRequest,
        extractor: &ProductExtractor,
    ) -> ListResult<PublicWishList> {
        let url = request.url.trim();
        if url.is_empty() {
            return Err(ListError::Validation("URL is required".into()));
        }
        if let Some(priority) = request.priority {
            validate_priority(priority)?;
        }

        // Check the list first so a bad id never triggers a fetch
        self.load(id).await?;

        let scraped = extractor.extract_or_fallback(url).await;
        let item = WishItem::from_scraped(scraped, request.comment, request.priority);

        // Reload: the fetch may have taken a while
        let mut list = self.load(id).await?;
        list.items.push(item);
        self.save(&list).await?;

        debug!(list_id = %id, items = list.items.len(), "Item added");
        Ok(list.into_public())
    }

    /// Remove an item by id. Unknown item ids leave the list unchanged.
    pub async fn remove_item(&self, id: &str, item_id: &str) -> ListResult<PublicWishList> {
        let mut list = self.load(id).await?;

        let before = list.items.len();
        list.items.retain(|item| item.id != item_id);

        if list.items.len() != before {
            self.save(&list).await?;
            debug!(list_id = %id, item_id = %item_id, "Item removed");
        }

        Ok(list.into_public())
    }

    async fn load(&self, id: &str) -> ListResult<WishList> {
        let raw = self
            .store
            .get(&key(id))
            .await?
            .ok_or(ListError::NotFound)?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn save(&self, list: &WishList) -> ListResult<()> {
        let raw = serde_json::to_string(list)?;
        self.store.put(&key(&list.id), &raw, self.ttl).await?;
        Ok(())
    }
}

fn key(id: &str) -> String {
    format!("list:{}", id)
}

fn validate_birthday(birthday: &str) -> ListResult<()> {
    NaiveDate::parse_from_str(birthday, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ListError::Validation("birthday must be a YYYY-MM-DD date".into()))
}

fn validate_priority(priority: u8) -> ListResult<()> {
    if priority > 1 {
        return Err(ListError::Validation("priority must be 0 or 1".into()));
    }
    Ok(())
}

fn validate_items(items: &[WishItem]) -> ListResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if item.id.trim().is_empty() {
            return Err(ListError::Validation("item id must not be empty".into()));
        }
        if !seen.insert(item.id.as_str()) {
            return Err(ListError::Validation(format!(
                "duplicate item id: {}",
                item.id
            )));
        }
        if let Some(priority) = item.priority {
            validate_priority(priority)?;
        }
    }
    Ok(())
}

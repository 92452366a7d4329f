//! File-backed list storage used when the backend is unreachable.
//!
//! The whole database is one JSON object keyed by list id. A missing or
//! corrupt file reads as empty.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use directories::ProjectDirs;
use tracing::warn;
use uuid::Uuid;

use crate::error::LocalDbError;
use crate::types::{CreateListRequest, ListPatch, WishList};

pub const LOCAL_DB_FILE: &str = "wishpocket_db.json";

type Lists = BTreeMap<String, WishList>;

#[derive(Debug, Clone)]
pub struct LocalDb {
    path: PathBuf,
}

impl LocalDb {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/wishpocket_db.json` for the current user.
    pub fn default_path() -> Result<PathBuf, LocalDbError> {
        let proj = ProjectDirs::from("app", "wishpocket", "wishpocket")
            .ok_or(LocalDbError::NoDataDir)?;
        Ok(proj.data_dir().join(LOCAL_DB_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, id: &str) -> Option<WishList> {
        self.load().remove(id)
    }

    pub fn create(&self, request: &CreateListRequest) -> Result<WishList, LocalDbError> {
        let list = WishList {
            id: Uuid::new_v4().to_string(),
            owner: request.owner.clone(),
            birthday: request.birthday.clone(),
            items: Vec::new(),
            password: request.password.clone().filter(|p| !p.is_empty()),
            created_at: Utc::now().timestamp_millis(),
        };

        let mut lists = self.load();
        lists.insert(list.id.clone(), list.clone());
        self.save(&lists)?;

        Ok(list)
    }

    /// Merge `patch` into a stored list. `Ok(None)` when the id is unknown.
    pub fn update(&self, id: &str, patch: ListPatch) -> Result<Option<WishList>, LocalDbError> {
        let mut lists = self.load();
        let Some(list) = lists.get_mut(id) else {
            return Ok(None);
        };

        patch.apply_to(list);
        let updated = list.clone();
        self.save(&lists)?;

        Ok(Some(updated))
    }

    /// Remove a list; returns whether it existed.
    pub fn remove(&self, id: &str) -> Result<bool, LocalDbError> {
        let mut lists = self.load();
        if lists.remove(id).is_none() {
            return Ok(false);
        }
        self.save(&lists)?;
        Ok(true)
    }

    fn load(&self) -> Lists {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Lists::new(),
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(
                path = %self.path.display(),
                error = %e,
                "Local database is corrupt, treating as empty"
            );
            Lists::new()
        })
    }

    fn save(&self, lists: &Lists) -> Result<(), LocalDbError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(lists)?)?;
        Ok(())
    }
}

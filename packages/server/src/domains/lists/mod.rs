//! Wishlists: records, persistence and item management.

pub mod models;
pub mod service;

pub use models::*;
pub use service::{ListError, ListResult, ListService};

// WishPocket - API Core
//
// Backend for shareable birthday wishlists: list storage with expiry,
// product page extraction and the JSON HTTP API.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;
pub mod store;

pub use config::*;

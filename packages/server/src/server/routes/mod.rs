// HTTP routes
pub mod health;
pub mod lists;
pub mod scrape;

pub use health::*;
pub use lists::*;
pub use scrape::*;

// Common types shared across domains
pub mod response;

pub use response::ApiResponse;

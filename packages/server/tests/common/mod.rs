// Common test utilities

pub mod harness;
pub mod postgres;

pub use harness::*;
pub use postgres::*;

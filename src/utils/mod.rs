//! Shared utilities

pub mod error;

pub use error::{AccessError, AccessResult};

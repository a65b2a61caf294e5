//! # Locator Testing Utils
//!
//! Shared testing utilities for the job location workspace: in-memory job
//! registries, tracking lookups and hostname canonicalizers, plus builders for
//! live job and tracking records.
//!
//! Add this crate as a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! locator-testing-utils = { path = "../testing-utils" }
//! ```

pub mod builders;
pub mod mocks;

// Re-export commonly used items
pub use builders::*;
pub use mocks::*;

//! Terminology Admin Core Library
//!
//! Platform-independent pieces shared by the admin console view models:
//! - Domain types (atoms, term types, attribute names, workflow configs)
//! - Client-side paging (`utils::compute_page`)
//! - Remote data service traits, with in-memory implementations
//!
//! The remote service is reached only through the traits in [`traits`], so
//! hosts can plug in an HTTP client or a test double.

pub mod error;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use traits::{MetadataService, WorkflowService};

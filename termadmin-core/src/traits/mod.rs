//! Remote data service abstraction trait definition

mod metadata_service;
mod workflow_service;

pub use metadata_service::{InMemoryMetadataService, MetadataService};
pub use workflow_service::{InMemoryWorkflowService, WorkflowService};

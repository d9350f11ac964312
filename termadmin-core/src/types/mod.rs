//! Type definition module

mod atom;
mod metadata;
mod paging;
mod project;
mod workflow;

pub use atom::{Atom, Component};
pub use metadata::{AttributeName, MetadataKind, MetadataRecord, TermType};
pub use paging::{Page, Pageable, PagingState, SortValue, DEFAULT_PAGE_SIZE};
pub use project::ProjectContext;
pub use workflow::WorkflowConfig;

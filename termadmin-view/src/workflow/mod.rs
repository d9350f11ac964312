//! Add/edit dialog workflows
//!
//! Each dialog owns an [`EditSession`]; the invoking page only sees the final
//! [`WorkflowOutcome`].

mod operation;
mod session;
mod term_type;
mod workflow_config;

pub use operation::{EditAction, RecordKind, RemoteOperation};
pub use session::{
    merge_record, Completion, EditSession, ErrorList, Keyed, SessionState, SubmitError, Ticket,
    WorkflowOutcome,
};
pub use term_type::{PendingMetadataSubmit, TermTypeEditor, BLANK_FIELDS_NOTICE};
pub use workflow_config::{ConfigEditor, PendingConfigSubmit};

//! Terminology Admin View Models
//!
//! UI-independent state for the admin console:
//! - `presenter`: a component's atoms shown one page at a time, with
//!   expand/collapse state
//! - `workflow`: add/edit dialogs for term types, attribute names and
//!   workflow configs, driven by an explicit session state machine
//! - `config`: list presentation settings stored as TOML
//!
//! Remote calls go through the service traits of `termadmin-core`.

pub mod config;
pub mod error;
pub mod presenter;
pub mod workflow;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod test_utils;

pub use config::{ConfigService, PresenterConfig, TomlConfigService};
pub use error::{ViewError, ViewResult};
pub use presenter::{AtomsPresenter, CollapseGlyph};
pub use workflow::{ConfigEditor, EditAction, SessionState, TermTypeEditor, WorkflowOutcome};

//! Remote operation selection

use serde::{Deserialize, Serialize};
use termadmin_core::types::MetadataKind;

/// Whether the dialog creates a record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditAction {
    Add,
    Edit,
}

/// The kinds of record the console can add or edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordKind {
    TermType,
    AttributeName,
    WorkflowConfig,
}

impl From<MetadataKind> for RecordKind {
    fn from(kind: MetadataKind) -> Self {
        match kind {
            MetadataKind::TermType => Self::TermType,
            MetadataKind::AttributeName => Self::AttributeName,
        }
    }
}

/// Exactly one remote call per `(kind, action)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    AddTermType,
    UpdateTermType,
    AddAttributeName,
    UpdateAttributeName,
    AddWorkflowConfig,
    UpdateWorkflowConfig,
}

impl RemoteOperation {
    pub const fn select(kind: RecordKind, action: EditAction) -> Self {
        match (kind, action) {
            (RecordKind::TermType, EditAction::Add) => Self::AddTermType,
            (RecordKind::TermType, EditAction::Edit) => Self::UpdateTermType,
            (RecordKind::AttributeName, EditAction::Add) => Self::AddAttributeName,
            (RecordKind::AttributeName, EditAction::Edit) => Self::UpdateAttributeName,
            (RecordKind::WorkflowConfig, EditAction::Add) => Self::AddWorkflowConfig,
            (RecordKind::WorkflowConfig, EditAction::Edit) => Self::UpdateWorkflowConfig,
        }
    }

    pub const fn kind(self) -> RecordKind {
        match self {
            Self::AddTermType | Self::UpdateTermType => RecordKind::TermType,
            Self::AddAttributeName | Self::UpdateAttributeName => RecordKind::AttributeName,
            Self::AddWorkflowConfig | Self::UpdateWorkflowConfig => RecordKind::WorkflowConfig,
        }
    }

    pub const fn action(self) -> EditAction {
        match self {
            Self::AddTermType | Self::AddAttributeName | Self::AddWorkflowConfig => EditAction::Add,
            Self::UpdateTermType | Self::UpdateAttributeName | Self::UpdateWorkflowConfig => {
                EditAction::Edit
            }
        }
    }

    /// Service method name, as used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AddTermType => "addTermType",
            Self::UpdateTermType => "updateTermType",
            Self::AddAttributeName => "addAttributeName",
            Self::UpdateAttributeName => "updateAttributeName",
            Self::AddWorkflowConfig => "addWorkflowConfig",
            Self::UpdateWorkflowConfig => "updateWorkflowConfig",
        }
    }
}

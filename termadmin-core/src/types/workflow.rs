//! Workflow configuration types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-project workflow configuration, unique by `type` within a project.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type", default)]
    pub config_type: String,
    #[serde(default)]
    pub mutually_exclusive: bool,
    #[serde(default)]
    pub admin_config: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime::option"
    )]
    pub last_partition_time: Option<DateTime<Utc>>,
}

impl WorkflowConfig {
    #[must_use]
    pub fn with_type(config_type: impl Into<String>) -> Self {
        Self {
            config_type: config_type.into(),
            ..Self::default()
        }
    }
}

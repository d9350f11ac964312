//! Project context types

use serde::{Deserialize, Serialize};

/// The project an editing session is scoped to.
///
/// Term types and attribute names are scoped by `(terminology, version)`,
/// workflow configs by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub terminology: String,
    pub version: String,
}

impl ProjectContext {
    #[must_use]
    pub fn new(id: i64, terminology: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id,
            name: String::new(),
            terminology: terminology.into(),
            version: version.into(),
        }
    }
}

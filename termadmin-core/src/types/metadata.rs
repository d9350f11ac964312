//! Term type and attribute name metadata

use serde::{Deserialize, Serialize};

use super::ProjectContext;

/// A term type (e.g. `PT` = "Preferred term") of one terminology version.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub expanded_form: String,
    #[serde(default)]
    pub terminology: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_variant_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_variant_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_type: Option<String>,
    #[serde(default)]
    pub hierarchical_type: bool,
    #[serde(default)]
    pub obsolete: bool,
    #[serde(default)]
    pub suppressible: bool,
    #[serde(default)]
    pub publishable: bool,
}

/// An attribute name (e.g. `LT` = "Lexical tag") of one terminology version.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub expanded_form: String,
    #[serde(default)]
    pub terminology: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub annotation: bool,
    #[serde(default)]
    pub functional: bool,
    #[serde(default)]
    pub obsolete: bool,
    #[serde(default)]
    pub suppressible: bool,
    #[serde(default)]
    pub publishable: bool,
}

/// Which kind of abbreviation metadata is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataKind {
    TermType,
    AttributeName,
}

impl MetadataKind {
    /// Blank record of this kind stamped with the project's terminology and version.
    #[must_use]
    pub fn blank(self, project: &ProjectContext) -> MetadataRecord {
        match self {
            Self::TermType => MetadataRecord::TermType(TermType {
                terminology: project.terminology.clone(),
                version: project.version.clone(),
                ..TermType::default()
            }),
            Self::AttributeName => MetadataRecord::AttributeName(AttributeName {
                terminology: project.terminology.clone(),
                version: project.version.clone(),
                ..AttributeName::default()
            }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TermType => "term type",
            Self::AttributeName => "attribute name",
        }
    }
}

/// Either metadata record, keyed by abbreviation within `(terminology, version)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MetadataRecord {
    TermType(TermType),
    AttributeName(AttributeName),
}

impl MetadataRecord {
    pub fn kind(&self) -> MetadataKind {
        match self {
            Self::TermType(_) => MetadataKind::TermType,
            Self::AttributeName(_) => MetadataKind::AttributeName,
        }
    }

    pub fn abbreviation(&self) -> &str {
        match self {
            Self::TermType(t) => &t.abbreviation,
            Self::AttributeName(a) => &a.abbreviation,
        }
    }

    pub fn expanded_form(&self) -> &str {
        match self {
            Self::TermType(t) => &t.expanded_form,
            Self::AttributeName(a) => &a.expanded_form,
        }
    }

    pub fn terminology(&self) -> &str {
        match self {
            Self::TermType(t) => &t.terminology,
            Self::AttributeName(a) => &a.terminology,
        }
    }

    pub fn version(&self) -> &str {
        match self {
            Self::TermType(t) => &t.version,
            Self::AttributeName(a) => &a.version,
        }
    }

    pub fn set_abbreviation(&mut self, value: impl Into<String>) {
        match self {
            Self::TermType(t) => t.abbreviation = value.into(),
            Self::AttributeName(a) => a.abbreviation = value.into(),
        }
    }

    pub fn set_expanded_form(&mut self, value: impl Into<String>) {
        match self {
            Self::TermType(t) => t.expanded_form = value.into(),
            Self::AttributeName(a) => a.expanded_form = value.into(),
        }
    }

    /// Whether both abbreviation and expanded form are non-blank.
    pub fn has_required_fields(&self) -> bool {
        !self.abbreviation().trim().is_empty() && !self.expanded_form().trim().is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn blank_record_is_scoped_to_project() {
        let project = ProjectContext::new(3, "UMLS", "latest");
        let record = MetadataKind::TermType.blank(&project);
        assert_eq!(record.kind(), MetadataKind::TermType);
        assert_eq!(record.terminology(), "UMLS");
        assert_eq!(record.version(), "latest");
        assert!(record.abbreviation().is_empty());
        assert!(!record.has_required_fields());
    }

    #[test]
    fn required_fields_reject_whitespace() {
        let project = ProjectContext::new(3, "UMLS", "latest");
        let mut record = MetadataKind::AttributeName.blank(&project);
        record.set_abbreviation("LT");
        record.set_expanded_form("   ");
        assert!(!record.has_required_fields());
        record.set_expanded_form("Lexical tag");
        assert!(record.has_required_fields());
    }
}

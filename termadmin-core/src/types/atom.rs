//! Atom and container types

use serde::{Deserialize, Serialize};

use super::paging::{Pageable, SortValue};

/// A child record of a [`Component`], rendered as one row of an expandable list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Atom {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub terminology: String,
    #[serde(default)]
    pub version: String,
    /// Term type abbreviation, e.g. `PT`
    #[serde(default)]
    pub term_type: String,
    #[serde(default)]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept_id: Option<String>,
    #[serde(default)]
    pub obsolete: bool,
    #[serde(default)]
    pub suppressible: bool,
    /// Whether expandable detail exists; set by the data source.
    #[serde(default)]
    pub has_content: bool,
    /// Collapse state, owned by the list presenter.
    #[serde(default)]
    pub expanded: bool,
}

impl Atom {
    /// Create a visible atom with no expandable content
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            terminology: String::new(),
            version: String::new(),
            term_type: String::new(),
            language: String::new(),
            code_id: None,
            concept_id: None,
            obsolete: false,
            suppressible: false,
            has_content: false,
            expanded: false,
        }
    }

    /// Flip the collapse state. Never touches `has_content`.
    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Equality ignoring the presenter-owned `expanded` flag.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.terminology == other.terminology
            && self.version == other.version
            && self.term_type == other.term_type
            && self.language == other.language
            && self.code_id == other.code_id
            && self.concept_id == other.concept_id
            && self.obsolete == other.obsolete
            && self.suppressible == other.suppressible
            && self.has_content == other.has_content
    }
}

impl Pageable for Atom {
    fn is_hidden(&self) -> bool {
        self.obsolete || self.suppressible
    }

    fn matches_filter(&self, needle: &str) -> bool {
        [
            Some(self.name.as_str()),
            Some(self.term_type.as_str()),
            Some(self.terminology.as_str()),
            self.code_id.as_deref(),
            self.concept_id.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "id" => Some(SortValue::Number(self.id)),
            "name" => Some(SortValue::Text(self.name.to_lowercase())),
            "termType" => Some(SortValue::Text(self.term_type.clone())),
            "terminology" => Some(SortValue::Text(self.terminology.clone())),
            "language" => Some(SortValue::Text(self.language.clone())),
            "codeId" => self.code_id.clone().map(SortValue::Text),
            "conceptId" => self.concept_id.clone().map(SortValue::Text),
            "obsolete" => Some(SortValue::Flag(self.obsolete)),
            "suppressible" => Some(SortValue::Flag(self.suppressible)),
            _ => None,
        }
    }
}

/// A concept, code or descriptor holding an ordered collection of atoms.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub terminology: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub atoms: Vec<Atom>,
}

impl Component {
    pub fn atom_mut(&mut self, atom_id: i64) -> Option<&mut Atom> {
        self.atoms.iter_mut().find(|a| a.id == atom_id)
    }

    /// Equality ignoring the atoms' `expanded` flags.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.terminology == other.terminology
            && self.version == other.version
            && self.atoms.len() == other.atoms.len()
            && self
                .atoms
                .iter()
                .zip(&other.atoms)
                .all(|(a, b)| a.same_content(b))
    }

    /// Copy `expanded` from atoms of `previous` with a matching id.
    pub fn carry_expanded_from(&mut self, previous: &Self) {
        for atom in &mut self.atoms {
            if let Some(old) = previous.atoms.iter().find(|a| a.id == atom.id) {
                atom.expanded = old.expanded;
            }
        }
    }
}

//! List presenters

mod atoms;

pub use atoms::{AtomsCallbacks, AtomsPresenter, CollapseGlyph};

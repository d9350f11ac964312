//! Paged, collapsible atom list

use std::sync::Arc;

use termadmin_core::types::{Atom, Component, Page, PagingState};
use termadmin_core::utils::{compute_page, set_sort_field};

use crate::config::PresenterConfig;

/// Expand/collapse marker shown next to an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseGlyph {
    /// Nothing to expand.
    None,
    Plus,
    Minus,
}

impl CollapseGlyph {
    pub fn for_atom(atom: &Atom) -> Self {
        if !atom.has_content {
            Self::None
        } else if atom.expanded {
            Self::Minus
        } else {
            Self::Plus
        }
    }

    /// Icon classes used by the web console's stylesheet.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::None => "glyphicon glyphicon-plus glyphicon-none",
            Self::Plus => "glyphicon glyphicon-plus",
            Self::Minus => "glyphicon glyphicon-minus",
        }
    }
}

/// Host hooks for the atom list.
pub trait AtomsCallbacks: Send + Sync {
    /// Called after every recompute with the fresh page.
    fn paged_list_changed(&self, _page: &Page<Atom>) {}
}

/// Presents a component's atoms one page at a time.
///
/// The page is recomputed only through explicit notifications: a changed
/// component, an actual change of the hidden-items flag, or one of the
/// paging controls.
pub struct AtomsPresenter {
    component: Option<Component>,
    paging: PagingState,
    max_page_size: u32,
    paged: Page<Atom>,
    computed: bool,
    revision: u64,
    callbacks: Option<Arc<dyn AtomsCallbacks>>,
}

impl AtomsPresenter {
    pub fn new(config: &PresenterConfig) -> Self {
        let paging = config.paging_state();
        Self {
            component: None,
            max_page_size: config.max_page_size.max(1),
            paged: Page::empty(paging.page_size),
            paging,
            computed: false,
            revision: 0,
            callbacks: None,
        }
    }

    #[must_use]
    pub fn with_callbacks(mut self, callbacks: Arc<dyn AtomsCallbacks>) -> Self {
        self.callbacks = Some(callbacks);
        self
    }

    pub fn component(&self) -> Option<&Component> {
        self.component.as_ref()
    }

    /// Rows of the current page.
    pub fn paged_data(&self) -> &[Atom] {
        &self.paged.items
    }

    pub fn page(&self) -> &Page<Atom> {
        &self.paged
    }

    pub fn paging(&self) -> &PagingState {
        &self.paging
    }

    pub fn show_hidden(&self) -> bool {
        self.paging.show_hidden
    }

    /// Number of recomputes so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Notify a new or changed component. Returns whether the page was recomputed.
    ///
    /// An absent component empties the page without recomputing. Changes to
    /// `expanded` alone are not a change; when the same component comes back
    /// with other changes, the current expand state is kept per atom id.
    pub fn set_component(&mut self, component: Option<Component>) -> bool {
        let Some(mut component) = component else {
            self.component = None;
            self.paged = Page::empty(self.paging.page_size);
            self.computed = false;
            return false;
        };
        if let Some(current) = &self.component {
            if self.computed && current.same_content(&component) {
                return false;
            }
            if current.id == component.id {
                component.carry_expanded_from(current);
            }
        }
        self.component = Some(component);
        self.recompute()
    }

    /// Mirror the hidden-items toggle; recompute only if it actually changed.
    pub fn set_show_hidden(&mut self, show_hidden: bool) -> bool {
        let changed = self.paging.show_hidden != show_hidden;
        self.paging.show_hidden = show_hidden;
        if changed {
            self.recompute()
        } else {
            false
        }
    }

    /// Recompute the page from the component and paging state.
    ///
    /// This is the callback the host's pager invokes. No-op without a component.
    pub fn recompute(&mut self) -> bool {
        let Some(component) = &self.component else {
            return false;
        };
        self.paged = compute_page(&component.atoms, &self.paging);
        self.computed = true;
        self.revision += 1;
        log::debug!(
            "Atoms of component {}: page {} of {} ({} rows, revision {})",
            component.id,
            self.paged.page,
            self.paged.page_count(),
            self.paged.items.len(),
            self.revision
        );
        if let Some(callbacks) = &self.callbacks {
            callbacks.paged_list_changed(&self.paged);
        }
        true
    }

    pub fn go_to_page(&mut self, page: u32) -> bool {
        self.paging.page = page.max(1);
        self.recompute()
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        self.paging.page_size = page_size.clamp(1, self.max_page_size);
        self.paging.page = 1;
        self.recompute()
    }

    /// Change the filter text and return to the first page.
    pub fn set_filter(&mut self, filter: Option<String>) -> bool {
        self.paging.filter = filter;
        self.paging.page = 1;
        self.recompute()
    }

    /// Sort by `field`; the current sort field flips direction.
    pub fn sort_by(&mut self, field: &str) -> bool {
        set_sort_field(&mut self.paging, field);
        self.recompute()
    }

    /// Flip an atom's expanded flag, both on the page and in the component,
    /// so it survives later recomputes. Does not recompute.
    pub fn toggle_item_collapse(&mut self, atom_id: i64) -> bool {
        let mut found = false;
        if let Some(atom) = self.paged.items.iter_mut().find(|a| a.id == atom_id) {
            atom.toggle_expanded();
            found = true;
        }
        if let Some(atom) = self.component.as_mut().and_then(|c| c.atom_mut(atom_id)) {
            atom.toggle_expanded();
            found = true;
        }
        found
    }

    pub fn collapse_icon(atom: &Atom) -> CollapseGlyph {
        CollapseGlyph::for_atom(atom)
    }
}

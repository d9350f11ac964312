//! Paging types

use serde::{Deserialize, Serialize};

// ============ Pagination ============

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Paging, filtering and sorting state for a client-side list.
///
/// Pages are 1-indexed.
///
/// # Default
///
/// The default is `page = 1, page_size = 10`, ascending, no filter, no sort
/// field, hidden items excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingState {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
    /// Optional free-text filter, matched case-insensitively.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Field name passed to [`Pageable::sort_value`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    pub sort_ascending: bool,
    /// Include obsolete/suppressible items.
    pub show_hidden: bool,
}

impl Default for PagingState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            filter: None,
            sort_field: None,
            sort_ascending: true,
            show_hidden: false,
        }
    }
}

impl PagingState {
    /// Clamp paging values to valid ranges.
    ///
    /// - `page` is clamped to `>= 1`
    /// - `page_size` is clamped to `1..=max_page_size`
    /// - filter and sort fields are preserved as-is
    #[must_use]
    pub fn validated(&self, max_page_size: u32) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, max_page_size.max(1)),
            ..self.clone()
        }
    }

    /// The filter text, lowercased, if it is non-blank.
    pub fn normalized_filter(&self) -> Option<String> {
        self.filter
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_lowercase)
    }
}

/// Comparable value extracted from an item for sorting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Flag(bool),
    Number(i64),
    Text(String),
}

/// Items that can be shown in a client-side paged list.
pub trait Pageable {
    /// Hidden items are dropped unless `show_hidden` is set.
    fn is_hidden(&self) -> bool;

    /// Whether any searchable field contains `needle`, which is already lowercased.
    fn matches_filter(&self, needle: &str) -> bool;

    /// Sort value for a named field; `None` sorts first.
    fn sort_value(&self, field: &str) -> Option<SortValue>;
}

/// One page of a filtered, sorted collection.
///
/// # Type Parameters
///
/// * `T` — The item type (e.g., [`Atom`](super::Atom)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Current page number.
    pub page: u32,
    /// Page size used for this projection.
    pub page_size: u32,
    /// Number of items left after hiding and filtering, across all pages.
    pub total_count: u32,
    /// Whether there are more pages after this one.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a new page, automatically computing [`has_more`](Self::has_more).
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_count: u32) -> Self {
        let has_more = u64::from(page) * u64::from(page_size) < u64::from(total_count);
        Self {
            items,
            page,
            page_size,
            total_count,
            has_more,
        }
    }

    /// An empty first page.
    pub fn empty(page_size: u32) -> Self {
        Self::new(Vec::new(), 1, page_size, 0)
    }

    /// Number of pages needed to show `total_count` items.
    pub fn page_count(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE)
    }
}

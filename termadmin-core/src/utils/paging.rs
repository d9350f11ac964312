//! Client-side paging of in-memory collections.

use crate::types::{Page, Pageable, PagingState};

/// Default paging state: first page, ten rows, ascending, hidden items excluded.
pub fn new_paging_state() -> PagingState {
    PagingState::default()
}

/// Project `items` onto one page according to `paging`.
///
/// Steps, in order: drop hidden items unless `show_hidden`, keep items matching
/// the filter, stable-sort by `sort_field`, then slice the requested page.
/// The result depends only on the arguments.
pub fn compute_page<T>(items: &[T], paging: &PagingState) -> Page<T>
where
    T: Pageable + Clone,
{
    let page_no = paging.page.max(1);
    let page_size = paging.page_size.max(1);
    let needle = paging.normalized_filter();

    let mut visible: Vec<&T> = items
        .iter()
        .filter(|item| paging.show_hidden || !item.is_hidden())
        .filter(|item| needle.as_deref().is_none_or(|n| item.matches_filter(n)))
        .collect();

    if let Some(field) = paging.sort_field.as_deref() {
        visible.sort_by(|a, b| {
            let ord = a.sort_value(field).cmp(&b.sort_value(field));
            if paging.sort_ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }

    let total = u32::try_from(visible.len()).unwrap_or(u32::MAX);
    let start = usize::try_from(u64::from(page_no - 1) * u64::from(page_size)).unwrap_or(usize::MAX);
    let page_items: Vec<T> = visible
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .cloned()
        .collect();

    log::debug!(
        "computed page {page_no} ({} of {total} items, size {page_size})",
        page_items.len()
    );
    Page::new(page_items, page_no, page_size, total)
}

/// Toggle-or-set sort: the current field flips direction, a new field sorts ascending.
///
/// Returns to the first page whenever the field changes.
pub fn set_sort_field(paging: &mut PagingState, field: &str) {
    if paging.sort_field.as_deref() == Some(field) {
        paging.sort_ascending = !paging.sort_ascending;
    } else {
        paging.sort_field = Some(field.to_string());
        paging.sort_ascending = true;
        paging.page = 1;
    }
}

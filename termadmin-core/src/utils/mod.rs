//! Shared helpers

pub mod datetime;
pub mod paging;

pub use paging::{compute_page, new_paging_state, set_sort_field};

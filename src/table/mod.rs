//! In-memory table model: sortable, searchable, paginated.

pub mod column;
pub mod state;

pub use column::{Column, Record, Value};
pub use state::{compare_values, PageLink, SortDirection, TableOptions, TableState, PAGE_SIZE};

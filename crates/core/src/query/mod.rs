//! # Query Pipeline
//!
//! Pure stages applied to a catalog snapshot on every read:
//!
//! ```text
//! launches ──▶ filter (search, year, success, favorites) ──▶ paginate ──▶ view
//! ```
//!
//! `session` keeps the per-consumer state (filters, page) between reads.

pub mod filter;
pub mod pagination;
pub mod session;

pub use filter::{filter_launches, FavoriteLookup, FilterSpec, YearFilter};
pub use pagination::{
    page_numbers, paginate, total_pages, PageItem, PageSlice, PaginationState,
    DEFAULT_ITEMS_PER_PAGE, ITEMS_PER_PAGE_OPTIONS,
};
pub use session::{BrowseSession, BrowseView, LaunchItem, ViewState};

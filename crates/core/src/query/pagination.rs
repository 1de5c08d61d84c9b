//! # Pagination Engine
//!
//! Slicing of a filtered list into pages, the page-state invariant, and the
//! bounded page-number strip shown under the results.

use serde::{Deserialize, Serialize};

/// Page sizes offered to the user
pub const ITEMS_PER_PAGE_OPTIONS: [usize; 4] = [12, 24, 48, 96];

pub const DEFAULT_ITEMS_PER_PAGE: usize = 12;

/// At or below this many pages every page number is shown
const FULL_STRIP_MAX_PAGES: usize = 7;

/// Pages shown on each side of the current page in a collapsed strip
const STRIP_DELTA: usize = 2;

/// One page of results plus page-count metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub total_pages: usize,
}

/// `ceil(total_items / page_size)`, 0 for an empty list
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Slice page `page` (1-based) out of `records`
///
/// Out-of-range pages yield an empty slice; clamping is the caller's job.
pub fn paginate<T: Clone>(records: &[T], page: usize, page_size: usize) -> PageSlice<T> {
    let total_items = records.len();
    let total_pages = total_pages(total_items, page_size);

    let items = page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(page_size))
        .filter(|start| *start < total_items)
        .map(|start| {
            let end = start.saturating_add(page_size).min(total_items);
            records[start..end].to_vec()
        })
        .unwrap_or_default();

    PageSlice {
        items,
        total_items,
        total_pages,
    }
}

/// Current page plus derived totals
///
/// Invariant: `total_pages == ceil(total_items / items_per_page)` and
/// `1 <= current_page <= max(1, total_pages)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl PaginationState {
    /// A zero page size is bumped to 1.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_items: 0,
            total_pages: 0,
        }
    }

    fn last_page(&self) -> usize {
        self.total_pages.max(1)
    }

    /// Jump to `page`, clamped into range
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.last_page());
    }

    /// Change the page size and go back to page 1
    ///
    /// Returns `false` (and changes nothing) for a zero size.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> bool {
        if items_per_page == 0 {
            return false;
        }
        self.items_per_page = items_per_page;
        self.total_pages = total_pages(self.total_items, items_per_page);
        self.current_page = 1;
        true
    }

    /// Back to page 1 (filters or data changed)
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Recompute totals for a new filtered count
    pub fn sync_totals(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.total_pages = total_pages(total_items, self.items_per_page);
        if self.current_page > self.last_page() {
            self.current_page = 1;
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Zero-based index of the first item on the current page
    pub fn offset(&self) -> usize {
        (self.current_page - 1).saturating_mul(self.items_per_page)
    }
}

/// Entry of the page-number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Page numbers to render for `current` of `total`
///
/// All pages when `total <= 7`; otherwise the first page, up to two pages on
/// each side of `current`, the last page, and ellipses over the gaps.
pub fn page_numbers(current: usize, total: usize) -> Vec<PageItem> {
    if total <= FULL_STRIP_MAX_PAGES {
        return (1..=total).map(PageItem::Page).collect();
    }

    let current = current.clamp(1, total);
    let window_start = current.saturating_sub(STRIP_DELTA).max(2);
    let window_end = (current + STRIP_DELTA).min(total - 1);

    let mut items = vec![PageItem::Page(1)];
    if current > STRIP_DELTA + 2 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((window_start..=window_end).map(PageItem::Page));
    if current + STRIP_DELTA < total - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total));

    items
}

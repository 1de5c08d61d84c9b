//! # Browse Session
//!
//! Composes the pipeline for one consumer: the current filters, the page
//! state and a favorites handle. Each `view` re-runs filter and pagination
//! over the catalog snapshot; nothing derived is cached beyond a fingerprint
//! of the last filtered set, used to snap back to page 1 when it changes.

use super::filter::{filter_launches, FilterSpec, YearFilter};
use super::pagination::{page_numbers, paginate, PageItem, PaginationState};
use crate::catalog::CatalogSnapshot;
use crate::models::LaunchRecord;
use crate::state::FavoritesHandle;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// What the results area should show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum ViewState {
    Loading,
    Error(String),
    /// Loaded fine, nothing matched
    Empty,
    Results,
}

/// A launch decorated for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchItem {
    #[serde(flatten)]
    pub launch: LaunchRecord,
    pub rocket_name: String,
    pub is_favorite: bool,
}

impl LaunchItem {
    pub fn new(launch: LaunchRecord, snapshot: &CatalogSnapshot, favorites: &FavoritesHandle) -> Self {
        let rocket_name = snapshot.rocket_name(&launch.rocket_id).to_string();
        let is_favorite = favorites.has(&launch.id);
        Self {
            launch,
            rocket_name,
            is_favorite,
        }
    }
}

/// Everything a renderer needs for one screen of results
#[derive(Debug, Clone, Serialize)]
pub struct BrowseView {
    pub state: ViewState,
    pub items: Vec<LaunchItem>,
    pub filters: FilterSpec,
    pub pagination: PaginationState,
    pub page_numbers: Vec<PageItem>,
}

impl BrowseView {
    /// "Showing 12 of 187 missions (Page 1 of 16)"
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Showing {} of {} missions",
            self.items.len(),
            self.pagination.total_items
        );
        if self.pagination.total_pages > 1 {
            text.push_str(&format!(
                " (Page {} of {})",
                self.pagination.current_page, self.pagination.total_pages
            ));
        }
        text
    }
}

/// Filter + page state for one consumer
pub struct BrowseSession {
    filters: FilterSpec,
    pagination: PaginationState,
    favorites: FavoritesHandle,
    last_fingerprint: Option<u64>,
}

impl BrowseSession {
    pub fn new(favorites: FavoritesHandle, items_per_page: usize) -> Self {
        Self {
            filters: FilterSpec::default(),
            pagination: PaginationState::new(items_per_page),
            favorites,
            last_fingerprint: None,
        }
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn favorites(&self) -> &FavoritesHandle {
        &self.favorites
    }

    /// Committed search text (from the debounced input)
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
        self.pagination.reset();
    }

    pub fn set_year(&mut self, year: impl Into<YearFilter>) {
        self.filters.year = year.into();
        self.pagination.reset();
    }

    pub fn set_success_only(&mut self, success_only: bool) {
        self.filters.success_only = success_only;
        self.pagination.reset();
    }

    pub fn set_favorites_only(&mut self, favorites_only: bool) {
        self.filters.favorites_only = favorites_only;
        self.pagination.reset();
    }

    /// Replace every filter at once
    pub fn set_filters(&mut self, filters: FilterSpec) {
        self.filters = filters;
        self.pagination.reset();
    }

    /// Returns `false` for a zero page size
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> bool {
        self.pagination.set_items_per_page(items_per_page)
    }

    /// Clamped against the totals of the last `sync`/`view`
    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
    }

    /// Re-run the filter and refresh page totals
    ///
    /// Resets to page 1 if the filtered set differs from the previous sync.
    pub fn sync(&mut self, snapshot: &CatalogSnapshot) -> Vec<LaunchRecord> {
        let filtered = filter_launches(&snapshot.launches, &self.filters, self.favorites.as_ref());

        let fingerprint = fingerprint(&filtered);
        if self.last_fingerprint.is_some_and(|previous| previous != fingerprint) {
            self.pagination.reset();
        }
        self.last_fingerprint = Some(fingerprint);
        self.pagination.sync_totals(filtered.len());

        filtered
    }

    /// Current page of results
    pub fn view(&mut self, snapshot: &CatalogSnapshot) -> BrowseView {
        let filtered = self.sync(snapshot);
        let page = paginate(
            &filtered,
            self.pagination.current_page,
            self.pagination.items_per_page,
        );

        let state = if let Some(error) = &snapshot.error {
            ViewState::Error(error.clone())
        } else if snapshot.loading {
            ViewState::Loading
        } else if filtered.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Results
        };

        let items = page
            .items
            .into_iter()
            .map(|launch| LaunchItem::new(launch, snapshot, &self.favorites))
            .collect();

        BrowseView {
            state,
            items,
            filters: self.filters.clone(),
            pagination: self.pagination,
            page_numbers: page_numbers(self.pagination.current_page, self.pagination.total_pages),
        }
    }
}

fn fingerprint(records: &[LaunchRecord]) -> u64 {
    let mut hasher = DefaultHasher::new();
    records.len().hash(&mut hasher);
    for record in records {
        record.id.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LaunchLinks, Outcome};
    use crate::state::FavoritesStore;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn catalog(count: usize, successes: usize) -> CatalogSnapshot {
        let launches = (0..count)
            .map(|i| LaunchRecord {
                id: format!("launch-{:02}", i),
                name: format!("Mission {:02}", i),
                launch_time_utc: format!("20{:02}-01-01T00:00:00.000Z", 10 + i % 5),
                rocket_id: "f9".to_string(),
                outcome: if i < successes {
                    Outcome::Success
                } else {
                    Outcome::Failure
                },
                details: None,
                links: LaunchLinks::default(),
            })
            .collect();

        let rocket_names: HashMap<String, String> =
            [("f9".to_string(), "Falcon 9".to_string())].into_iter().collect();

        CatalogSnapshot {
            launches: Arc::new(launches),
            rocket_names: Arc::new(rocket_names),
            loading: false,
            error: None,
            revision: 1,
        }
    }

    #[test]
    fn test_success_only_scenario_paginates_13_into_two_pages() {
        let snapshot = catalog(25, 13);
        let mut session = BrowseSession::new(FavoritesStore::in_memory(), 12);
        session.set_success_only(true);

        let view = session.view(&snapshot);
        assert_eq!(view.state, ViewState::Results);
        assert_eq!(view.pagination.total_items, 13);
        assert_eq!(view.pagination.total_pages, 2);
        assert_eq!(view.items.len(), 12);
        assert_eq!(view.summary(), "Showing 12 of 13 missions (Page 1 of 2)");

        session.set_page(2);
        let view = session.view(&snapshot);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].launch.id, "launch-12");
        assert_eq!(view.items[0].rocket_name, "Falcon 9");
    }

    #[test]
    fn test_filter_changes_reset_to_first_page() {
        let snapshot = catalog(40, 40);
        let mut session = BrowseSession::new(FavoritesStore::in_memory(), 12);
        session.view(&snapshot);

        session.set_page(3);
        session.set_search("mission");
        assert_eq!(session.pagination().current_page, 1);

        session.set_page(3);
        session.set_year("2011");
        assert_eq!(session.pagination().current_page, 1);

        session.set_page(2);
        session.set_success_only(false);
        assert_eq!(session.pagination().current_page, 1);

        session.set_page(2);
        session.set_favorites_only(false);
        assert_eq!(session.pagination().current_page, 1);
    }

    #[test]
    fn test_items_per_page_change_resets_to_first_page() {
        let snapshot = catalog(100, 0);
        let mut session = BrowseSession::new(FavoritesStore::in_memory(), 12);
        session.view(&snapshot);
        session.set_page(7);
        assert_eq!(session.pagination().current_page, 7);

        assert!(session.set_items_per_page(48));
        let view = session.view(&snapshot);
        assert_eq!(view.pagination.current_page, 1);
        assert_eq!(view.pagination.total_pages, 3);
    }

    #[test]
    fn test_favorites_change_under_favorites_only_resets_page() {
        let snapshot = catalog(30, 0);
        let favorites = FavoritesStore::in_memory();
        for i in 0..30 {
            favorites.add(&format!("launch-{:02}", i)).unwrap();
        }

        let mut session = BrowseSession::new(Arc::clone(&favorites), 12);
        session.set_favorites_only(true);
        session.view(&snapshot);
        session.set_page(2);
        assert_eq!(session.view(&snapshot).pagination.current_page, 2);

        favorites.remove("launch-00").unwrap();
        let view = session.view(&snapshot);
        assert_eq!(view.pagination.current_page, 1);
        assert_eq!(view.pagination.total_items, 29);
        assert!(view.items.iter().all(|item| item.is_favorite));
    }

    #[test]
    fn test_empty_result_is_distinct_from_loading_and_error() {
        let snapshot = catalog(5, 0);
        let mut session = BrowseSession::new(FavoritesStore::in_memory(), 12);
        session.set_success_only(true);
        let view = session.view(&snapshot);
        assert_eq!(view.state, ViewState::Empty);
        assert_eq!(view.pagination.total_pages, 0);
        assert!(view.page_numbers.is_empty());

        let loading = CatalogSnapshot {
            loading: true,
            ..Default::default()
        };
        assert_eq!(session.view(&loading).state, ViewState::Loading);

        let failed = CatalogSnapshot {
            error: Some("Failed to fetch data".to_string()),
            ..Default::default()
        };
        assert_eq!(
            session.view(&failed).state,
            ViewState::Error("Failed to fetch data".to_string())
        );
    }

    #[test]
    fn test_view_serializes_for_presentation() {
        let snapshot = catalog(3, 1);
        let mut session = BrowseSession::new(FavoritesStore::in_memory(), 12);
        let json = serde_json::to_value(session.view(&snapshot)).unwrap();

        assert_eq!(json["state"]["status"], "results");
        assert_eq!(json["items"][0]["rocket_name"], "Falcon 9");
        assert_eq!(json["items"][0]["outcome"], "success");
        assert_eq!(json["filters"]["year"], "all");
        assert_eq!(json["page_numbers"][0]["page"], 1);
    }
}

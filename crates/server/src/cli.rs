//! # CLI Commands
//!
//! Offline front ends over the same pipeline the HTTP API uses.

use anyhow::{Context, Result};
use launchpad_core::catalog::{CatalogSnapshot, CatalogSource};
use launchpad_core::config::LaunchpadConfig;
use launchpad_core::query::{BrowseSession, BrowseView, FilterSpec, ViewState};
use launchpad_core::search::SearchInput;
use launchpad_core::state::{FavoritesHandle, FavoritesStore, LaunchpadDb};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Open the durable favorites store at the configured path
pub fn open_favorites(config: &LaunchpadConfig) -> Result<FavoritesHandle> {
    let path = config.database_path();
    let db = LaunchpadDb::open_at(&path)
        .with_context(|| format!("Failed to open database at {}", path.display()))?;
    Ok(FavoritesStore::open(Arc::new(db)))
}

/// Load the catalog once, failing the command if retrieval fails
async fn load_catalog(config: &LaunchpadConfig) -> Result<CatalogSnapshot> {
    let catalog = CatalogSource::from_config(config)?;
    catalog.load().await.context("Failed to fetch data")?;
    Ok(catalog.snapshot().await)
}

fn render(view: &BrowseView) {
    match &view.state {
        ViewState::Loading => println!("Loading launches..."),
        ViewState::Error(message) => println!("{}", message),
        ViewState::Empty => println!("No launches found. Try adjusting your filters."),
        ViewState::Results => {
            for item in &view.items {
                let date = item
                    .launch
                    .launched_at()
                    .map(|at| at.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| item.launch.launch_time_utc.clone());
                println!(
                    "{} {:<32} {}  {:<14} {}",
                    if item.is_favorite { "*" } else { " " },
                    item.launch.name,
                    date,
                    item.rocket_name,
                    item.launch.outcome.label()
                );
            }
        }
    }
    println!("{}", view.summary());
}

/// `launchpad list`
pub async fn list(
    config: &LaunchpadConfig,
    filters: FilterSpec,
    page: usize,
    per_page: Option<usize>,
) -> Result<()> {
    let favorites = open_favorites(config)?;
    let snapshot = load_catalog(config).await?;

    let mut session = BrowseSession::new(favorites, config.items_per_page);
    if let Some(per_page) = per_page {
        anyhow::ensure!(session.set_items_per_page(per_page), "--per-page must be at least 1");
    }
    session.set_filters(filters);
    session.sync(&snapshot);
    session.set_page(page);

    render(&session.view(&snapshot));
    Ok(())
}

/// `launchpad favorites list`
pub fn favorites_list(config: &LaunchpadConfig) -> Result<()> {
    let favorites = open_favorites(config)?;
    if favorites.is_empty() {
        println!("No favorites yet.");
    }
    for id in favorites.list() {
        println!("{}", id);
    }
    Ok(())
}

/// `launchpad favorites add|remove`
pub fn favorites_set(config: &LaunchpadConfig, id: &str, favorite: bool) -> Result<()> {
    let favorites = open_favorites(config)?;
    let changed = if favorite {
        favorites.add(id)?
    } else {
        favorites.remove(id)?
    };

    match (favorite, changed) {
        (true, true) => println!("Added {} to favorites", id),
        (false, true) => println!("Removed {} from favorites", id),
        _ => println!("Favorites unchanged"),
    }
    Ok(())
}

/// Take the final committed query once input has stopped
///
/// A pending query is awaited (up to `wait`); otherwise the debounce task has
/// finished and anything it sent is already in the channel.
async fn flush_committed(
    input: &SearchInput,
    committed: &mut mpsc::UnboundedReceiver<String>,
    wait: Duration,
) -> Option<String> {
    if input.is_pending() {
        tokio::time::timeout(wait, committed.recv()).await.ok().flatten()
    } else {
        committed.try_recv().ok()
    }
}

/// `launchpad search`: each stdin line is the search box's current text
pub async fn search(config: &LaunchpadConfig, filters: FilterSpec) -> Result<()> {
    let favorites = open_favorites(config)?;
    let snapshot = load_catalog(config).await?;

    let mut session = BrowseSession::new(favorites, config.items_per_page);
    session.set_filters(filters);

    let quiet_period = config.search_quiet_period();
    let (mut input, mut committed) = SearchInput::with_quiet_period(quiet_period);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(raw) => input.on_input(raw),
                None => break,
            },
            Some(query) = committed.recv() => {
                tracing::debug!(query = %query, "Search committed");
                session.set_search(query);
                render(&session.view(&snapshot));
            }
        }
    }

    // Input closed: render whatever the search box last committed
    if let Some(query) = flush_committed(&input, &mut committed, quiet_period * 2).await {
        session.set_search(query);
        render(&session.view(&snapshot));
    }
    input.cancel();

    Ok(())
}

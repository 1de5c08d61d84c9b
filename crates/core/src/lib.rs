//! # Launchpad Core
//!
//! Query pipeline over the public launch catalog: retrieval, filtering,
//! pagination, debounced search and persisted favorites.
//!
//! ## Architecture
//!
//! - `catalog/` - Fetches launches and rockets together, publishes snapshots
//! - `query/` - Filter engine, pagination engine and the browse session
//! - `search/` - Debounced search input
//! - `state/` - SQLite storage and the favorites store
//! - `models` - Normalized records and wire DTOs
//! - `config` - Runtime configuration (file + env)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use launchpad_core::{catalog::CatalogSource, config::LaunchpadConfig};
//! use launchpad_core::query::BrowseSession;
//! use launchpad_core::state::FavoritesStore;
//!
//! let config = LaunchpadConfig::load()?;
//! let catalog = CatalogSource::from_config(&config)?;
//! catalog.load().await?;
//!
//! let mut session = BrowseSession::new(FavoritesStore::in_memory(), config.items_per_page);
//! session.set_search("starlink");
//! let view = session.view(&catalog.snapshot().await);
//! println!("{}", view.summary());
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod search;
pub mod state;

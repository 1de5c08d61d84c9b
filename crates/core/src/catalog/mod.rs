//! # Catalog
//!
//! Retrieval and normalization of the remote launch catalog.
//!
//! ```text
//! load() ──┬── fetch_launches ──┐
//!          └── fetch_rockets  ──┴── both ok? ── publish snapshot
//!                                   else     ── publish error, no records
//! ```

pub mod fetcher;
pub mod source;

pub use fetcher::{CatalogFetcher, HttpCatalogFetcher, StaticCatalogFetcher};
pub use source::{available_years, CatalogSnapshot, CatalogSource};

//! # Favorites Store
//!
//! Durable, ordered, deduplicated set of favorite launch ids.
//!
//! The whole set is stored as a JSON array under a single key. It is read
//! once when the store is constructed and written back in full on every
//! mutation, before the mutation becomes visible in memory. Consumers share
//! one store through a [`FavoritesHandle`]; there is no ambient global.

use super::db::LaunchpadDb;
use crate::error::FavoritesError;
use crate::query::filter::FavoriteLookup;
use anyhow::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Storage key holding the JSON-encoded favorites array
pub const FAVORITES_KEY: &str = "spacex-favorites";

/// Shared handle passed to every consumer of favorites
pub type FavoritesHandle = Arc<FavoritesStore>;

/// Durable single-key storage behind the favorites store
pub trait FavoritesBackend: Send + Sync {
    /// Raw stored value, `None` if nothing was ever written
    fn read(&self) -> Result<Option<String>>;
    /// Replace the stored value
    fn write(&self, value: &str) -> Result<()>;
}

/// Favorites persisted in the launchpad SQLite database
pub struct SqliteFavoritesBackend {
    db: Arc<LaunchpadDb>,
}

impl SqliteFavoritesBackend {
    pub fn new(db: Arc<LaunchpadDb>) -> Self {
        Self { db }
    }
}

impl FavoritesBackend for SqliteFavoritesBackend {
    fn read(&self) -> Result<Option<String>> {
        self.db.get_value(FAVORITES_KEY)
    }

    fn write(&self, value: &str) -> Result<()> {
        self.db.set_value(FAVORITES_KEY, value)
    }
}

/// Volatile backend for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryFavoritesBackend {
    value: Mutex<Option<String>>,
    fail_writes: Mutex<bool>,
}

impl MemoryFavoritesBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-existing raw value
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
            fail_writes: Mutex::new(false),
        }
    }

    /// Make every subsequent write fail
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap_or_else(PoisonError::into_inner) = fail;
    }

    /// Raw value as last written
    pub fn raw(&self) -> Option<String> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl FavoritesBackend for MemoryFavoritesBackend {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.raw())
    }

    fn write(&self, value: &str) -> Result<()> {
        if *self.fail_writes.lock().unwrap_or_else(PoisonError::into_inner) {
            anyhow::bail!("storage unavailable");
        }
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(value.to_string());
        Ok(())
    }
}

impl<B: FavoritesBackend + ?Sized> FavoritesBackend for Arc<B> {
    fn read(&self) -> Result<Option<String>> {
        (**self).read()
    }

    fn write(&self, value: &str) -> Result<()> {
        (**self).write(value)
    }
}

/// The favorites set
pub struct FavoritesStore {
    backend: Box<dyn FavoritesBackend>,
    ids: Mutex<Vec<String>>,
}

impl FavoritesStore {
    /// Initialize from durable storage
    ///
    /// A missing, unreadable or unparseable value yields an empty set.
    pub fn load(backend: impl FavoritesBackend + 'static) -> Self {
        let ids = match backend.read() {
            Ok(Some(raw)) => parse_ids(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read favorites, starting empty: {:#}", e);
                Vec::new()
            }
        };

        tracing::debug!(count = ids.len(), "Favorites loaded");

        Self {
            backend: Box::new(backend),
            ids: Mutex::new(ids),
        }
    }

    /// Open the store on the launchpad database
    pub fn open(db: Arc<LaunchpadDb>) -> FavoritesHandle {
        Arc::new(Self::load(SqliteFavoritesBackend::new(db)))
    }

    /// Empty store that persists nowhere durable
    pub fn in_memory() -> FavoritesHandle {
        Arc::new(Self::load(MemoryFavoritesBackend::new()))
    }

    /// Add an id. Returns `false` if it was already present.
    pub fn add(&self, id: &str) -> Result<bool, FavoritesError> {
        let mut ids = self.lock_for_write()?;
        self.insert_locked(&mut ids, id)
    }

    /// Remove an id. Returns `false` if it was absent.
    pub fn remove(&self, id: &str) -> Result<bool, FavoritesError> {
        let mut ids = self.lock_for_write()?;
        self.remove_locked(&mut ids, id)
    }

    /// Flip membership. Returns the new membership.
    ///
    /// The check and the write happen under one lock, so concurrent toggles
    /// of the same id alternate.
    pub fn toggle(&self, id: &str) -> Result<bool, FavoritesError> {
        let mut ids = self.lock_for_write()?;
        if ids.iter().any(|existing| existing == id) {
            self.remove_locked(&mut ids, id).map(|_| false)
        } else {
            self.insert_locked(&mut ids, id).map(|_| true)
        }
    }

    /// Drop every favorite
    pub fn clear(&self) -> Result<(), FavoritesError> {
        let mut ids = self.lock_for_write()?;
        if ids.is_empty() {
            return Ok(());
        }
        self.persist(&[])?;
        ids.clear();
        Ok(())
    }

    pub fn has(&self, id: &str) -> bool {
        self.lock_for_read().iter().any(|existing| existing == id)
    }

    /// Ids in insertion order
    pub fn list(&self) -> Vec<String> {
        self.lock_for_read().clone()
    }

    pub fn len(&self) -> usize {
        self.lock_for_read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_for_read().is_empty()
    }

    fn insert_locked(&self, ids: &mut Vec<String>, id: &str) -> Result<bool, FavoritesError> {
        if ids.iter().any(|existing| existing == id) {
            return Ok(false);
        }

        let mut updated = ids.clone();
        updated.push(id.to_string());
        self.persist(&updated)?;
        *ids = updated;
        Ok(true)
    }

    fn remove_locked(&self, ids: &mut Vec<String>, id: &str) -> Result<bool, FavoritesError> {
        if !ids.iter().any(|existing| existing == id) {
            return Ok(false);
        }

        let updated: Vec<String> = ids.iter().filter(|existing| *existing != id).cloned().collect();
        self.persist(&updated)?;
        *ids = updated;
        Ok(true)
    }

    fn persist(&self, ids: &[String]) -> Result<(), FavoritesError> {
        let encoded = serde_json::to_string(ids)?;
        self.backend
            .write(&encoded)
            .map_err(|e| FavoritesError::Persist(format!("{:#}", e)))
    }

    fn lock_for_write(&self) -> Result<MutexGuard<'_, Vec<String>>, FavoritesError> {
        self.ids.lock().map_err(|_| FavoritesError::Poisoned)
    }

    // Mutations never leave the set half-updated, so a poisoned lock is still readable
    fn lock_for_read(&self) -> MutexGuard<'_, Vec<String>> {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FavoriteLookup for FavoritesStore {
    fn contains_id(&self, id: &str) -> bool {
        self.has(id)
    }
}

/// Decode a stored array, collapsing duplicates
fn parse_ids(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(decoded) => {
            let mut ids: Vec<String> = Vec::with_capacity(decoded.len());
            for id in decoded {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
            ids
        }
        Err(e) => {
            tracing::warn!("Stored favorites are corrupt, starting empty: {}", e);
            Vec::new()
        }
    }
}

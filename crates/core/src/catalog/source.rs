//! # Catalog Source
//!
//! Loads the launch and rocket collections and publishes them as one
//! immutable snapshot. Either both retrievals succeed and a complete
//! catalog is published, or the load fails with a single error and no
//! records are exposed.

use super::fetcher::{CatalogFetcher, HttpCatalogFetcher};
use crate::config::LaunchpadConfig;
use crate::error::Result;
use crate::models::{normalize_launches, LaunchRecord, RocketRecord, UNKNOWN_ROCKET};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Point-in-time view of the catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    /// Launches in the order received
    pub launches: Arc<Vec<LaunchRecord>>,
    /// Rocket id → display name
    pub rocket_names: Arc<HashMap<String, String>>,
    /// True until the first load settles, and while a retrieval is in flight
    pub loading: bool,
    /// Set when the last load failed
    pub error: Option<String>,
    /// Bumped every time a load result is published
    pub revision: u64,
}

impl CatalogSnapshot {
    /// Rocket display name, `"Unknown Rocket"` when unresolved
    pub fn rocket_name(&self, rocket_id: &str) -> &str {
        self.rocket_names
            .get(rocket_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_ROCKET)
    }

    pub fn find(&self, launch_id: &str) -> Option<&LaunchRecord> {
        self.launches.iter().find(|launch| launch.id == launch_id)
    }

    /// Distinct launch years, newest first
    pub fn available_years(&self) -> Vec<String> {
        available_years(&self.launches)
    }

    /// Loaded without error and not currently reloading
    pub fn is_ready(&self) -> bool {
        !self.loading && self.error.is_none()
    }
}

/// Distinct 4-character year prefixes, newest first
pub fn available_years(launches: &[LaunchRecord]) -> Vec<String> {
    let years: BTreeSet<&str> = launches.iter().map(LaunchRecord::year).collect();
    years.into_iter().rev().map(str::to_string).collect()
}

/// Build the rocket-id → name lookup
pub fn rocket_name_map(rockets: Vec<RocketRecord>) -> HashMap<String, String> {
    rockets
        .into_iter()
        .map(|rocket| (rocket.id, rocket.name))
        .collect()
}

/// Owner of the catalog state
pub struct CatalogSource {
    fetcher: Arc<dyn CatalogFetcher>,
    state: RwLock<CatalogSnapshot>,
    load_seq: AtomicU64,
}

impl CatalogSource {
    /// A fresh source reports `loading` until its first load settles
    pub fn new(fetcher: Arc<dyn CatalogFetcher>) -> Self {
        Self {
            fetcher,
            state: RwLock::new(CatalogSnapshot {
                loading: true,
                ..Default::default()
            }),
            load_seq: AtomicU64::new(0),
        }
    }

    /// Source backed by the configured HTTP endpoints
    pub fn from_config(config: &LaunchpadConfig) -> Result<Self> {
        let fetcher = HttpCatalogFetcher::new(config)?;
        Ok(Self::new(Arc::new(fetcher)))
    }

    /// Current snapshot (cheap: records are shared)
    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.state.read().await.clone()
    }

    /// Retrieve both collections from scratch and publish the result
    ///
    /// Returns the number of launches published. A load overtaken by a newer
    /// call to `load` does not publish.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> Result<usize> {
        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let (launches, rockets) =
            tokio::join!(self.fetcher.fetch_launches(), self.fetcher.fetch_rockets());
        let fetched = launches.and_then(|launches| rockets.map(|rockets| (launches, rockets)));

        let mut state = self.state.write().await;
        if self.load_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "Catalog load superseded, discarding result");
            return fetched.map(|(launches, _)| launches.len());
        }

        state.loading = false;
        state.revision += 1;

        match fetched {
            Ok((raw_launches, raw_rockets)) => {
                let launches = normalize_launches(raw_launches);
                let rockets = raw_rockets.into_iter().map(RocketRecord::from).collect();
                let count = launches.len();

                state.rocket_names = Arc::new(rocket_name_map(rockets));
                state.launches = Arc::new(launches);
                state.error = None;

                tracing::info!(
                    launches = count,
                    rockets = state.rocket_names.len(),
                    "Catalog loaded"
                );
                Ok(count)
            }
            Err(e) => {
                state.launches = Arc::new(Vec::new());
                state.rocket_names = Arc::new(HashMap::new());
                state.error = Some(format!("Failed to fetch data: {}", e));

                tracing::warn!("Catalog load failed: {}", e);
                Err(e)
            }
        }
    }
}

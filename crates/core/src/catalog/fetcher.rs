//! # Catalog Fetchers
//!
//! The seam between the catalog source and the remote service.

use crate::config::LaunchpadConfig;
use crate::error::{CatalogError, Result};
use crate::models::{ApiLaunch, ApiRocket};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Retrieves the two remote collections
///
/// Each call is one complete retrieval; implementations do not cache.
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    async fn fetch_launches(&self) -> Result<Vec<ApiLaunch>>;
    async fn fetch_rockets(&self) -> Result<Vec<ApiRocket>>;
}

/// Fetcher for the public REST endpoints
pub struct HttpCatalogFetcher {
    client: Client,
    launches_url: String,
    rockets_url: String,
}

impl HttpCatalogFetcher {
    pub fn new(config: &LaunchpadConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("launchpad/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::Client(e.to_string()))?;

        Ok(Self {
            client,
            launches_url: config.launches_url.clone(),
            rockets_url: config.rockets_url.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, resource: &'static str) -> Result<Vec<T>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Network {
                resource,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                resource,
                status: status.as_u16(),
            });
        }

        response.json::<Vec<T>>().await.map_err(|e| CatalogError::Decode {
            resource,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl CatalogFetcher for HttpCatalogFetcher {
    async fn fetch_launches(&self) -> Result<Vec<ApiLaunch>> {
        self.get_json(&self.launches_url, "launches").await
    }

    async fn fetch_rockets(&self) -> Result<Vec<ApiRocket>> {
        self.get_json(&self.rockets_url, "rockets").await
    }
}

/// Serves fixed collections, optionally failing one of them
///
/// Used by tests and offline demos. Counts every retrieval.
#[derive(Default)]
pub struct StaticCatalogFetcher {
    launches: Vec<ApiLaunch>,
    rockets: Vec<ApiRocket>,
    launches_status: Option<u16>,
    rockets_status: Option<u16>,
    launch_calls: AtomicUsize,
    rocket_calls: AtomicUsize,
}

impl StaticCatalogFetcher {
    pub fn new(launches: Vec<ApiLaunch>, rockets: Vec<ApiRocket>) -> Self {
        Self {
            launches,
            rockets,
            ..Default::default()
        }
    }

    /// Answer the launch list with a non-success status
    pub fn fail_launches(mut self, status: u16) -> Self {
        self.launches_status = Some(status);
        self
    }

    /// Answer the rocket list with a non-success status
    pub fn fail_rockets(mut self, status: u16) -> Self {
        self.rockets_status = Some(status);
        self
    }

    pub fn launch_calls(&self) -> usize {
        self.launch_calls.load(Ordering::SeqCst)
    }

    pub fn rocket_calls(&self) -> usize {
        self.rocket_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogFetcher for StaticCatalogFetcher {
    async fn fetch_launches(&self) -> Result<Vec<ApiLaunch>> {
        self.launch_calls.fetch_add(1, Ordering::SeqCst);
        match self.launches_status {
            Some(status) => Err(CatalogError::Status {
                resource: "launches",
                status,
            }),
            None => Ok(self.launches.clone()),
        }
    }

    async fn fetch_rockets(&self) -> Result<Vec<ApiRocket>> {
        self.rocket_calls.fetch_add(1, Ordering::SeqCst);
        match self.rockets_status {
            Some(status) => Err(CatalogError::Status {
                resource: "rockets",
                status,
            }),
            None => Ok(self.rockets.clone()),
        }
    }
}

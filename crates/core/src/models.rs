//! # Launchpad Models
//!
//! Catalog record types and the wire DTOs they are normalized from.
//!
//! The remote service returns launch and rocket objects as JSON arrays.
//! `ApiLaunch` / `ApiRocket` mirror that shape loosely (missing optional
//! fields are tolerated) and are converted into the immutable
//! `LaunchRecord` / `RocketRecord` values the rest of the pipeline uses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Display name used when a launch references a rocket missing from the lookup
pub const UNKNOWN_ROCKET: &str = "Unknown Rocket";

/// Outcome of a launch
///
/// Derived from the raw `success` flag:
/// - `true`  → `Success`
/// - `false` → `Failure`
/// - `null` or absent → `Pending`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
    #[default]
    Pending,
}

impl Outcome {
    /// Map the raw tri-state success flag
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Outcome::Success,
            Some(false) => Outcome::Failure,
            None => Outcome::Pending,
        }
    }

    /// Status label for UI
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "Successful",
            Outcome::Failure => "Failed",
            Outcome::Pending => "Upcoming",
        }
    }
}

/// Optional media and reference links of a launch
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LaunchLinks {
    pub patch_small: Option<String>,
    pub patch_large: Option<String>,
    pub webcast: Option<String>,
    pub wikipedia: Option<String>,
}

/// A single launch in a loaded catalog snapshot
///
/// `id` is unique within one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchRecord {
    pub id: String,
    pub name: String,
    /// ISO-8601 timestamp exactly as received
    pub launch_time_utc: String,
    pub rocket_id: String,
    pub outcome: Outcome,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub links: LaunchLinks,
}

impl LaunchRecord {
    /// First four characters of the launch timestamp
    pub fn year(&self) -> &str {
        self.launch_time_utc
            .get(..4)
            .unwrap_or(&self.launch_time_utc)
    }

    /// Parsed launch time, for display only. Filtering never parses dates.
    pub fn launched_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.launch_time_utc)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// A rocket, used only to resolve display names
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RocketRecord {
    pub id: String,
    pub name: String,
}

// === Wire DTOs ===

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiPatch {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiLinks {
    #[serde(default)]
    pub patch: ApiPatch,
    #[serde(default)]
    pub webcast: Option<String>,
    #[serde(default)]
    pub wikipedia: Option<String>,
}

/// Launch object as returned by the remote service
#[derive(Debug, Clone, Deserialize)]
pub struct ApiLaunch {
    pub id: String,
    pub name: String,
    pub date_utc: String,
    #[serde(default)]
    pub date_local: Option<String>,
    pub rocket: String,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub links: ApiLinks,
}

/// Rocket object as returned by the remote service
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRocket {
    pub id: String,
    pub name: String,
}

impl From<ApiLaunch> for LaunchRecord {
    fn from(raw: ApiLaunch) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            launch_time_utc: raw.date_utc,
            rocket_id: raw.rocket,
            outcome: Outcome::from_flag(raw.success),
            details: raw.details,
            links: LaunchLinks {
                patch_small: raw.links.patch.small,
                patch_large: raw.links.patch.large,
                webcast: raw.links.webcast,
                wikipedia: raw.links.wikipedia,
            },
        }
    }
}

impl From<ApiRocket> for RocketRecord {
    fn from(raw: ApiRocket) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
        }
    }
}

/// Normalize raw launches, preserving received order
///
/// Later occurrences of an already-seen id are dropped.
pub fn normalize_launches(raw: Vec<ApiLaunch>) -> Vec<LaunchRecord> {
    let mut seen = HashSet::with_capacity(raw.len());
    let mut records = Vec::with_capacity(raw.len());

    for launch in raw {
        if !seen.insert(launch.id.clone()) {
            tracing::warn!(launch_id = %launch.id, "Dropping duplicate launch id");
            continue;
        }
        records.push(LaunchRecord::from(launch));
    }

    records
}

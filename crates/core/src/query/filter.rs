//! # Filter Engine
//!
//! Pure, order-preserving narrowing of a launch list. All active criteria
//! combine with AND; an inactive criterion matches everything.

use crate::models::{LaunchRecord, Outcome};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Membership test over favorite ids
pub trait FavoriteLookup {
    fn contains_id(&self, id: &str) -> bool;
}

impl FavoriteLookup for [String] {
    fn contains_id(&self, id: &str) -> bool {
        self.iter().any(|fav| fav == id)
    }
}

impl FavoriteLookup for Vec<String> {
    fn contains_id(&self, id: &str) -> bool {
        self.as_slice().contains_id(id)
    }
}

impl FavoriteLookup for HashSet<String> {
    fn contains_id(&self, id: &str) -> bool {
        self.contains(id)
    }
}

impl FavoriteLookup for BTreeSet<String> {
    fn contains_id(&self, id: &str) -> bool {
        self.contains(id)
    }
}

/// Year restriction
///
/// Parsed from the selector value: exactly `"all"` (or empty) means no
/// restriction. Anything else is used verbatim as the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum YearFilter {
    #[default]
    All,
    Year(String),
}

impl YearFilter {
    /// Prefix match on the raw timestamp string. Dates are never parsed here.
    pub fn matches(&self, launch_time_utc: &str) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(year) => launch_time_utc.starts_with(year.as_str()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, YearFilter::All)
    }
}

impl From<String> for YearFilter {
    fn from(value: String) -> Self {
        if value.is_empty() || value == "all" {
            YearFilter::All
        } else {
            YearFilter::Year(value)
        }
    }
}

impl From<&str> for YearFilter {
    fn from(value: &str) -> Self {
        YearFilter::from(value.to_string())
    }
}

impl FromStr for YearFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(YearFilter::from(s))
    }
}

impl From<YearFilter> for String {
    fn from(value: YearFilter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::All => write!(f, "all"),
            YearFilter::Year(year) => write!(f, "{}", year),
        }
    }
}

/// Filter criteria; the default restricts nothing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Case-insensitive substring of the launch name
    pub search: String,
    pub year: YearFilter,
    pub success_only: bool,
    pub favorites_only: bool,
}

impl FilterSpec {
    /// True when no criterion is active
    pub fn is_unrestricted(&self) -> bool {
        self.search.is_empty() && self.year.is_all() && !self.success_only && !self.favorites_only
    }
}

/// Narrow `records` to those matching every active criterion of `spec`
///
/// Relative order of surviving records is preserved.
pub fn filter_launches<F>(records: &[LaunchRecord], spec: &FilterSpec, favorites: &F) -> Vec<LaunchRecord>
where
    F: FavoriteLookup + ?Sized,
{
    let needle = spec.search.to_lowercase();

    records
        .iter()
        .filter(|launch| needle.is_empty() || launch.name.to_lowercase().contains(&needle))
        .filter(|launch| spec.year.matches(&launch.launch_time_utc))
        .filter(|launch| !spec.success_only || launch.outcome == Outcome::Success)
        .filter(|launch| !spec.favorites_only || favorites.contains_id(&launch.id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LaunchLinks;

    fn launch(id: &str, name: &str, date: &str, outcome: Outcome) -> LaunchRecord {
        LaunchRecord {
            id: id.to_string(),
            name: name.to_string(),
            launch_time_utc: date.to_string(),
            rocket_id: "falcon9".to_string(),
            outcome,
            details: Some(format!("{} details mention Starlink", name)),
            links: LaunchLinks::default(),
        }
    }

    fn sample() -> Vec<LaunchRecord> {
        vec![
            launch("1", "FalconSat", "2006-03-24T22:30:00.000Z", Outcome::Failure),
            launch("2", "Starlink-1", "2021-05-04T10:00:00Z", Outcome::Success),
            launch("3", "Crew-2", "2021-12-31T23:59:59Z", Outcome::Success),
            launch("4", "STARLINK Upcoming", "2022-01-01T00:00:00Z", Outcome::Pending),
        ]
    }

    fn ids(records: &[LaunchRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_default_spec_is_identity() {
        let records = sample();
        let favorites: Vec<String> = vec![];
        let spec = FilterSpec::default();
        assert!(spec.is_unrestricted());
        assert_eq!(filter_launches(&records, &spec, &favorites), records);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_only() {
        let records = sample();
        let favorites: Vec<String> = vec![];
        let spec = FilterSpec {
            search: "starlink".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_launches(&records, &spec, &favorites)), vec!["2", "4"]);

        // "details" mention Starlink on every record, but only names are searched
        let spec = FilterSpec {
            search: "mention".to_string(),
            ..Default::default()
        };
        assert!(filter_launches(&records, &spec, &favorites).is_empty());
    }

    #[test]
    fn test_year_is_a_string_prefix_match() {
        let records = sample();
        let favorites: Vec<String> = vec![];
        let spec = FilterSpec {
            year: YearFilter::from("2021"),
            ..Default::default()
        };
        assert_eq!(ids(&filter_launches(&records, &spec, &favorites)), vec!["2", "3"]);
    }

    #[test]
    fn test_success_only_excludes_failure_and_pending() {
        let records = sample();
        let favorites: Vec<String> = vec![];
        let spec = FilterSpec {
            success_only: true,
            ..Default::default()
        };
        assert_eq!(ids(&filter_launches(&records, &spec, &favorites)), vec!["2", "3"]);
    }

    #[test]
    fn test_favorites_only() {
        let records = sample();
        let favorites: HashSet<String> = ["4".to_string(), "1".to_string()].into_iter().collect();
        let spec = FilterSpec {
            favorites_only: true,
            ..Default::default()
        };
        assert_eq!(ids(&filter_launches(&records, &spec, &favorites)), vec!["1", "4"]);
    }

    #[test]
    fn test_criteria_combine_conjunctively() {
        let records = sample();
        let favorites = vec!["2".to_string(), "3".to_string(), "4".to_string()];
        let spec = FilterSpec {
            search: "STAR".to_string(),
            year: YearFilter::from("2021"),
            success_only: true,
            favorites_only: true,
        };
        assert_eq!(ids(&filter_launches(&records, &spec, &favorites)), vec!["2"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = sample();
        let favorites = vec!["3".to_string()];
        let specs = [
            FilterSpec::default(),
            FilterSpec {
                search: "a".to_string(),
                success_only: true,
                ..Default::default()
            },
            FilterSpec {
                year: YearFilter::from("2021"),
                favorites_only: true,
                ..Default::default()
            },
        ];

        for spec in &specs {
            let once = filter_launches(&records, spec, &favorites);
            let twice = filter_launches(&once, spec, &favorites);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let favorites: Vec<String> = vec![];
        let spec = FilterSpec {
            success_only: true,
            ..Default::default()
        };
        assert!(filter_launches(&[], &spec, &favorites).is_empty());
    }

    #[test]
    fn test_year_filter_parsing_and_serde() {
        assert_eq!(YearFilter::from("all"), YearFilter::All);
        assert_eq!(YearFilter::from(""), YearFilter::All);
        assert_eq!("2020".parse::<YearFilter>().unwrap(), YearFilter::Year("2020".into()));

        // Only the exact selector value lifts the restriction
        assert_eq!(YearFilter::from("ALL"), YearFilter::Year("ALL".into()));
        assert_eq!(YearFilter::from(" 2020"), YearFilter::Year(" 2020".into()));
        assert!(!YearFilter::from(" 2020").matches("2020-01-01T00:00:00.000Z"));

        let spec: FilterSpec = serde_json::from_str(r#"{"year":"2019","success_only":true}"#).unwrap();
        assert_eq!(spec.year, YearFilter::Year("2019".into()));
        assert!(spec.search.is_empty());

        let json = serde_json::to_string(&FilterSpec::default()).unwrap();
        assert!(json.contains("\"year\":\"all\""));
    }
}

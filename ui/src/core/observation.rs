//! Dated recovery observations and the metric keys they carry.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date};

/// Identifier of a recovery metric (`"sleep"`, `"hrv"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricKey(String);

impl MetricKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MetricKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Borrow<str> for MetricKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One day of recovery metrics.
///
/// `date` is `None` when the source text was missing, `null` or not a valid
/// `YYYY-MM-DD` day;
/// such an observation never lands in a calendar bucket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawObservation")]
pub struct Observation {
    pub date: Option<Date>,
    pub metrics: BTreeMap<MetricKey, f64>,
}

impl Observation {
    pub fn new(date: Date) -> Self {
        Self {
            date: Some(date),
            metrics: BTreeMap::new(),
        }
    }

    /// Builder-style helper used by loaders and tests.
    pub fn with_metric(mut self, key: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(MetricKey::new(key), value);
        self
    }

    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).copied()
    }
}

/// Wire shape: `{ "date": "2026-01-16", "sleep": 64, "hrv": null, ... }`.
#[derive(Debug, Deserialize)]
struct RawObservation {
    #[serde(default)]
    date: Option<String>,
    #[serde(flatten)]
    values: BTreeMap<String, Option<f64>>,
}

impl From<RawObservation> for Observation {
    fn from(raw: RawObservation) -> Self {
        let metrics = raw
            .values
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (MetricKey::new(key), v)))
            .collect();

        Self {
            date: raw.date.as_deref().and_then(parse_day),
            metrics,
        }
    }
}

/// Parse a calendar day. A trailing time component (`2026-02-03T12:00:00`) is
/// ignored; anything else unparsable yields `None`.
pub fn parse_day(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();
    let (day, _time) = trimmed.split_once('T').unwrap_or((trimmed, ""));
    Date::parse(day, format_description!("[year]-[month]-[day]")).ok()
}

/// Distinct metric keys in first-seen order.
pub fn metric_keys(observations: &[Observation]) -> Vec<MetricKey> {
    let mut keys: Vec<MetricKey> = Vec::new();
    for observation in observations {
        for key in observation.metrics.keys() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_plain_and_datetime_days() {
        assert_eq!(parse_day("2026-01-16"), Some(date!(2026 - 01 - 16)));
        assert_eq!(parse_day("2026-02-03T12:00:00"), Some(date!(2026 - 02 - 03)));
        assert_eq!(parse_day("16/01/2026"), None);
        assert_eq!(parse_day(""), None);
    }

    #[test]
    fn null_metrics_are_dropped_on_ingest() {
        let obs: Observation =
            serde_json::from_str(r#"{"date":"2026-01-16","sleep":64,"hrv":null}"#).unwrap();
        assert_eq!(obs.date, Some(date!(2026 - 01 - 16)));
        assert_eq!(obs.metric("sleep"), Some(64.0));
        assert_eq!(obs.metric("hrv"), None);
    }

    #[test]
    fn bad_date_is_kept_as_none() {
        let obs: Observation = serde_json::from_str(r#"{"date":"someday","sleep":70}"#).unwrap();
        assert!(obs.date.is_none());
        assert_eq!(obs.metric("sleep"), Some(70.0));
    }

    #[test]
    fn missing_or_null_date_is_kept_as_none() {
        let missing: Observation = serde_json::from_str(r#"{"sleep":70}"#).unwrap();
        assert!(missing.date.is_none());
        assert_eq!(missing.metric("sleep"), Some(70.0));

        let null: Observation = serde_json::from_str(r#"{"date":null,"sleep":71}"#).unwrap();
        assert!(null.date.is_none());
        assert_eq!(null.metric("sleep"), Some(71.0));
        assert_eq!(null.metric("date"), None);
    }

    #[test]
    fn metric_keys_follow_first_appearance() {
        let observations = vec![
            Observation::new(date!(2026 - 01 - 01)).with_metric("sleep", 1.0),
            Observation::new(date!(2026 - 01 - 02))
                .with_metric("rhr", 2.0)
                .with_metric("sleep", 3.0),
        ];
        let keys = metric_keys(&observations);
        assert_eq!(keys, vec![MetricKey::from("sleep"), MetricKey::from("rhr")]);
    }
}

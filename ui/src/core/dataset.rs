//! Dashboard dataset: reference day, metric catalogue, recovery rows and
//! biomarker result tables.
//!
//! The document stands in for an API response. It is embedded in the crate
//! (`assets/data/dashboard.json`) and parsed once per page load.

use serde::Deserialize;
use thiserror::Error;
use time::Date;
use tracing::info;

use super::history::LabeledTextObservation;
use super::observation::{parse_day, MetricKey, Observation};

const BUILTIN_DATASET: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/data/dashboard.json"
));

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("malformed dataset document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid reference date `{0}` (expected YYYY-MM-DD)")]
    InvalidReferenceDate(String),
    #[error("dataset declares no metrics")]
    NoMetrics,
}

/// How a metric's line is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// Solid line with a translucent fill beneath it.
    Area,
    #[default]
    Line,
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetricSpec {
    pub key: MetricKey,
    pub label: String,
    pub color: String,
    #[serde(default)]
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BiomarkerRow {
    pub marker: String,
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub range: Option<String>,
}

/// One results table, headed by the period it was measured in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BiomarkerPeriod {
    pub label: String,
    #[serde(default)]
    pub rows: Vec<BiomarkerRow>,
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    reference_date: String,
    metrics: Vec<MetricSpec>,
    #[serde(default)]
    recovery: Vec<Observation>,
    #[serde(default)]
    biomarkers: Vec<BiomarkerPeriod>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub reference_date: Date,
    pub metrics: Vec<MetricSpec>,
    pub recovery: Vec<Observation>,
    pub biomarkers: Vec<BiomarkerPeriod>,
}

impl Dataset {
    pub fn from_json(document: &str) -> Result<Self, DatasetError> {
        let raw: RawDataset = serde_json::from_str(document)?;

        let reference_date = parse_day(&raw.reference_date)
            .ok_or_else(|| DatasetError::InvalidReferenceDate(raw.reference_date.clone()))?;
        if raw.metrics.is_empty() {
            return Err(DatasetError::NoMetrics);
        }

        info!(
            event = "dataset_load",
            status = "ok",
            reference = %reference_date,
            metrics = raw.metrics.len(),
            recovery_rows = raw.recovery.len(),
            biomarker_periods = raw.biomarkers.len(),
            "dataset parsed"
        );

        Ok(Self {
            reference_date,
            metrics: raw.metrics,
            recovery: raw.recovery,
            biomarkers: raw.biomarkers,
        })
    }

    /// The dataset shipped with the dashboard.
    pub fn builtin() -> Result<Self, DatasetError> {
        Self::from_json(BUILTIN_DATASET)
    }

    pub fn metric_keys(&self) -> Vec<MetricKey> {
        self.metrics.iter().map(|spec| spec.key.clone()).collect()
    }

    /// Flatten the biomarker tables into labeled text cells, in table order.
    pub fn text_observations(&self) -> Vec<LabeledTextObservation> {
        self.biomarkers
            .iter()
            .flat_map(|period| {
                period.rows.iter().map(move |row| {
                    LabeledTextObservation::new(&row.marker, &period.label, &row.value)
                })
            })
            .collect()
    }
}

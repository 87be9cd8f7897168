//! Platform-agnostic dashboard logic: calendar alignment of recovery metrics,
//! biomarker history extraction, dataset loading and label formatting.
//!
//! Nothing in here touches the UI; the chart components consume the values
//! these modules produce.

pub mod calendar;
pub mod dataset;
pub mod format;
pub mod granularity;
pub mod history;
pub mod observation;

pub use calendar::{aggregate, aggregate_with, AlignedSeries, RecoveryViews};
pub use dataset::{BiomarkerPeriod, BiomarkerRow, Dataset, DatasetError, LineStyle, MetricSpec};
pub use granularity::{BucketUnit, Granularity, UnknownGranularity};
pub use history::{
    extract_histories, parse_period, parse_value, BiomarkerHistories, HistoryPoint,
    LabeledTextObservation, TrendSeries, MIN_TREND_POINTS,
};
pub use observation::{metric_keys, parse_day, MetricKey, Observation};

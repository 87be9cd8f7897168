//! Calendar alignment of sparse recovery observations.
//!
//! Turns an irregular, possibly gappy list of dated observations into dense
//! label/value sequences for the three chart windows:
//!
//! - **Week**: one bucket per observation, in input order.
//! - **Month**: 30 day buckets ending at the reference day (exact day match).
//! - **Year**: 12 month buckets ending at the reference month (rounded means).
//!
//! Every function here is pure: the reference day is passed in, never read
//! from the clock, so identical inputs always give identical output.

use std::collections::{BTreeMap, HashMap};

use time::{Date, Duration, Month};
use tracing::{debug, warn};

use super::format::{day_label, month_label, PLACEHOLDER};
use super::granularity::Granularity;
use super::observation::{metric_keys, MetricKey, Observation};

/// Index-aligned labels and per-metric values for one chart window.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    pub granularity: Granularity,
    pub labels: Vec<String>,
    pub series: BTreeMap<MetricKey, Vec<Option<f64>>>,
}

impl AlignedSeries {
    fn with_metrics(granularity: Granularity, metrics: &[MetricKey], capacity: usize) -> Self {
        Self {
            granularity,
            labels: Vec::with_capacity(capacity),
            series: metrics
                .iter()
                .map(|key| (key.clone(), Vec::with_capacity(capacity)))
                .collect(),
        }
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn values(&self, key: &str) -> Option<&[Option<f64>]> {
        self.series.get(key).map(Vec::as_slice)
    }

    /// True when every series has exactly one value per label.
    pub fn is_aligned(&self) -> bool {
        self.series
            .values()
            .all(|values| values.len() == self.labels.len())
    }

    fn push_bucket<F>(&mut self, label: String, mut value_for: F)
    where
        F: FnMut(&MetricKey) -> Option<f64>,
    {
        self.labels.push(label);
        for (key, values) in self.series.iter_mut() {
            values.push(value_for(key));
        }
    }
}

/// Aggregate using the metric keys found in `observations`.
pub fn aggregate(
    observations: &[Observation],
    granularity: Granularity,
    reference: Date,
) -> AlignedSeries {
    let metrics = metric_keys(observations);
    aggregate_with(observations, &metrics, granularity, reference)
}

/// Aggregate with an explicit metric set; metrics absent from the input come
/// out as all-`None` series of the right length.
pub fn aggregate_with(
    observations: &[Observation],
    metrics: &[MetricKey],
    granularity: Granularity,
    reference: Date,
) -> AlignedSeries {
    match granularity {
        Granularity::Week => week_view(observations, metrics),
        Granularity::Month => month_view(observations, metrics, reference),
        Granularity::Year => year_view(observations, metrics, reference),
    }
}

fn week_view(observations: &[Observation], metrics: &[MetricKey]) -> AlignedSeries {
    let mut view = AlignedSeries::with_metrics(Granularity::Week, metrics, observations.len());
    for observation in observations {
        let label = observation
            .date
            .map(day_label)
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        view.push_bucket(label, |key| observation.metrics.get(key).copied());
    }
    view
}

fn month_view(
    observations: &[Observation],
    metrics: &[MetricKey],
    reference: Date,
) -> AlignedSeries {
    let window = Granularity::Month.window_len();

    // First observation for a day wins.
    let mut by_day: HashMap<Date, &Observation> = HashMap::with_capacity(observations.len());
    for observation in observations {
        if let Some(date) = observation.date {
            by_day.entry(date).or_insert(observation);
        }
    }

    let mut view = AlignedSeries::with_metrics(Granularity::Month, metrics, window);
    for back in (0..window).rev() {
        let day = reference.saturating_sub(Duration::days(back as i64));
        let hit = by_day.get(&day);
        view.push_bucket(day_label(day), |key| {
            hit.and_then(|observation| observation.metrics.get(key).copied())
        });
    }
    view
}

fn year_view(observations: &[Observation], metrics: &[MetricKey], reference: Date) -> AlignedSeries {
    let window = Granularity::Year.window_len();

    let mut buckets: HashMap<(i32, Month), Vec<&Observation>> = HashMap::new();
    for observation in observations {
        if let Some(date) = observation.date {
            buckets
                .entry((date.year(), date.month()))
                .or_default()
                .push(observation);
        }
    }

    let mut view = AlignedSeries::with_metrics(Granularity::Year, metrics, window);
    for back in (0..window).rev() {
        let (year, month) = months_before(reference.year(), reference.month(), back);
        let label = Date::from_calendar_date(year, month, 1)
            .map(month_label)
            .unwrap_or_else(|_| PLACEHOLDER.to_string());

        match buckets.get(&(year, month)) {
            Some(items) if !items.is_empty() => {
                view.push_bucket(label, |key| rounded_mean(items, key));
            }
            _ => view.push_bucket(label, |_| None),
        }
    }

    debug!(
        event = "year_view",
        populated_months = buckets.len(),
        "bucketed observations by month"
    );
    view
}

/// Step `back` calendar months before `(year, month)`.
fn months_before(mut year: i32, mut month: Month, back: usize) -> (i32, Month) {
    for _ in 0..back {
        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }
    (year, month)
}

/// Mean over the observations that carry `key`, rounded half-up.
fn rounded_mean(items: &[&Observation], key: &MetricKey) -> Option<f64> {
    let (sum, count) = items
        .iter()
        .filter_map(|observation| observation.metrics.get(key))
        .fold((0.0_f64, 0_usize), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        return None;
    }
    Some(round_half_up(sum / count as f64))
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// The three precomputed recovery views.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryViews {
    pub week: AlignedSeries,
    pub month: AlignedSeries,
    pub year: AlignedSeries,
}

impl RecoveryViews {
    /// Compute all three windows once.
    ///
    /// The week view only receives the trailing seven rows and expects them to
    /// be consecutive days ending at `reference`; a mismatch is logged, not
    /// repaired.
    pub fn compute(observations: &[Observation], metrics: &[MetricKey], reference: Date) -> Self {
        let week_len = Granularity::Week.window_len();
        let week_rows = &observations[observations.len().saturating_sub(week_len)..];
        if !is_contiguous_week(week_rows, reference) {
            warn!(
                event = "week_view",
                status = "non_contiguous",
                rows = week_rows.len(),
                reference = %reference,
                "week rows are not seven consecutive days ending at the reference day"
            );
        }

        Self {
            week: aggregate_with(week_rows, metrics, Granularity::Week, reference),
            month: aggregate_with(observations, metrics, Granularity::Month, reference),
            year: aggregate_with(observations, metrics, Granularity::Year, reference),
        }
    }

    pub fn get(&self, granularity: Granularity) -> &AlignedSeries {
        match granularity {
            Granularity::Week => &self.week,
            Granularity::Month => &self.month,
            Granularity::Year => &self.year,
        }
    }

    /// Resolve a timeframe key (`1W`, `1M`, `1Y`). Unknown keys yield `None`
    /// so the caller keeps whatever it was showing.
    pub fn select(&self, key: &str) -> Option<&AlignedSeries> {
        match key.parse::<Granularity>() {
            Ok(granularity) => Some(self.get(granularity)),
            Err(err) => {
                warn!(event = "timeframe_select", status = "ignored", "{err}");
                None
            }
        }
    }
}

fn is_contiguous_week(rows: &[Observation], reference: Date) -> bool {
    let week_len = Granularity::Week.window_len();
    if rows.len() != week_len {
        return false;
    }
    rows.iter().enumerate().all(|(idx, observation)| {
        let back = (week_len - 1 - idx) as i64;
        observation.date == Some(reference.saturating_sub(Duration::days(back)))
    })
}

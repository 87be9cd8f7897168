//! Per-biomarker histories rebuilt from labeled table text.
//!
//! Rows arrive as `(key, period label, raw value text)` triples. Each row with
//! a readable number and period is appended to its key's history in encounter
//! order; once the pass is done every history is sorted by date. The result is
//! an immutable value the hover trend chart reads from.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use time::{macros::format_description, Date};
use tracing::{debug, trace, warn};

use super::format::trend_label;
use super::observation::parse_day;

/// Minimum number of points before a trend is worth drawing.
pub const MIN_TREND_POINTS: usize = 2;

static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]+(\.[0-9]+)?").expect("number pattern is a valid regex")
});

/// One biomarker cell as read from a results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledTextObservation {
    pub key: String,
    pub period_label: String,
    pub raw_text: String,
}

impl LabeledTextObservation {
    pub fn new(
        key: impl Into<String>,
        period_label: impl Into<String>,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            period_label: period_label.into(),
            raw_text: raw_text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPoint {
    pub date: Date,
    pub period_label: String,
    pub value: f64,
}

/// Labels and values ready for the trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub key: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Chronologically sorted histories keyed by biomarker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BiomarkerHistories {
    histories: HashMap<String, Vec<HistoryPoint>>,
}

impl BiomarkerHistories {
    pub fn history_for(&self, key: &str) -> Option<&[HistoryPoint]> {
        self.histories.get(key).map(Vec::as_slice)
    }

    /// Trend data for `key`, only when there are enough points to show one.
    pub fn trend_for(&self, key: &str) -> Option<TrendSeries> {
        let history = self.history_for(key)?;
        if history.len() < MIN_TREND_POINTS {
            return None;
        }
        Some(TrendSeries {
            key: key.to_string(),
            labels: history.iter().map(|point| trend_label(point.date)).collect(),
            values: history.iter().map(|point| point.value).collect(),
        })
    }

    pub fn has_trend(&self, key: &str) -> bool {
        self.history_for(key)
            .is_some_and(|history| history.len() >= MIN_TREND_POINTS)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.histories.keys().map(String::as_str)
    }
}

/// Build histories from table rows in a single pass, then sort each by date.
pub fn extract_histories<'a, I>(rows: I) -> BiomarkerHistories
where
    I: IntoIterator<Item = &'a LabeledTextObservation>,
{
    let mut histories: HashMap<String, Vec<HistoryPoint>> = HashMap::new();
    let mut skipped = 0usize;

    for row in rows {
        let Some(value) = parse_value(&row.raw_text) else {
            trace!(key = %row.key, raw = %row.raw_text, "no numeric value; row skipped");
            skipped += 1;
            continue;
        };
        let Some(date) = parse_period(&row.period_label) else {
            warn!(
                key = %row.key,
                period = %row.period_label,
                "unreadable period label; row skipped"
            );
            skipped += 1;
            continue;
        };

        histories.entry(row.key.clone()).or_default().push(HistoryPoint {
            date,
            period_label: row.period_label.clone(),
            value,
        });
    }

    for history in histories.values_mut() {
        history.sort_by_key(|point| point.date);
    }

    debug!(
        event = "extract_histories",
        keys = histories.len(),
        skipped,
        "biomarker histories ready"
    );
    BiomarkerHistories { histories }
}

/// First decimal number in `raw`, e.g. `"72 ms"` -> `72.0`.
pub fn parse_value(raw: &str) -> Option<f64> {
    NUMBER
        .find(raw)
        .and_then(|found| found.as_str().parse::<f64>().ok())
}

/// Parse a results-period heading into a day.
///
/// Accepts ISO days, slash dates (`2026/01/15`, `01/15/2026`) and English
/// month-name forms with or without a comma or abbreviation dot. Month-only
/// headings (`"January 2026"`, `"2026-01"`) resolve to the first of the month.
pub fn parse_period(label: &str) -> Option<Date> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    if let Some(date) = parse_day(label) {
        return Some(date);
    }

    let normalized = label
        .replace([',', '.'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let formats = [
        format_description!(
            "[month repr:long case_sensitive:false] [day padding:none] [year]"
        ),
        format_description!(
            "[month repr:short case_sensitive:false] [day padding:none] [year]"
        ),
        format_description!(
            "[day padding:none] [month repr:long case_sensitive:false] [year]"
        ),
        format_description!(
            "[day padding:none] [month repr:short case_sensitive:false] [year]"
        ),
        format_description!("[year]/[month padding:none]/[day padding:none]"),
        format_description!("[month padding:none]/[day padding:none]/[year]"),
        format_description!("[year]-[month padding:none]-[day padding:none]"),
    ];

    let day_first = format!("1 {normalized}");
    let iso_month = format!("{normalized}-01");
    let parsed = [normalized.as_str(), day_first.as_str(), iso_month.as_str()]
        .into_iter()
        .find_map(|candidate| {
            formats
                .iter()
                .find_map(|format| Date::parse(candidate, *format).ok())
        });
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn row(key: &str, period: &str, raw: &str) -> LabeledTextObservation {
        LabeledTextObservation::new(key, period, raw)
    }

    #[test]
    fn value_parsing_takes_first_number() {
        assert_eq!(parse_value("72 ms"), Some(72.0));
        assert_eq!(parse_value("5.4 %"), Some(5.4));
        assert_eq!(parse_value("< 0.5 mg/L (ref 1.0)"), Some(0.5));
        assert_eq!(parse_value("N/A"), None);
        assert_eq!(parse_value(""), None);
    }

    #[test]
    fn period_parsing_accepts_common_headings() {
        assert_eq!(parse_period("2026-01-15"), Some(date!(2026 - 01 - 15)));
        assert_eq!(parse_period("January 15, 2026"), Some(date!(2026 - 01 - 15)));
        assert_eq!(parse_period("Jan 15, 2026"), Some(date!(2026 - 01 - 15)));
        assert_eq!(parse_period("15 Jan 2026"), Some(date!(2026 - 01 - 15)));
        assert_eq!(parse_period("January 2026"), Some(date!(2026 - 01 - 01)));
        assert_eq!(parse_period("  jul 2025 "), Some(date!(2025 - 07 - 01)));
        assert_eq!(parse_period("January 15 2026"), Some(date!(2026 - 01 - 15)));
        assert_eq!(parse_period("Jan. 15, 2026"), Some(date!(2026 - 01 - 15)));
        assert_eq!(parse_period("Jan. 2026"), Some(date!(2026 - 01 - 01)));
        assert_eq!(parse_period("2026-01"), Some(date!(2026 - 01 - 01)));
        assert_eq!(parse_period("2026/01/15"), Some(date!(2026 - 01 - 15)));
        assert_eq!(parse_period("01/15/2026"), Some(date!(2026 - 01 - 15)));
        assert_eq!(parse_period("1/5/2026"), Some(date!(2026 - 01 - 05)));
        assert_eq!(parse_period("Q3"), None);
    }

    #[test]
    fn repeated_dates_are_all_retained() {
        let rows = vec![
            row("ldl", "2026-01-01", "98"),
            row("ldl", "2026-01-01", "101"),
        ];
        let histories = extract_histories(&rows);
        assert_eq!(histories.history_for("ldl").map(<[_]>::len), Some(2));
    }

    #[test]
    fn iso_month_headings_build_a_history() {
        let rows = vec![row("ldl", "2026-01", "96"), row("ldl", "2025-07", "108")];
        let histories = extract_histories(&rows);
        let ldl = histories.history_for("ldl").unwrap();
        assert_eq!(ldl.len(), 2);
        assert_eq!(ldl[0].date, date!(2025 - 07 - 01));
        assert_eq!(ldl[1].value, 96.0);
    }

    #[test]
    fn unreadable_period_skips_row_only() {
        let rows = vec![
            row("ldl", "sometime", "98"),
            row("ldl", "2026-01-01", "101"),
        ];
        let histories = extract_histories(&rows);
        let ldl = histories.history_for("ldl").unwrap();
        assert_eq!(ldl.len(), 1);
        assert_eq!(ldl[0].value, 101.0);
    }

    #[test]
    fn trend_requires_two_points() {
        let rows = vec![
            row("hba1c", "July 2025", "5.6 %"),
            row("hba1c", "January 2026", "5.4 %"),
            row("vitd", "January 2026", "32 ng/mL"),
        ];
        let histories = extract_histories(&rows);

        assert!(histories.has_trend("hba1c"));
        assert!(!histories.has_trend("vitd"));
        assert!(histories.trend_for("vitd").is_none());
        assert!(histories.trend_for("missing").is_none());

        let trend = histories.trend_for("hba1c").unwrap();
        assert_eq!(trend.labels, vec!["7/25", "1/26"]);
        assert_eq!(trend.values, vec![5.6, 5.4]);
    }

    #[test]
    fn empty_input_gives_empty_mapping() {
        let histories = extract_histories(std::iter::empty());
        assert!(histories.is_empty());
        assert_eq!(histories.keys().count(), 0);
    }
}

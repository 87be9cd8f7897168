//! Calendar alignment of recovery metrics through the public API.

use time::macros::date;
use time::{Date, Duration};
use ui::core::{
    aggregate, aggregate_with, Dataset, Granularity, MetricKey, Observation, RecoveryViews,
};

const REFERENCE: Date = date!(2026 - 02 - 03);

fn week_of_sleep(values: &[f64]) -> Vec<Observation> {
    let start = REFERENCE - Duration::days(values.len() as i64 - 1);
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            Observation::new(start + Duration::days(idx as i64))
                .with_metric("sleep", *value)
                .with_metric("hrv", 60.0 + idx as f64)
        })
        .collect()
}

#[test]
fn every_view_has_its_fixed_bucket_count() {
    let observations = week_of_sleep(&[64.0, 85.0, 87.0, 84.0, 81.0, 57.0, 78.0]);

    for granularity in Granularity::ALL {
        let view = aggregate(&observations, granularity, REFERENCE);
        assert_eq!(view.len(), granularity.window_len(), "{granularity}");
        assert!(view.is_aligned(), "{granularity} series out of step with labels");
        assert_eq!(view.series.len(), 2);
    }
}

#[test]
fn week_view_keeps_input_values_and_order() {
    let sleep = [64.0, 85.0, 87.0, 84.0, 81.0, 57.0, 78.0];
    let view = aggregate(&week_of_sleep(&sleep), Granularity::Week, REFERENCE);

    let expected: Vec<Option<f64>> = sleep.iter().copied().map(Some).collect();
    assert_eq!(view.values("sleep"), Some(expected.as_slice()));
    assert_eq!(
        view.labels,
        ["28 Jan", "29 Jan", "30 Jan", "31 Jan", "1 Feb", "2 Feb", "3 Feb"]
    );
}

#[test]
fn month_view_leaves_gaps_between_sparse_days() {
    let first = REFERENCE - Duration::days(12);
    let second = first + Duration::days(5);
    let observations = vec![
        Observation::new(first).with_metric("sleep", 70.0),
        Observation::new(second).with_metric("sleep", 80.0),
    ];

    let view = aggregate(&observations, Granularity::Month, REFERENCE);
    let sleep = view.values("sleep").unwrap();
    let first_idx = 29 - 12;
    let second_idx = first_idx + 5;

    assert_eq!(sleep[first_idx], Some(70.0));
    assert_eq!(sleep[second_idx], Some(80.0));
    assert!(sleep[first_idx + 1..second_idx].iter().all(Option::is_none));
    assert_eq!(sleep.iter().flatten().count(), 2);
    assert_eq!(view.labels.last().map(String::as_str), Some("3 Feb"));
}

#[test]
fn year_view_rounds_the_monthly_mean() {
    let observations = vec![
        Observation::new(date!(2025 - 11 - 02)).with_metric("sleep", 10.0),
        Observation::new(date!(2025 - 11 - 14)).with_metric("sleep", 20.0),
        Observation::new(date!(2025 - 11 - 29)).with_metric("sleep", 33.0),
    ];

    let view = aggregate(&observations, Granularity::Year, REFERENCE);
    let nov = view.labels.iter().position(|label| label == "Nov").unwrap();

    assert_eq!(view.values("sleep").unwrap()[nov], Some(21.0));
    assert_eq!(view.labels.first().map(String::as_str), Some("Mar"));
    assert_eq!(view.labels.last().map(String::as_str), Some("Feb"));
}

#[test]
fn aggregation_is_repeatable() {
    let dataset = Dataset::builtin().unwrap();
    let metrics = dataset.metric_keys();

    for granularity in Granularity::ALL {
        let first = aggregate_with(&dataset.recovery, &metrics, granularity, dataset.reference_date);
        let second = aggregate_with(&dataset.recovery, &metrics, granularity, dataset.reference_date);
        assert_eq!(first, second);
    }
}

#[test]
fn empty_input_still_produces_full_windows() {
    let metrics = vec![MetricKey::new("sleep"), MetricKey::new("rhr")];

    let month = aggregate_with(&[], &metrics, Granularity::Month, REFERENCE);
    assert_eq!(month.len(), 30);
    assert!(month.series.values().flatten().all(Option::is_none));

    let year = aggregate_with(&[], &metrics, Granularity::Year, REFERENCE);
    assert_eq!(year.len(), 12);
    assert!(year.is_aligned());
}

#[test]
fn builtin_views_end_on_the_reference_day() {
    let dataset = Dataset::builtin().unwrap();
    let views = RecoveryViews::compute(
        &dataset.recovery,
        &dataset.metric_keys(),
        dataset.reference_date,
    );

    assert_eq!(
        views.week.values("sleep"),
        Some([68.0, 66.0, 78.0, 78.0, 79.0, 62.0, 82.0].map(Some).as_slice())
    );
    assert_eq!(views.month.labels.last().map(String::as_str), Some("3 Feb"));
    // The window opens on 5 Jan; rows start on 16 Jan.
    let hrv = views.month.values("hrv").unwrap();
    assert!(hrv[..11].iter().all(Option::is_none));
    assert!(hrv[11..].iter().all(Option::is_some));

    assert!(views.select("1Y").is_some());
    assert!(views.select("5Y").is_none());
}

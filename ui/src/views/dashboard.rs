use dioxus::prelude::*;
use tracing::{error, info};

use crate::charts::{cell_origin, RecoveryChart, TrendHover, TrendTooltip};
use crate::core::{
    extract_histories, BiomarkerHistories, BiomarkerPeriod, BiomarkerRow, Dataset, DatasetError,
    RecoveryViews,
};
use crate::t;

/// Everything the dashboard derives from one dataset load.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub dataset: Dataset,
    pub views: RecoveryViews,
    pub histories: BiomarkerHistories,
}

impl DashboardData {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let views = RecoveryViews::compute(
            &dataset.recovery,
            &dataset.metric_keys(),
            dataset.reference_date,
        );
        let histories = extract_histories(&dataset.text_observations());

        info!(
            event = "dashboard_ready",
            recovery_rows = dataset.recovery.len(),
            biomarkers = histories.len(),
            "dashboard data prepared"
        );

        Self {
            dataset,
            views,
            histories,
        }
    }
}

/// Loaded dashboard data or the reason it could not be loaded. The reason is
/// the error detail only; the page adds the localized heading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub data: Option<DashboardData>,
    pub error: Option<String>,
}

impl DashboardState {
    pub fn load() -> Self {
        Self::from_result(Dataset::builtin())
    }

    pub fn from_result(result: Result<Dataset, DatasetError>) -> Self {
        match result {
            Ok(dataset) => Self {
                data: Some(DashboardData::from_dataset(dataset)),
                error: None,
            },
            Err(err) => {
                error!(event = "dataset_load", status = "error", "{err}");
                Self {
                    data: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    let state = use_hook(DashboardState::load);
    let hover = use_signal(|| Option::<TrendHover>::None);
    let visible = use_signal(|| false);

    let Some(data) = state.data else {
        let message = state.error.unwrap_or_default();
        return rsx! {
            section { class: "page page-dashboard",
                h1 { {t!("dashboard-title")} }
                section { class: "dashboard-card dashboard-card--error",
                    h2 { {t!("dashboard-load-error")} }
                    p { class: "dashboard-card__placeholder", "{message}" }
                }
            }
        };
    };

    let DashboardData {
        dataset,
        views,
        histories,
    } = data;

    rsx! {
        section { class: "page page-dashboard",
            h1 { {t!("dashboard-title")} }
            p { class: "page-dashboard__intro", {t!("dashboard-intro")} }

            RecoveryChart { views: views, metrics: dataset.metrics.clone() }

            section { class: "dashboard-card biomarkers",
                div { class: "dashboard-card__header",
                    h2 { {t!("biomarkers-title")} }
                    span { class: "dashboard-card__meta", {t!("biomarkers-hint")} }
                }

                if dataset.biomarkers.is_empty() {
                    p { class: "dashboard-card__placeholder", {t!("biomarkers-empty")} }
                } else {
                    for period in dataset.biomarkers.iter() {
                        {render_period(period, &histories, hover, visible)}
                    }
                }
            }

            TrendTooltip { hover: hover(), visible: visible() }
        }
    }
}

fn render_period(
    period: &BiomarkerPeriod,
    histories: &BiomarkerHistories,
    hover: Signal<Option<TrendHover>>,
    visible: Signal<bool>,
) -> Element {
    rsx! {
        div { class: "biomarker-period",
            h4 { "{period.label}" }
            table { class: "biomarker-table",
                thead {
                    tr {
                        th { {t!("biomarkers-col-marker")} }
                        th { {t!("biomarkers-col-value")} }
                        th { {t!("biomarkers-col-range")} }
                    }
                }
                tbody {
                    for row in period.rows.iter() {
                        {render_row(row, histories, hover, visible)}
                    }
                }
            }
        }
    }
}

fn render_row(
    row: &BiomarkerRow,
    histories: &BiomarkerHistories,
    mut hover: Signal<Option<TrendHover>>,
    mut visible: Signal<bool>,
) -> Element {
    let trend = histories.trend_for(&row.marker);
    let name_class = if trend.is_some() {
        "biomarker-table__marker biomarker-table__marker--trend"
    } else {
        "biomarker-table__marker"
    };
    let name = row.name.clone();
    let range = row.range.clone().unwrap_or_default();

    rsx! {
        tr { key: "{row.marker}",
            td {
                class: name_class,
                "data-marker": "{row.marker}",
                onmouseenter: move |evt: MouseEvent| {
                    // A single reading has no trend to draw.
                    if let Some(trend) = trend.clone() {
                        let page = evt.page_coordinates();
                        let within = evt.element_coordinates();
                        let (left, top) = cell_origin((page.x, page.y), (within.x, within.y));
                        hover.set(Some(TrendHover::beside_cell(name.clone(), trend, left, top)));
                        visible.set(true);
                    }
                },
                onmouseleave: move |_| visible.set(false),
                "{row.name}"
            }
            td { class: "biomarker-table__value", "{row.value}" }
            td { class: "biomarker-table__range", "{range}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_state_has_views_and_histories() {
        let state = DashboardState::load();
        assert!(state.error.is_none());
        let data = state.data.unwrap();
        assert_eq!(data.views.week.len(), 7);
        assert_eq!(data.views.month.len(), 30);
        assert_eq!(data.views.year.len(), 12);
        assert!(data.histories.has_trend("ldl"));
        assert!(!data.histories.has_trend("testosterone"));
    }

    #[test]
    fn load_error_is_reported_not_raised() {
        let state = DashboardState::from_result(Dataset::from_json("not json"));
        assert!(state.data.is_none());
        assert!(state
            .error
            .unwrap()
            .starts_with("malformed dataset document"));
    }
}

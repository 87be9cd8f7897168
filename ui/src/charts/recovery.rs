use dioxus::prelude::*;
use tracing::debug;

use crate::core::{format, Granularity, MetricSpec, RecoveryViews};
use crate::t;

use super::svg::recovery_svg;

/// Recovery metrics chart with week / month / year switching.
///
/// All three views are computed up front; switching only swaps which one is
/// rendered. An unrecognised timeframe key leaves the current view in place.
#[component]
pub fn RecoveryChart(views: RecoveryViews, metrics: Vec<MetricSpec>) -> Element {
    let active = use_signal(|| Granularity::Week);

    let view = views.get(active());
    let markup = recovery_svg(view, &metrics);

    let legend: Vec<LegendEntry> = metrics
        .iter()
        .map(|spec| LegendEntry {
            label: spec.label.clone(),
            color: spec.color.clone(),
            latest: format::format_value(
                view.values(spec.key.as_str())
                    .and_then(|values| values.iter().rev().find_map(|value| *value)),
                0,
            ),
        })
        .collect();

    rsx! {
        section { class: "dashboard-card recovery-chart",
            div { class: "dashboard-card__header",
                h2 { {t!("recovery-title")} }
                div { class: "timeframe-switch",
                    for granularity in Granularity::ALL {
                        {render_timeframe_button(granularity, active, views.clone())}
                    }
                }
            }

            ul { class: "recovery-chart__legend",
                for entry in legend.into_iter() {
                    li { class: "recovery-chart__legend-item",
                        span {
                            class: "recovery-chart__legend-swatch",
                            style: "background: {entry.color}",
                        }
                        span { class: "recovery-chart__legend-label", "{entry.label}" }
                        span { class: "recovery-chart__legend-value", "{entry.latest}" }
                    }
                }
            }

            div {
                class: "recovery-chart__canvas",
                dangerous_inner_html: "{markup}",
            }
        }
    }
}

#[derive(Clone, PartialEq)]
struct LegendEntry {
    label: String,
    color: String,
    latest: String,
}

fn timeframe_label(granularity: Granularity) -> String {
    match granularity {
        Granularity::Week => t!("timeframe-week"),
        Granularity::Month => t!("timeframe-month"),
        Granularity::Year => t!("timeframe-year"),
    }
}

fn render_timeframe_button(
    granularity: Granularity,
    mut active: Signal<Granularity>,
    views: RecoveryViews,
) -> Element {
    let is_active = active() == granularity;
    let key = granularity.key();
    let label = timeframe_label(granularity);

    rsx! {
        button {
            r#type: "button",
            class: format!(
                "timeframe-btn {}",
                if is_active { "timeframe-btn--active" } else { "" }
            ),
            "data-timeframe": key,
            onclick: move |_| {
                if let Some(next) = views.select(key) {
                    debug!(event = "timeframe_switch", timeframe = key, buckets = next.len());
                    active.set(next.granularity);
                }
            },
            "{label}"
        }
    }
}

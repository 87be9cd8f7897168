use dioxus::prelude::*;

use crate::core::{format, TrendSeries};

use super::svg::trend_svg;

const OFFSET_X: f64 = 20.0;
const OFFSET_Y: f64 = -160.0;

/// What the tooltip should show and where (page coordinates of its top-left corner).
#[derive(Debug, Clone, PartialEq)]
pub struct TrendHover {
    pub name: String,
    pub trend: TrendSeries,
    pub left: f64,
    pub top: f64,
}

impl TrendHover {
    /// Place the tooltip beside a hovered cell whose top-left corner sits at
    /// `(cell_left, cell_top)` in page coordinates.
    pub fn beside_cell(
        name: impl Into<String>,
        trend: TrendSeries,
        cell_left: f64,
        cell_top: f64,
    ) -> Self {
        Self {
            name: name.into(),
            trend,
            left: cell_left + OFFSET_X,
            top: cell_top + OFFSET_Y,
        }
    }
}

/// Top-left corner of the event target in page coordinates, from the
/// pointer's page position and its offset inside the target.
pub fn cell_origin(page: (f64, f64), within_cell: (f64, f64)) -> (f64, f64) {
    (page.0 - within_cell.0, page.1 - within_cell.1)
}

/// Floating trend chart for a single biomarker.
///
/// The last trend stays mounted while hidden so the fade-out has something
/// to fade.
#[component]
pub fn TrendTooltip(#[props(!optional)] hover: Option<TrendHover>, visible: bool) -> Element {
    let opacity = if visible && hover.is_some() { "1" } else { "0" };

    let Some(hover) = hover else {
        return rsx! {
            div { id: "trend-tooltip", class: "trend-tooltip", style: "opacity: 0" }
        };
    };

    let markup = trend_svg(&hover.trend);
    let first = hover.trend.values.first().copied().unwrap_or(f64::NAN);
    let last = hover.trend.values.last().copied().unwrap_or(f64::NAN);
    let delta = last - first;
    let delta_class = if delta > 0.0 {
        "trend-tooltip__delta trend-tooltip__delta--up"
    } else if delta < 0.0 {
        "trend-tooltip__delta trend-tooltip__delta--down"
    } else {
        "trend-tooltip__delta"
    };
    let delta_text = if delta > 0.0 {
        format!("+{}", format::format_number(delta, 1))
    } else {
        format::format_number(delta, 1)
    };

    rsx! {
        div {
            id: "trend-tooltip",
            class: "trend-tooltip",
            style: "left: {hover.left}px; top: {hover.top}px; opacity: {opacity}",
            div { class: "trend-tooltip__header",
                span { class: "trend-tooltip__title", "{hover.name}" }
                span { class: "{delta_class}", "{delta_text}" }
            }
            div {
                class: "trend-tooltip__canvas",
                dangerous_inner_html: "{markup}",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ldl() -> TrendSeries {
        TrendSeries {
            key: "ldl".into(),
            labels: vec!["7/25".into(), "1/26".into()],
            values: vec![108.0, 96.0],
        }
    }

    #[test]
    fn tooltip_is_offset_from_cell_corner() {
        let hover = TrendHover::beside_cell("LDL", ldl(), 300.0, 500.0);
        assert_eq!(hover.left, 320.0);
        assert_eq!(hover.top, 340.0);
    }

    #[test]
    fn position_does_not_depend_on_where_the_pointer_enters() {
        // Same cell at (120, 640), entered at two different points.
        let first = cell_origin((125.0, 652.0), (5.0, 12.0));
        let second = cell_origin((210.0, 641.0), (90.0, 1.0));
        assert_eq!(first, (120.0, 640.0));
        assert_eq!(first, second);

        let hover = TrendHover::beside_cell("LDL", ldl(), first.0, first.1);
        assert_eq!((hover.left, hover.top), (140.0, 480.0));
    }
}

//! SVG markup for the recovery and trend charts.
//!
//! Charts are emitted as plain markup strings (rendered through
//! `dangerous_inner_html`), rebuilt from scratch for every new series.

use std::fmt::Write as _;

use crate::core::{format, AlignedSeries, LineStyle, MetricSpec, TrendSeries};

use super::plot::{
    area_path, line_path, plot_points, tick_indices, Padding, PlotFrame, YRange,
    RECOVERY_SUGGESTED_RANGE, RECOVERY_Y_TICKS, TREND_Y_TICKS,
};

const GRID_COLOR: &str = "rgba(255,255,255,0.05)";
const TICK_COLOR: &str = "#a1a1a1";
const POINT_FILL: &str = "#0a0a0a";
const TREND_COLOR: &str = "#22c55e";

pub fn recovery_frame() -> PlotFrame {
    PlotFrame::new(
        720.0,
        260.0,
        Padding {
            top: 16.0,
            right: 16.0,
            bottom: 28.0,
            left: 36.0,
        },
    )
}

pub fn trend_frame() -> PlotFrame {
    PlotFrame::new(
        220.0,
        120.0,
        Padding {
            top: 10.0,
            right: 8.0,
            bottom: 10.0,
            left: 30.0,
        },
    )
}

/// Multi-metric recovery chart for one aligned view.
pub fn recovery_svg(view: &AlignedSeries, metrics: &[MetricSpec]) -> String {
    let frame = recovery_frame();
    let (lo, hi) = RECOVERY_SUGGESTED_RANGE;
    let range = YRange::suggested(
        view.series.values().flatten().flatten().copied(),
        lo,
        hi,
    );

    let mut svg = open_svg(&frame, "recovery-chart__svg");
    write_y_axis(&mut svg, &frame, range, RECOVERY_Y_TICKS, 0);

    for spec in metrics {
        let Some(values) = view.values(spec.key.as_str()) else {
            continue;
        };
        let color = escape_xml(&spec.color);

        if spec.style == LineStyle::Area {
            if let Some(area) = area_path(values, &frame, range) {
                let _ = write!(
                    svg,
                    "<path d='{area}' fill='{color}' fill-opacity='0.15' stroke='none'/>"
                );
            }
        }
        if let Some(line) = line_path(values, &frame, range) {
            let dash = if spec.style == LineStyle::Dashed {
                " stroke-dasharray='5 5'"
            } else {
                ""
            };
            let _ = write!(
                svg,
                "<path class='recovery-chart__line' data-metric='{key}' d='{line}' fill='none' stroke='{color}' stroke-width='2' stroke-linejoin='round'{dash}/>",
                key = escape_xml(spec.key.as_str())
            );
        }
        if spec.style == LineStyle::Area {
            for point in plot_points(values, &frame, range) {
                let title = format!(
                    "{}: {}",
                    view.labels.get(point.index).map(String::as_str).unwrap_or(""),
                    format::format_value(values[point.index], 0)
                );
                let _ = write!(
                    svg,
                    "<circle cx='{:.1}' cy='{:.1}' r='3' fill='{POINT_FILL}' stroke='{color}' stroke-width='2'><title>{}</title></circle>",
                    point.x,
                    point.y,
                    escape_xml(&title)
                );
            }
        }
    }

    let label_y = frame.height - 8.0;
    for index in tick_indices(view.len(), view.granularity.max_x_ticks()) {
        let _ = write!(
            svg,
            "<text x='{:.1}' y='{label_y:.1}' fill='{TICK_COLOR}' font-size='10' text-anchor='middle'>{}</text>",
            frame.x_at(index, view.len()),
            escape_xml(&view.labels[index])
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Compact single-biomarker trend; the x axis is hidden, points carry titles.
pub fn trend_svg(trend: &TrendSeries) -> String {
    let frame = trend_frame();
    let range = YRange::fit(trend.values.iter().copied());
    let values: Vec<Option<f64>> = trend.values.iter().copied().map(Some).collect();

    let mut svg = open_svg(&frame, "trend-tooltip__svg");
    write_y_axis(&mut svg, &frame, range, TREND_Y_TICKS, 1);

    if let Some(area) = area_path(&values, &frame, range) {
        let _ = write!(
            svg,
            "<path d='{area}' fill='{TREND_COLOR}' fill-opacity='0.2' stroke='none'/>"
        );
    }
    if let Some(line) = line_path(&values, &frame, range) {
        let _ = write!(
            svg,
            "<path d='{line}' fill='none' stroke='{TREND_COLOR}' stroke-width='2' stroke-linejoin='round'/>"
        );
    }
    for point in plot_points(&values, &frame, range) {
        let title = format!(
            "{}: {}",
            trend.labels.get(point.index).map(String::as_str).unwrap_or(""),
            format::format_number(trend.values[point.index], 1)
        );
        let _ = write!(
            svg,
            "<circle cx='{:.1}' cy='{:.1}' r='4' fill='{POINT_FILL}' stroke='{TREND_COLOR}' stroke-width='2'><title>{}</title></circle>",
            point.x,
            point.y,
            escape_xml(&title)
        );
    }

    svg.push_str("</svg>");
    svg
}

fn open_svg(frame: &PlotFrame, class: &str) -> String {
    format!(
        "<svg xmlns='http://www.w3.org/2000/svg' class='{class}' viewBox='0 0 {w} {h}' preserveAspectRatio='none' role='img'>",
        w = frame.width,
        h = frame.height
    )
}

fn write_y_axis(svg: &mut String, frame: &PlotFrame, range: YRange, ticks: usize, decimals: usize) {
    let right = frame.width - frame.padding.right;
    let label_x = frame.padding.left - 6.0;
    for tick in range.ticks(ticks) {
        let y = frame.y_at(tick, range);
        let _ = write!(
            svg,
            "<line x1='{:.1}' y1='{y:.1}' x2='{right:.1}' y2='{y:.1}' stroke='{GRID_COLOR}'/><text x='{label_x:.1}' y='{:.1}' fill='{TICK_COLOR}' font-size='10' text-anchor='end'>{}</text>",
            frame.padding.left,
            y + 3.0,
            format::format_number(tick, decimals)
        );
    }
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{aggregate, Granularity, MetricKey, Observation};
    use time::macros::date;

    fn specs() -> Vec<MetricSpec> {
        vec![
            MetricSpec {
                key: MetricKey::from("sleep"),
                label: "Sleep Score".into(),
                color: "#22c55e".into(),
                style: LineStyle::Area,
            },
            MetricSpec {
                key: MetricKey::from("hrv"),
                label: "HRV".into(),
                color: "#eab308".into(),
                style: LineStyle::Dashed,
            },
        ]
    }

    #[test]
    fn recovery_svg_draws_one_line_per_metric() {
        let observations = vec![
            Observation::new(date!(2026 - 02 - 02))
                .with_metric("sleep", 62.0)
                .with_metric("hrv", 68.0),
            Observation::new(date!(2026 - 02 - 03))
                .with_metric("sleep", 82.0)
                .with_metric("hrv", 65.0),
        ];
        let view = aggregate(&observations, Granularity::Week, date!(2026 - 02 - 03));
        let svg = recovery_svg(&view, &specs());

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("class='recovery-chart__line'").count(), 2);
        assert!(svg.contains("stroke-dasharray='5 5'"));
        assert!(svg.contains("<title>3 Feb: 82</title>"));
        assert!(svg.contains(">2 Feb</text>"));
    }

    #[test]
    fn empty_month_still_renders_axis_labels() {
        let view = aggregate(&[], Granularity::Month, date!(2026 - 02 - 03));
        let svg = recovery_svg(&view, &specs());
        assert!(!svg.contains("recovery-chart__line"));
        assert_eq!(svg.matches("text-anchor='middle'").count(), 6);
    }

    #[test]
    fn trend_svg_marks_every_point() {
        let trend = TrendSeries {
            key: "ldl".into(),
            labels: vec!["2/25".into(), "7/25".into(), "1/26".into()],
            values: vec![121.0, 108.0, 96.0],
        };
        let svg = trend_svg(&trend);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("<title>1/26: 96.0</title>"));
    }

    #[test]
    fn markup_is_escaped() {
        assert_eq!(escape_xml("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");
    }
}

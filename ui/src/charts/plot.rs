//! SVG geometry for the line charts.
//!
//! Pure functions mapping aligned values onto a plot frame. Gaps (`None`) are
//! skipped and the line is drawn straight across them, so a sparse month still
//! reads as one continuous trace.

/// Recovery scores mostly sit in this band; the axis widens when data leaves it.
pub const RECOVERY_SUGGESTED_RANGE: (f64, f64) = (40.0, 100.0);

pub const RECOVERY_Y_TICKS: usize = 4;
pub const TREND_Y_TICKS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

impl PlotFrame {
    pub fn new(width: f64, height: f64, padding: Padding) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn inner_width(&self) -> f64 {
        (self.width - self.padding.left - self.padding.right).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.padding.top - self.padding.bottom).max(0.0)
    }

    /// Horizontal position of bucket `index` out of `count`; a lone bucket is centered.
    pub fn x_at(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            return self.padding.left + self.inner_width() / 2.0;
        }
        self.padding.left + self.inner_width() * index as f64 / (count - 1) as f64
    }

    pub fn y_at(&self, value: f64, range: YRange) -> f64 {
        self.padding.top + self.inner_height() * (1.0 - range.fraction(value))
    }

    /// Bottom edge of the plotting area.
    pub fn baseline(&self) -> f64 {
        self.padding.top + self.inner_height()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YRange {
    pub min: f64,
    pub max: f64,
}

impl YRange {
    /// Start from suggested bounds and widen them to cover every value.
    pub fn suggested<I>(values: I, min: f64, max: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(Self { min, max }, |range, v| Self {
                min: range.min.min(v),
                max: range.max.max(v),
            })
    }

    /// Tight bounds around the data with a little headroom on both sides.
    pub fn fit<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut bounds: Option<(f64, f64)> = None;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            bounds = Some(match bounds {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            });
        }

        match bounds {
            None => Self { min: 0.0, max: 1.0 },
            Some((lo, hi)) if (hi - lo).abs() < f64::EPSILON => Self {
                min: lo - 1.0,
                max: hi + 1.0,
            },
            Some((lo, hi)) => {
                let pad = (hi - lo) * 0.1;
                Self {
                    min: lo - pad,
                    max: hi + pad,
                }
            }
        }
    }

    /// Position of `value` within the range, 0.0 at `min` and 1.0 at `max`.
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            0.5
        } else {
            (value - self.min) / span
        }
    }

    /// Evenly spaced tick values from `min` to `max`.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.min],
            n => {
                let step = (self.max - self.min) / (n - 1) as f64;
                (0..n).map(|i| self.min + step * i as f64).collect()
            }
        }
    }
}

/// A plotted data point: bucket index and SVG coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

pub fn plot_points(values: &[Option<f64>], frame: &PlotFrame, range: YRange) -> Vec<PlotPoint> {
    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| {
            value.filter(|v| v.is_finite()).map(|v| PlotPoint {
                index,
                x: frame.x_at(index, values.len()),
                y: frame.y_at(v, range),
            })
        })
        .collect()
}

/// SVG path through every present value, spanning gaps.
pub fn line_path(values: &[Option<f64>], frame: &PlotFrame, range: YRange) -> Option<String> {
    let points = plot_points(values, frame, range);
    if points.is_empty() {
        return None;
    }

    let mut d = String::with_capacity(points.len() * 16);
    for (i, point) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            d.push(' ');
        }
        d.push_str(&format!("{cmd}{:.1} {:.1}", point.x, point.y));
    }
    Some(d)
}

/// Closed path under the line, down to the baseline.
pub fn area_path(values: &[Option<f64>], frame: &PlotFrame, range: YRange) -> Option<String> {
    let points = plot_points(values, frame, range);
    let (first, last) = (points.first()?, points.last()?);
    let line = line_path(values, frame, range)?;
    let baseline = frame.baseline();
    Some(format!(
        "{line} L{:.1} {baseline:.1} L{:.1} {baseline:.1} Z",
        last.x, first.x
    ))
}

/// Which bucket labels to draw so that at most `max_ticks` appear.
pub fn tick_indices(count: usize, max_ticks: usize) -> Vec<usize> {
    if count == 0 || max_ticks == 0 {
        return Vec::new();
    }
    if count <= max_ticks {
        return (0..count).collect();
    }
    let step = count.div_ceil(max_ticks);
    (0..count).step_by(step).collect()
}

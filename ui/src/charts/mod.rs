//! Chart components and the SVG geometry behind them.

pub mod plot;
pub mod svg;

mod recovery;
pub use recovery::RecoveryChart;

mod trend;
pub use trend::{cell_origin, TrendHover, TrendTooltip};

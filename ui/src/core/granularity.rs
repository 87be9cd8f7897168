//! The three fixed aggregation windows of the recovery chart.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Calendar unit of a single bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketUnit {
    Day,
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown timeframe key `{0}`")]
pub struct UnknownGranularity(pub String);

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Week, Granularity::Month, Granularity::Year];

    /// Number of buckets in the window.
    pub fn window_len(self) -> usize {
        match self {
            Granularity::Week => 7,
            Granularity::Month => 30,
            Granularity::Year => 12,
        }
    }

    pub fn unit(self) -> BucketUnit {
        match self {
            Granularity::Week | Granularity::Month => BucketUnit::Day,
            Granularity::Year => BucketUnit::Month,
        }
    }

    /// Timeframe key carried by the selector buttons.
    pub fn key(self) -> &'static str {
        match self {
            Granularity::Week => "1W",
            Granularity::Month => "1M",
            Granularity::Year => "1Y",
        }
    }

    /// Upper bound on x-axis labels drawn for this window.
    pub fn max_x_ticks(self) -> usize {
        match self {
            Granularity::Week => 7,
            Granularity::Month => 6,
            Granularity::Year => 12,
        }
    }
}

impl FromStr for Granularity {
    type Err = UnknownGranularity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1W" => Ok(Granularity::Week),
            "1M" => Ok(Granularity::Month),
            "1Y" => Ok(Granularity::Year),
            other => Err(UnknownGranularity(other.to_string())),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_back() {
        for granularity in Granularity::ALL {
            assert_eq!(granularity.key().parse::<Granularity>(), Ok(granularity));
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = "5Y".parse::<Granularity>().unwrap_err();
        assert_eq!(err, UnknownGranularity("5Y".into()));
        assert_eq!(err.to_string(), "unknown timeframe key `5Y`");
    }

    #[test]
    fn windows_are_fixed() {
        assert_eq!(Granularity::Week.window_len(), 7);
        assert_eq!(Granularity::Month.window_len(), 30);
        assert_eq!(Granularity::Year.window_len(), 12);
        assert_eq!(Granularity::Year.unit(), BucketUnit::Month);
        assert_eq!(Granularity::Month.unit(), BucketUnit::Day);
    }
}

//! Chart series: leak-rate trend and change/defect correlation

use serde::{Deserialize, Serialize};

/// Leak test reference threshold in percent NG
pub const LEAK_THRESHOLD: f64 = 2.0;

/// One point of the daily leak-rate trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Axis label (e.g., "Jun 13")
    pub date: String,

    /// NG rate in percent
    pub leak_rate: f64,
}

impl TrendPoint {
    pub fn above_threshold(&self) -> bool {
        self.leak_rate > LEAK_THRESHOLD
    }
}

/// Correlation strength band used for bar colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationBand {
    /// Above 0.7
    High,
    /// Above 0.5
    Medium,
    Low,
}

impl CorrelationBand {
    pub fn of(correlation: f64) -> Self {
        if correlation > 0.7 {
            CorrelationBand::High
        } else if correlation > 0.5 {
            CorrelationBand::Medium
        } else {
            CorrelationBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CorrelationBand::High => "High (>0.7)",
            CorrelationBand::Medium => "Medium (0.5-0.7)",
            CorrelationBand::Low => "Low (<0.5)",
        }
    }
}

/// A stated correlation between a change and the defect increase
///
/// The coefficients are recorded values, not computed from the trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEntry {
    /// Change label
    pub change: String,

    /// Correlation coefficient (0-1)
    pub correlation: f64,

    /// Significance
    pub p_value: f64,
}

impl CorrelationEntry {
    pub fn band(&self) -> CorrelationBand {
        CorrelationBand::of(self.correlation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_bands() {
        assert_eq!(CorrelationBand::of(0.87), CorrelationBand::High);
        assert_eq!(CorrelationBand::of(0.71), CorrelationBand::High);
        assert_eq!(CorrelationBand::of(0.7), CorrelationBand::Medium);
        assert_eq!(CorrelationBand::of(0.62), CorrelationBand::Medium);
        assert_eq!(CorrelationBand::of(0.5), CorrelationBand::Low);
        assert_eq!(CorrelationBand::of(0.23), CorrelationBand::Low);
    }

    #[test]
    fn test_threshold_crossing() {
        let p = TrendPoint {
            date: "Jun 13".to_string(),
            leak_rate: 2.9,
        };
        assert!(p.above_threshold());
        let at = TrendPoint {
            date: "Jun 08".to_string(),
            leak_rate: 2.0,
        };
        assert!(!at.above_threshold());
    }
}

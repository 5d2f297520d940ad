use autoscale_data::{DateUnit, Transform};
use serde::{Deserialize, Serialize};

/// The numeric range to build a scale over, with the metadata that steers
/// scale construction.
///
/// Date extents are expressed in days since the epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericExtent {
    pub low: f64,
    pub high: f64,
    /// When set, a date scale is built whatever the transform
    pub date_unit: Option<DateUnit>,
    pub transform: Transform,
    pub optimal_bin_count: usize,
    /// Smallest gap between distinct data values
    pub granularity: Option<f64>,
}

impl NumericExtent {
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            low,
            high,
            date_unit: None,
            transform: Transform::Linear,
            optimal_bin_count: 2,
            granularity: None,
        }
    }

    pub fn with_date_unit(self, date_unit: DateUnit) -> Self {
        Self {
            date_unit: Some(date_unit),
            ..self
        }
    }

    pub fn with_transform(self, transform: Transform) -> Self {
        Self { transform, ..self }
    }

    pub fn with_optimal_bin_count(self, optimal_bin_count: usize) -> Self {
        Self {
            optimal_bin_count,
            ..self
        }
    }

    pub fn with_granularity(self, granularity: f64) -> Self {
        Self {
            granularity: Some(granularity),
            ..self
        }
    }

    pub fn span(&self) -> f64 {
        self.high - self.low
    }
}

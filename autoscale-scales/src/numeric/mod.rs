pub mod date;
pub mod linear;
pub mod log;

use autoscale_data::{DateUnit, Transform};
use serde::{Deserialize, Serialize};

/// Family of a built scale
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScaleKind {
    Linear,
    Log,
    Date,
}

/// A finished scale: its domain and the tick positions inside it.
///
/// Divisions are in domain units, which for date scales means days since the
/// epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericScale {
    pub(crate) kind: ScaleKind,
    pub(crate) transform: Transform,
    pub(crate) min: f64,
    pub(crate) max: f64,
    pub(crate) divisions: Vec<f64>,
    pub(crate) granular: bool,
    pub(crate) date_unit: Option<DateUnit>,
}

impl NumericScale {
    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn divisions(&self) -> &[f64] {
        &self.divisions
    }

    pub fn tick_count(&self) -> usize {
        self.divisions.len()
    }

    /// Whether the divisions were widened to the data granularity
    pub fn is_granular(&self) -> bool {
        self.granular
    }

    pub fn date_unit(&self) -> Option<DateUnit> {
        self.date_unit
    }
}

/// Pads both ends of a domain by a fraction of its span
pub(crate) fn pad_domain(low: f64, high: f64, pad: [f64; 2]) -> (f64, f64) {
    let span = high - low;
    (low - pad[0] * span, high + pad[1] * span)
}

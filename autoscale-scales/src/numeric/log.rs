use autoscale_data::Transform;

use crate::extent::NumericExtent;
use crate::numeric::{pad_domain, NumericScale, ScaleKind};

const LOG_EPSILON: f64 = 1e-9;

/// Builds a base-10 log scale over the extent.
///
/// The domain is forced positive first. Zero inclusion means reaching down to
/// 1, padding is applied in log space, and `nice` rounds out to whole decades.
/// Divisions are the decades in the domain, refined with 2x and 5x steps when
/// there are too few of them for the requested tick count.
pub fn make_log_scale(
    extent: &NumericExtent,
    nice: bool,
    pad: [f64; 2],
    include_zero_tolerance: f64,
    tick_count: usize,
) -> NumericScale {
    let (low, high) = positive_domain(extent.low, extent.high);
    let (mut a, mut b) = (low.log10(), high.log10());

    if a == b {
        (a, b) = (a - 0.5, b + 0.5);
    }
    if a > 0.0 && a / b < include_zero_tolerance {
        a = 0.0;
    }
    (a, b) = pad_domain(a, b, pad);
    if nice {
        (a, b) = ((a + LOG_EPSILON).floor(), (b - LOG_EPSILON).ceil());
    }

    let (min, max) = (pow10(a), pow10(b));
    let mut divisions: Vec<f64> = decades(a, b).filter(|v| within(*v, min, max)).collect();
    if divisions.len() * 2 < tick_count {
        divisions = decades(a, b)
            .flat_map(|decade| [decade, 2.0 * decade, 5.0 * decade])
            .filter(|v| within(*v, min, max))
            .collect();
    }

    tracing::debug!(min, max, ticks = divisions.len(), "built log scale");
    NumericScale {
        kind: ScaleKind::Log,
        transform: Transform::Log,
        min,
        max,
        divisions,
        granular: false,
        date_unit: None,
    }
}

fn positive_domain(low: f64, high: f64) -> (f64, f64) {
    if !(high > 0.0) {
        (1.0, 10.0)
    } else if !(low > 0.0) {
        ((high / 10.0).min(1.0), high)
    } else {
        (low, high)
    }
}

fn pow10(exponent: f64) -> f64 {
    if exponent.fract() == 0.0 && exponent.abs() < f64::from(i32::MAX) {
        10.0_f64.powi(exponent as i32)
    } else {
        10.0_f64.powf(exponent)
    }
}

/// Powers of ten from the decade containing `a` up to the one containing `b`
fn decades(a: f64, b: f64) -> impl Iterator<Item = f64> {
    let first = (a + LOG_EPSILON).floor() as i32;
    let last = (b + LOG_EPSILON).floor() as i32;
    (first..=last).map(|e| 10.0_f64.powi(e))
}

fn within(value: f64, min: f64, max: f64) -> bool {
    value >= min * (1.0 - LOG_EPSILON) && value <= max * (1.0 + LOG_EPSILON)
}

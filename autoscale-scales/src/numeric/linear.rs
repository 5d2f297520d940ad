use autoscale_data::Transform;

use crate::array;
use crate::extent::NumericExtent;
use crate::numeric::{pad_domain, NumericScale, ScaleKind};

/// Builds a linear scale over the extent.
///
/// `include_zero_tolerance` pulls a one-signed domain out to zero when the
/// near bound is within that fraction of the far bound (0 never, 1 always).
/// Padding is a fraction of the span on each side and never pushes a bound
/// across zero. With `for_binning` the domain and divisions are aligned to a
/// single step that is never finer than the extent granularity.
pub fn make_linear_scale(
    extent: &NumericExtent,
    nice: bool,
    include_zero_tolerance: f64,
    pad: [f64; 2],
    tick_count: usize,
    for_binning: bool,
) -> NumericScale {
    let count = tick_count.max(1) as f64;
    let (mut low, mut high) = (extent.low, extent.high);

    if low == high {
        if low == 0.0 {
            (low, high) = (-1.0, 1.0);
        } else {
            let half = low.abs() / 2.0;
            (low, high) = (low - half, high + half);
        }
    }

    if low > 0.0 && low / high < include_zero_tolerance {
        low = 0.0;
    } else if high < 0.0 && high / low < include_zero_tolerance {
        high = 0.0;
    }

    let (padded_low, padded_high) = pad_domain(low, high, pad);
    low = if low >= 0.0 { padded_low.max(0.0) } else { padded_low };
    high = if high <= 0.0 { padded_high.min(0.0) } else { padded_high };

    let mut granular = false;
    let divisions = if for_binning {
        (low, high) = array::nice_domain(low, high, count);
        let mut inc = array::tick_increment(low, high, count);
        if let Some(granularity) = extent.granularity.filter(|g| *g > 0.0) {
            if !(array::step_size(inc) >= granularity) {
                inc = granularity;
                granular = true;
            }
        }
        (low, high) = array::snap_to_increment(low, high, inc);
        array::step_multiples(low, high, inc)
    } else {
        if nice {
            (low, high) = array::nice_domain(low, high, count);
        }
        array::ticks(low, high, count)
    };

    tracing::debug!(low, high, ticks = divisions.len(), granular, "built linear scale");
    NumericScale {
        kind: ScaleKind::Linear,
        transform: if extent.transform == Transform::Root {
            Transform::Root
        } else {
            Transform::Linear
        },
        min: low,
        max: high,
        divisions,
        granular,
        date_unit: None,
    }
}

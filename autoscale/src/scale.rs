use autoscale_data::Transform;
use autoscale_scales::{
    make_date_scale, make_linear_scale, make_log_scale, NumericExtent, NumericScale, ScaleError,
};

use crate::options::ScaleOptions;

/// Cap on the tick count picked automatically from the optimal bin count
pub const MAX_AUTO_TICKS: usize = 20;

/// Tick count to build with: the requested one, or one more than the optimal
/// bin count (capped) when fewer than one tick was requested
pub fn effective_tick_count(desired_tick_count: i32, optimal_bin_count: usize) -> usize {
    match usize::try_from(desired_tick_count) {
        Ok(count) if count >= 1 => count,
        _ => optimal_bin_count.min(MAX_AUTO_TICKS) + 1,
    }
}

/// Builds the scale for an extent, dispatching on its date unit and transform.
///
/// Date extents always get a date scale. Root extents get a linear scale whose
/// zero tolerance and lower padding are shrunk to act in square-root space.
#[tracing::instrument(skip_all)]
pub fn make_numeric_scale(
    extent: &NumericExtent,
    nice: bool,
    mut pad_fraction: [f64; 2],
    mut include_zero_tolerance: f64,
    desired_tick_count: i32,
    for_binning: bool,
) -> NumericScale {
    let tick_count = effective_tick_count(desired_tick_count, extent.optimal_bin_count);

    if extent.date_unit.is_some() {
        tracing::debug!(tick_count, "date scale");
        return make_date_scale(extent, nice, pad_fraction, tick_count);
    }

    match extent.transform {
        Transform::Log => {
            tracing::debug!(tick_count, "log scale");
            make_log_scale(extent, nice, pad_fraction, include_zero_tolerance, tick_count)
        }
        transform => {
            if transform == Transform::Root {
                if let Some(scaling) = root_scaling(extent.low, extent.high) {
                    include_zero_tolerance *= scaling;
                    pad_fraction[0] *= scaling;
                }
            }
            tracing::debug!(%transform, tick_count, include_zero_tolerance, "linear scale");
            make_linear_scale(
                extent,
                nice,
                include_zero_tolerance,
                pad_fraction,
                tick_count,
                for_binning,
            )
        }
    }
}

/// Correction applied to root-scale tolerances. Only defined for a positive low.
fn root_scaling(low: f64, high: f64) -> Option<f64> {
    (low > 0.0).then(|| (low / high) / (low.sqrt() / high.sqrt()))
}

/// [`make_numeric_scale`] driven by an options struct
pub fn make_numeric_scale_with(
    extent: &NumericExtent,
    options: &ScaleOptions,
) -> Result<NumericScale, ScaleError> {
    options.validate()?;
    Ok(make_numeric_scale(
        extent,
        options.nice,
        options.pad_fraction,
        options.include_zero_tolerance,
        options.desired_tick_count,
        options.for_binning,
    ))
}

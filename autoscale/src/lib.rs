//! Automatic choices for charting a field without user guidance: what kind of
//! data it holds, which transform shows its distribution best, how many bins a
//! histogram of it needs, and the nice numeric scale for an axis over it.

pub mod bins;
pub mod extent;
pub mod infer;
pub mod options;
pub mod scale;
pub mod transform;

pub use bins::optimal_bin_count;
pub use extent::extent_for_fields;
pub use infer::{convert, convert_with_rng, good_lists, is_yearly};
pub use options::ScaleOptions;
pub use scale::{make_numeric_scale, make_numeric_scale_with};
pub use transform::define_transform;

pub use autoscale_data::{DateUnit, Field, FieldKind, FieldStats, Transform, Value};
pub use autoscale_scales::{NumericExtent, NumericScale, ScaleError, ScaleKind};

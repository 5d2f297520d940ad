pub mod array;
pub mod error;
pub mod extent;
pub mod numeric;

pub use error::ScaleError;
pub use extent::NumericExtent;
pub use numeric::date::make_date_scale;
pub use numeric::linear::make_linear_scale;
pub use numeric::log::make_log_scale;
pub use numeric::{NumericScale, ScaleKind};

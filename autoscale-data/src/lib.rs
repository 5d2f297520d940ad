pub mod convert;
pub mod error;
pub mod field;
pub mod stats;
pub mod types;
pub mod value;

pub use field::Field;
pub use stats::FieldStats;
pub use types::{DateUnit, FieldKind, Transform};
pub use value::{ItemsList, Value};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScaleError {
    #[error("Invalid scale option: {0}")]
    InvalidOption(String),

    #[error("Date value out of range: {0} days since epoch")]
    DateOutOfRange(f64),

    #[error("Date axis needs more than {0} ticks")]
    TooManyTicks(usize),
}

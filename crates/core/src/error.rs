use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("planned sets must be between {min} and {max}, got {value}")]
    PlannedSetsOutOfRange { value: i64, min: u32, max: u32 },

    #[error("a weight is required for {0} exercises")]
    WeightRequired(String),

    #[error("weight must be a non-negative number, got {0}")]
    InvalidWeight(f64),

    #[error("rep count out of range: {0}")]
    RepsOutOfRange(i64),

    #[error("invalid rep range: {min}..{max}")]
    InvalidRepRange { min: u32, max: u32 },

    #[error("unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

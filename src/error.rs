use thiserror::Error;

/// Errors raised while decoding harness params or evaluating a track state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewardError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("index {index} out of range for {field} (len {len})")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    #[error("invalid type for {field}: expected {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("track needs at least 2 waypoints, got {0}")]
    TrackTooShort(usize),
}

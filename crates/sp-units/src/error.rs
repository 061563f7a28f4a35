use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnitError {
    #[error("unrecognized activation function '{0}', must be one of: none, sigmoid, expit, logit, log_expit")]
    UnknownActivation(String),
    #[error("invalid slice token '{token}': {source}")]
    InvalidSliceToken {
        token: String,
        source: std::num::ParseIntError,
    },
    #[error("slice token '{0}' has more than three ':'-separated fields")]
    MalformedSliceToken(String),
    #[error("slice step must be nonzero in token '{0}'")]
    ZeroStep(String),
    #[error("index {index} out of bounds for axis of length {len}")]
    IndexOutOfBounds { index: isize, len: usize },
    #[error("array error: {0}")]
    Array(#[from] sp_array::ArrayError),
}

pub type Result<T> = std::result::Result<T, UnitError>;

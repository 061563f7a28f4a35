use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArrayError {
    #[error("data length {len} does not match shape {dims:?} (numel={numel})")]
    DataShapeMismatch {
        len: usize,
        dims: Vec<usize>,
        numel: usize,
    },
    #[error("expected {expected} dimension names, got {got}")]
    DimCountMismatch { expected: usize, got: usize },
    #[error("duplicate dimension name: {0}")]
    DuplicateDim(String),
    #[error("no axis named '{name}' (dims: {dims:?})")]
    UnknownAxis { name: String, dims: Vec<String> },
    #[error("invalid axis {axis} for array with {ndim} dimensions")]
    InvalidAxis { axis: usize, ndim: usize },
    #[error("index {index} out of bounds for axis of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("axis '{name}' has {labels} labels but dimension length is {len}")]
    LabelLengthMismatch {
        name: String,
        labels: usize,
        len: usize,
    },
    #[error("slice step must be nonzero")]
    ZeroStep,
}

pub type Result<T> = std::result::Result<T, ArrayError>;

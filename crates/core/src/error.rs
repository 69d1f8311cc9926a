use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QpError {
    #[error("variable index {index} out of range for a model with {num_var} variables")]
    VariableIndex { index: usize, num_var: usize },
    #[error("constraint index {index} out of range for a model with {num_con} constraints")]
    ConstraintIndex { index: usize, num_con: usize },
    #[error("quadratic key ({row},{col}) lies below the diagonal; only the upper triangle may be set")]
    LowerTriangle { row: usize, col: usize },
    #[error("{what} must be finite, got {value}")]
    NonFinite { what: &'static str, value: f64 },
    #[error("{side} bound for {what} {index} is NaN; use the MAX_BOUND sentinel for an unbounded side")]
    NanBound {
        side: &'static str,
        what: &'static str,
        index: usize,
    },
    #[error("expected a vector of length {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("a model must contain at least one variable")]
    EmptyModel,
    #[error("unknown parameter name '{0}'")]
    UnknownParameter(String),
    #[error("unknown solver status code {0}")]
    UnknownStatusCode(i32),
    #[error("kernel reported a status outside the supported table")]
    UnknownKernelStatus,
}

pub type QpResult<T> = Result<T, QpError>;

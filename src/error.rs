use thiserror::Error;

use crate::engine::Operation;
use crate::processing::ReduceOp;
use crate::types::DataType;

/// Convenience result type for processing operations.
pub type ProcessingResult<T> = Result<T, ProcessingError>;

/// Why a callable does not fit the shape an operation requires.
///
/// Produced by [`crate::signature::verify`] and [`crate::signature::Signature::check`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureMismatch {
    /// The operand is not a function at all.
    #[error("expected a function, found {found}")]
    NotCallable { found: &'static str },

    /// Wrong number of parameters.
    #[error("expected {expected} parameter(s), found {found}")]
    Arity { expected: usize, found: usize },

    /// A parameter has the wrong element type.
    #[error("parameter {position} must be {expected}, found {found}")]
    ParameterType {
        position: usize,
        expected: DataType,
        found: DataType,
    },

    /// The function does not return exactly one value.
    #[error("expected exactly one return value, found {found}")]
    ResultCount { found: usize },

    /// The return value has the wrong element type.
    #[error("return value must be {expected}, found {found}")]
    ResultType { expected: DataType, found: DataType },
}

/// Error type returned by the dynamic engine and sequence constructors.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// A value passed where a sequence was expected is something else.
    #[error("{operation}: expected a sequence, found {found}")]
    NotASequence {
        operation: Operation,
        found: &'static str,
    },

    /// An in-place operation received a read-only sequence handle.
    #[error("{operation}: in-place execution requires a mutable sequence handle")]
    NotMutable { operation: Operation },

    /// The callable does not match the operation's required signature.
    #[error("{operation}: signature mismatch: {source}")]
    Signature {
        operation: Operation,
        #[source]
        source: SignatureMismatch,
    },

    /// A value does not have the sequence's element type.
    #[error("element {index} must be {expected}, found {found}")]
    ElementType {
        index: usize,
        expected: DataType,
        found: DataType,
    },

    /// The fold zero value does not have the sequence's element type.
    #[error("fold zero value must be {expected}, found {found}")]
    ZeroType { expected: DataType, found: DataType },

    /// The input exceeds the engine's configured element limit.
    #[error("{operation}: sequence of {len} elements exceeds the limit of {limit}")]
    TooLarge {
        operation: Operation,
        len: usize,
        limit: usize,
    },

    /// The reduction is not defined for this element type.
    #[error("{op:?} is not supported for {data_type} sequences")]
    UnsupportedReduce { op: ReduceOp, data_type: DataType },

    /// An integer reduction went past the range of `i64`.
    #[error("{op:?} overflowed the Int64 range")]
    Overflow { op: ReduceOp },

    /// A JSON element could not be converted to the requested [`DataType`].
    #[error("failed to parse element {index}: {message} (raw='{raw}')")]
    Parse {
        index: usize,
        raw: String,
        message: String,
    },

    /// Malformed JSON input.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProcessingError {
    pub(crate) fn signature(operation: Operation, source: SignatureMismatch) -> Self {
        Self::Signature { operation, source }
    }
}

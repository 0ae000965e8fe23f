//! Dynamically typed arguments for the engine's call surface.

use std::sync::Arc;

use crate::engine::Operation;
use crate::error::{ProcessingError, ProcessingResult};
use crate::signature::Function;
use crate::types::{Sequence, Value};

/// A value handed to the dynamic engine in place of a sequence or a function.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A single value.
    Scalar(Value),
    /// An owned sequence; usable as an in-place target.
    Sequence(Sequence),
    /// A read-only shared sequence; rejected by in-place operations.
    Shared(Arc<Sequence>),
    /// A callable.
    Function(Function),
}

impl Operand {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Scalar(_) => "scalar",
            Operand::Sequence(_) => "sequence",
            Operand::Shared(_) => "shared sequence",
            Operand::Function(_) => "function",
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Operand::Sequence(seq) => Some(seq),
            Operand::Shared(seq) => Some(seq.as_ref()),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Operand::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Take the sequence out, cloning a shared one only if other handles still exist.
    pub fn into_sequence(self) -> Option<Sequence> {
        match self {
            Operand::Sequence(seq) => Some(seq),
            Operand::Shared(seq) => Some(Arc::unwrap_or_clone(seq)),
            _ => None,
        }
    }

    pub(crate) fn sequence(&self, operation: Operation) -> ProcessingResult<&Sequence> {
        self.as_sequence().ok_or(ProcessingError::NotASequence {
            operation,
            found: self.kind(),
        })
    }

    pub(crate) fn sequence_mut(&mut self, operation: Operation) -> ProcessingResult<&mut Sequence> {
        match self {
            Operand::Sequence(seq) => Ok(seq),
            Operand::Shared(_) => Err(ProcessingError::NotMutable { operation }),
            other => Err(ProcessingError::NotASequence {
                operation,
                found: other.kind(),
            }),
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Scalar(value)
    }
}

impl From<Sequence> for Operand {
    fn from(seq: Sequence) -> Self {
        Operand::Sequence(seq)
    }
}

impl From<Arc<Sequence>> for Operand {
    fn from(seq: Arc<Sequence>) -> Self {
        Operand::Shared(seq)
    }
}

impl From<Function> for Operand {
    fn from(f: Function) -> Self {
        Operand::Function(f)
    }
}

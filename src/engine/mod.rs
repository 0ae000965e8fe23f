//! Runtime-verified map/filter/fold over dynamically typed [`Sequence`]s.
//!
//! Every operation follows the same flow: resolve the sequence operand, check the configured
//! size limit, verify the callable's [`crate::signature::Signature`] against the element type,
//! and only then run the algorithm from [`crate::processing`]. Verification happens in full
//! before any element is touched, so a rejected call never leaves partial output or a partially
//! mutated input behind.
//!
//! This module also provides:
//!
//! - An [`EngineObserver`] hook for operation events
//! - [`EngineMetrics`] counters
//! - `tracing` diagnostics (`debug` on completion, `warn` on verification failure)

mod observer;

use std::fmt;
use std::slice;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::error::{ProcessingError, ProcessingResult, SignatureMismatch};
use crate::operand::Operand;
use crate::processing::{try_filter, try_filter_in_place, try_fold, try_map, try_map_in_place};
use crate::signature::{Function, verify};
use crate::types::{DataType, Sequence, Value};

pub use observer::{EngineEvent, EngineMetrics, EngineMetricsSnapshot, EngineObserver};

/// The operation an event or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Transform,
    Filter,
    Fold,
    /// A direct [`Function::call`].
    Call,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Transform => "transform",
            Operation::Filter => "filter",
            Operation::Fold => "fold",
            Operation::Call => "call",
        };
        f.write_str(name)
    }
}

/// Whether an operation allocates its output or rewrites the input sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    Copy,
    InPlace,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Copy => f.write_str("copy"),
            ExecutionMode::InPlace => f.write_str("in-place"),
        }
    }
}

/// Configuration for the [`Engine`].
#[derive(Clone, Default)]
pub struct EngineOptions {
    /// Receives an [`EngineEvent`] for every operation.
    pub observer: Option<Arc<dyn EngineObserver>>,
    /// Reject sequences longer than this before doing any work.
    pub max_elements: Option<usize>,
}

impl fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineOptions")
            .field("observer", &self.observer.is_some())
            .field("max_elements", &self.max_elements)
            .finish()
    }
}

/// Runs verified transformations and reports them to observers and metrics.
///
/// An engine holds no per-call state; independent calls on different sequences may run from
/// several threads at once.
pub struct Engine {
    opts: EngineOptions,
    metrics: Arc<EngineMetrics>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl Engine {
    pub fn new(opts: EngineOptions) -> Self {
        Self {
            opts,
            metrics: Arc::new(EngineMetrics::new()),
        }
    }

    /// Attach an observer for engine events.
    pub fn with_observer(mut self, observer: Arc<dyn EngineObserver>) -> Self {
        self.opts.observer = Some(observer);
        self
    }

    /// Get a handle to the engine's metrics.
    pub fn metrics(&self) -> Arc<EngineMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Apply `function` to every element, returning a new sequence.
    ///
    /// The function must take the element type and return exactly one value; the output
    /// sequence's element type is the function's result type. The input is never modified.
    pub fn transform(&self, sequence: &Operand, function: &Operand) -> ProcessingResult<Sequence> {
        let operation = Operation::Transform;
        let mode = ExecutionMode::Copy;
        let seq = sequence.sequence(operation)?;
        self.check_limit(operation, seq.len())?;

        let start = self.begin(operation, mode, seq.len());
        let function = self.verify(operation, function, &[seq.element_type()], None)?;
        let output_type = function.signature().result().ok_or_else(|| {
            ProcessingError::signature(
                operation,
                SignatureMismatch::ResultCount {
                    found: function.signature().results.len(),
                },
            )
        })?;

        let values = try_map(seq.values(), |v| self.invoke(function, slice::from_ref(v)))?;
        self.finish(operation, mode, seq.len(), values.len(), start);
        Ok(Sequence::from_parts(output_type, values))
    }

    /// Overwrite every element with `function(element)`.
    ///
    /// The function's parameter and result must both be the element type; the length is
    /// unchanged.
    pub fn transform_in_place(
        &self,
        sequence: &mut Operand,
        function: &Operand,
    ) -> ProcessingResult<()> {
        let operation = Operation::Transform;
        let mode = ExecutionMode::InPlace;
        let seq = sequence.sequence_mut(operation)?;
        self.check_limit(operation, seq.len())?;

        let len = seq.len();
        let start = self.begin(operation, mode, len);
        let element_type = seq.element_type();
        let function = self.verify(operation, function, &[element_type], Some(&element_type))?;

        try_map_in_place(seq.values_mut(), |v| self.invoke(function, slice::from_ref(v)))?;
        self.finish(operation, mode, len, len, start);
        Ok(())
    }

    /// Return a new sequence holding the elements for which `predicate` returns `true`.
    pub fn filter(&self, sequence: &Operand, predicate: &Operand) -> ProcessingResult<Sequence> {
        let operation = Operation::Filter;
        let mode = ExecutionMode::Copy;
        let seq = sequence.sequence(operation)?;
        self.check_limit(operation, seq.len())?;

        let start = self.begin(operation, mode, seq.len());
        let predicate =
            self.verify(operation, predicate, &[seq.element_type()], Some(&DataType::Bool))?;

        let values = try_filter(seq.values(), |v| self.test(operation, predicate, v))?;
        self.finish(operation, mode, seq.len(), values.len(), start);
        Ok(Sequence::from_parts(seq.element_type(), values))
    }

    /// Keep only the elements for which `predicate` returns `true`, compacting the sequence.
    ///
    /// Kept elements stay in their original relative order and the length shrinks to the kept
    /// count.
    pub fn filter_in_place(
        &self,
        sequence: &mut Operand,
        predicate: &Operand,
    ) -> ProcessingResult<()> {
        let operation = Operation::Filter;
        let mode = ExecutionMode::InPlace;
        let seq = sequence.sequence_mut(operation)?;
        self.check_limit(operation, seq.len())?;

        let len = seq.len();
        let start = self.begin(operation, mode, len);
        let predicate =
            self.verify(operation, predicate, &[seq.element_type()], Some(&DataType::Bool))?;

        try_filter_in_place(seq.values_mut(), |v| self.test(operation, predicate, v))?;
        self.finish(operation, mode, len, seq.len(), start);
        Ok(())
    }

    /// Combine the elements left to right with `combiner`.
    ///
    /// An empty sequence yields `zero` and a one-element sequence yields that element; the
    /// combiner is not called in either case. `zero` must have the element type; a mistyped
    /// zero is rejected before the operation starts.
    pub fn fold(
        &self,
        sequence: &Operand,
        combiner: &Operand,
        zero: Value,
    ) -> ProcessingResult<Value> {
        let operation = Operation::Fold;
        let mode = ExecutionMode::Copy;
        let seq = sequence.sequence(operation)?;
        self.check_limit(operation, seq.len())?;
        let element_type = seq.element_type();
        if zero.data_type() != element_type {
            return Err(ProcessingError::ZeroType {
                expected: element_type,
                found: zero.data_type(),
            });
        }

        let start = self.begin(operation, mode, seq.len());
        let combiner = self.verify(
            operation,
            combiner,
            &[element_type, element_type],
            Some(&element_type),
        )?;

        let out = try_fold(
            seq.values(),
            |acc, v| self.invoke(combiner, &[acc.clone(), v.clone()]),
            zero,
        )?;
        self.finish(operation, mode, seq.len(), 1, start);
        Ok(out)
    }

    fn check_limit(&self, operation: Operation, len: usize) -> ProcessingResult<()> {
        match self.opts.max_elements {
            Some(limit) if len > limit => Err(ProcessingError::TooLarge {
                operation,
                len,
                limit,
            }),
            _ => Ok(()),
        }
    }

    fn verify<'f>(
        &self,
        operation: Operation,
        callable: &'f Operand,
        params: &[DataType],
        result: Option<&DataType>,
    ) -> ProcessingResult<&'f Function> {
        verify(callable, params, result).map_err(|mismatch| {
            warn!(%operation, %mismatch, "signature verification failed");
            self.metrics.on_verification_failure();
            self.emit(EngineEvent::VerificationFailed {
                operation,
                mismatch: mismatch.clone(),
            });
            ProcessingError::signature(operation, mismatch)
        })
    }

    fn invoke(&self, function: &Function, args: &[Value]) -> ProcessingResult<Value> {
        self.metrics.on_function_call();
        function.call_single(args)
    }

    fn test(
        &self,
        operation: Operation,
        predicate: &Function,
        value: &Value,
    ) -> ProcessingResult<bool> {
        match self.invoke(predicate, slice::from_ref(value))? {
            Value::Bool(keep) => Ok(keep),
            other => Err(ProcessingError::signature(
                operation,
                SignatureMismatch::ResultType {
                    expected: DataType::Bool,
                    found: other.data_type(),
                },
            )),
        }
    }

    fn begin(&self, operation: Operation, mode: ExecutionMode, input_len: usize) -> Instant {
        self.metrics.on_operation_start();
        self.emit(EngineEvent::OperationStarted {
            operation,
            mode,
            input_len,
        });
        Instant::now()
    }

    fn finish(
        &self,
        operation: Operation,
        mode: ExecutionMode,
        input_len: usize,
        output_len: usize,
        start: Instant,
    ) {
        let elapsed = start.elapsed();
        self.metrics.on_operation_end(input_len);
        debug!(%operation, %mode, input_len, output_len, ?elapsed, "operation finished");
        self.emit(EngineEvent::OperationFinished {
            operation,
            mode,
            output_len,
            elapsed,
        });
    }

    fn emit(&self, event: EngineEvent) {
        if let Some(obs) = &self.opts.observer {
            obs.on_event(&event);
        }
    }
}

/// [`Engine::transform`] on a default engine.
pub fn transform(sequence: &Operand, function: &Operand) -> ProcessingResult<Sequence> {
    Engine::default().transform(sequence, function)
}

/// [`Engine::transform_in_place`] on a default engine.
pub fn transform_in_place(sequence: &mut Operand, function: &Operand) -> ProcessingResult<()> {
    Engine::default().transform_in_place(sequence, function)
}

/// [`Engine::filter`] on a default engine.
pub fn filter(sequence: &Operand, predicate: &Operand) -> ProcessingResult<Sequence> {
    Engine::default().filter(sequence, predicate)
}

/// [`Engine::filter_in_place`] on a default engine.
pub fn filter_in_place(sequence: &mut Operand, predicate: &Operand) -> ProcessingResult<()> {
    Engine::default().filter_in_place(sequence, predicate)
}

/// [`Engine::fold`] on a default engine.
pub fn fold(sequence: &Operand, combiner: &Operand, zero: Value) -> ProcessingResult<Value> {
    Engine::default().fold(sequence, combiner, zero)
}

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::SignatureMismatch;

use super::{ExecutionMode, Operation};

/// Events emitted by the engine.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    OperationStarted {
        operation: Operation,
        mode: ExecutionMode,
        input_len: usize,
    },
    VerificationFailed {
        operation: Operation,
        mismatch: SignatureMismatch,
    },
    OperationFinished {
        operation: Operation,
        mode: ExecutionMode,
        output_len: usize,
        elapsed: Duration,
    },
}

/// Observer hook for engine events.
pub trait EngineObserver: Send + Sync {
    fn on_event(&self, event: &EngineEvent);
}

/// Counters updated by the engine; callers can snapshot them at any time.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    operations_started: AtomicU64,
    operations_finished: AtomicU64,
    verification_failures: AtomicU64,
    elements_processed: AtomicU64,
    function_calls: AtomicU64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_operation_start(&self) {
        let _ = self.operations_started.fetch_add(1, Ordering::SeqCst);
    }

    pub fn on_operation_end(&self, elements: usize) {
        let _ = self.operations_finished.fetch_add(1, Ordering::SeqCst);
        let _ = self
            .elements_processed
            .fetch_add(elements as u64, Ordering::SeqCst);
    }

    pub fn on_verification_failure(&self) {
        let _ = self.verification_failures.fetch_add(1, Ordering::SeqCst);
    }

    pub fn on_function_call(&self) {
        let _ = self.function_calls.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> EngineMetricsSnapshot {
        EngineMetricsSnapshot {
            operations_started: self.operations_started.load(Ordering::SeqCst),
            operations_finished: self.operations_finished.load(Ordering::SeqCst),
            verification_failures: self.verification_failures.load(Ordering::SeqCst),
            elements_processed: self.elements_processed.load(Ordering::SeqCst),
            function_calls: self.function_calls.load(Ordering::SeqCst),
        }
    }
}

/// Immutable snapshot of [`EngineMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineMetricsSnapshot {
    pub operations_started: u64,
    pub operations_finished: u64,
    pub verification_failures: u64,
    pub elements_processed: u64,
    pub function_calls: u64,
}

impl fmt::Display for EngineMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "operations={}/{}, verification_failures={}, elements_processed={}, function_calls={}",
            self.operations_finished,
            self.operations_started,
            self.verification_failures,
            self.elements_processed,
            self.function_calls
        )
    }
}

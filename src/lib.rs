//! `rust-sequence-processing` provides map, filter and fold over sequences of a single element
//! type, in two layers:
//!
//! - [`processing`]: generic functions over slices and vectors. The compiler checks that a
//!   callback fits the element type.
//! - [`engine`]: the same operations over runtime-typed [`types::Sequence`]s and
//!   [`signature::Function`]s. The engine verifies the function's arity and parameter/return
//!   types before touching any element, and returns a typed [`ProcessingError`] on mismatch.
//!
//! Both layers offer a copy mode (allocate a new output) and an in-place mode (overwrite or
//! compact the input). Fold evaluates strictly left to right; an empty input yields the zero
//! value and a one-element input yields that element without calling the combiner.
//!
//! **Element types:**
//!
//! - [`types::DataType::Int64`] (`i64`)
//! - [`types::DataType::Float64`] (`f64`)
//! - [`types::DataType::Bool`] (`bool`)
//! - [`types::DataType::Utf8`] (`String`)
//!
//! ## Quick example: typed layer
//!
//! ```rust
//! use rust_sequence_processing::processing::{filter, fold, map};
//!
//! let tripled = map(&["1", "2", "3"], |s| s.repeat(3));
//! assert_eq!(tripled, vec!["111", "222", "333"]);
//!
//! let evens = filter(&[1, 2, 3, 4], |x| x % 2 == 0);
//! assert_eq!(evens, vec![2, 4]);
//!
//! assert_eq!(fold(&[2, 3, 4], |a, b| a + b, 0), 9);
//! ```
//!
//! ## Quick example: verified engine
//!
//! ```rust
//! use rust_sequence_processing::engine;
//! use rust_sequence_processing::operand::Operand;
//! use rust_sequence_processing::signature::Function;
//! use rust_sequence_processing::types::Sequence;
//! use rust_sequence_processing::ProcessingError;
//!
//! # fn main() -> Result<(), ProcessingError> {
//! let mut nums = Operand::from(Sequence::from_vec(vec![1_i64, 2, 3, 4, 5]));
//! let triple = Operand::from(Function::unary(|n: i64| n * 3));
//! engine::transform_in_place(&mut nums, &triple)?;
//! assert_eq!(nums.as_sequence().unwrap().to_vec::<i64>()?, vec![3, 6, 9, 12, 15]);
//!
//! // A function over strings does not fit an integer sequence.
//! let shout = Operand::from(Function::unary(|s: String| s.to_uppercase()));
//! assert!(matches!(
//!     engine::transform(&nums, &shout),
//!     Err(ProcessingError::Signature { .. })
//! ));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`processing`]: compile-time typed map/filter/fold and built-in reductions
//! - [`engine`]: runtime-verified operations, observer hooks and metrics
//! - [`signature`]: [`signature::Function`], [`signature::Signature`] and the verifier
//! - [`operand`]: dynamically typed arguments accepted by the engine
//! - [`types`]: element types, values and [`types::Sequence`]
//! - [`json`]: JSON array interchange for sequences
//! - [`error`]: error types

pub mod engine;
pub mod error;
pub mod json;
pub mod operand;
pub mod processing;
pub mod signature;
pub mod types;

pub use engine::{Engine, EngineOptions, ExecutionMode, Operation};
pub use error::{ProcessingError, ProcessingResult, SignatureMismatch};

//! Compile-time typed sequence transformations.
//!
//! These functions work on plain slices and vectors. The compiler checks that the callback
//! matches the element type, so there is no runtime verification and no signature error path.
//! The dynamic engine in [`crate::engine`] runs the same algorithms after verifying a runtime
//! [`crate::signature::Function`].
//!
//! Currently implemented:
//!
//! - [`map()`] / [`map_in_place()`]: apply a unary function to every element
//! - [`filter()`] / [`filter_in_place()`]: keep elements matching a predicate, order preserved
//! - [`fold()`] / [`reduce()`] / [`count_if()`]: left-to-right accumulation
//! - [`aggregate()`]: built-in reductions (count/sum/min/max) over a [`crate::types::Sequence`]
//!
//! ## Example: filter → map → fold
//!
//! ```rust
//! use rust_sequence_processing::processing::{filter, fold, map_in_place};
//!
//! let mut evens = filter(&[1, 2, 3, 4], |x| x % 2 == 0);
//! map_in_place(&mut evens, |x| x * 3);
//! assert_eq!(evens, vec![6, 12]);
//!
//! let total = fold(&evens, |a, b| a + b, 0);
//! assert_eq!(total, 18);
//! ```

pub mod filter;
pub mod map;
pub mod reduce;

pub use filter::{filter, filter_in_place, try_filter, try_filter_in_place};
pub use map::{map, map_in_place, try_map, try_map_in_place};
pub use reduce::{ReduceOp, aggregate, count_if, fold, reduce, try_fold};

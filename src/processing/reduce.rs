//! Left-to-right folding and built-in reductions.

use crate::error::{ProcessingError, ProcessingResult};
use crate::types::{DataType, Sequence, Value};

/// Fold `items` into one value with `combiner`, strictly left to right.
///
/// - empty: returns `zero`; `combiner` is not called
/// - one element: returns a clone of it; `combiner` is not called
/// - otherwise: `combiner(combiner(items[0], items[1]), items[2])`, and so on
pub fn fold<T, F>(items: &[T], mut combiner: F, zero: T) -> T
where
    T: Clone,
    F: FnMut(&T, &T) -> T,
{
    match items {
        [] => zero,
        [only] => only.clone(),
        [first, second, rest @ ..] => {
            let mut acc = combiner(first, second);
            for item in rest {
                acc = combiner(&acc, item);
            }
            acc
        }
    }
}

/// Fallible [`fold`]. Stops at the first error.
pub fn try_fold<T, E, F>(items: &[T], mut combiner: F, zero: T) -> Result<T, E>
where
    T: Clone,
    F: FnMut(&T, &T) -> Result<T, E>,
{
    match items {
        [] => Ok(zero),
        [only] => Ok(only.clone()),
        [first, second, rest @ ..] => {
            let mut acc = combiner(first, second)?;
            for item in rest {
                acc = combiner(&acc, item)?;
            }
            Ok(acc)
        }
    }
}

/// Like [`fold`] without a zero value; `None` for an empty slice.
pub fn reduce<T, F>(items: &[T], combiner: F) -> Option<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> T,
{
    let (first, _) = items.split_first()?;
    Some(fold(items, combiner, first.clone()))
}

/// Number of elements for which `predicate` returns `true`.
pub fn count_if<T, F>(items: &[T], mut predicate: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    items.iter().filter(|item| predicate(*item)).count()
}

/// Built-in reductions over a [`Sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all elements.
    Count,
    /// Sum numeric elements.
    Sum,
    /// Minimum numeric element.
    Min,
    /// Maximum numeric element.
    Max,
}

/// Reduce a sequence using a built-in [`ReduceOp`].
///
/// - `Count` always returns `Value::Int64(len)`.
/// - `Sum` of an empty numeric sequence is zero of the element type.
/// - `Min`/`Max` of an empty sequence return `None`.
/// - `Sum`/`Min`/`Max` fail with [`ProcessingError::UnsupportedReduce`] for non-numeric types.
/// - An `Int64` `Sum` past the `i64` range fails with [`ProcessingError::Overflow`].
pub fn aggregate(seq: &Sequence, op: ReduceOp) -> ProcessingResult<Option<Value>> {
    if op == ReduceOp::Count {
        return Ok(Some(Value::Int64(seq.len() as i64)));
    }
    match seq.element_type() {
        DataType::Int64 => {
            let nums: Vec<i64> = seq.to_vec()?;
            Ok(match op {
                ReduceOp::Sum => {
                    let total = try_fold(
                        &nums,
                        |a, b| a.checked_add(*b).ok_or(ProcessingError::Overflow { op }),
                        0,
                    )?;
                    Some(Value::Int64(total))
                }
                ReduceOp::Min => reduce(&nums, |a, b| *a.min(b)).map(Value::Int64),
                ReduceOp::Max => reduce(&nums, |a, b| *a.max(b)).map(Value::Int64),
                ReduceOp::Count => unreachable!("count handled above"),
            })
        }
        DataType::Float64 => {
            let nums: Vec<f64> = seq.to_vec()?;
            Ok(match op {
                ReduceOp::Sum => Some(Value::Float64(fold(&nums, |a, b| a + b, 0.0))),
                ReduceOp::Min => reduce(&nums, |a, b| a.min(*b)).map(Value::Float64),
                ReduceOp::Max => reduce(&nums, |a, b| a.max(*b)).map(Value::Float64),
                ReduceOp::Count => unreachable!("count handled above"),
            })
        }
        data_type => Err(ProcessingError::UnsupportedReduce { op, data_type }),
    }
}

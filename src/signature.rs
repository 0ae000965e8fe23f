//! Runtime-signatured callables and the signature verifier.
//!
//! A [`Function`] is built from a typed Rust closure, so its [`Signature`] always describes what
//! the body really accepts and returns. The dynamic engine compares that signature against the
//! shape it needs (via [`verify`]) before touching any data.

use std::fmt;
use std::sync::Arc;

use crate::engine::Operation;
use crate::error::{ProcessingError, ProcessingResult, SignatureMismatch};
use crate::operand::Operand;
use crate::types::{DataType, Element, Value};

/// Parameter and result types of a [`Function`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub params: Vec<DataType>,
    pub results: Vec<DataType>,
}

impl Signature {
    pub fn new(params: Vec<DataType>, results: Vec<DataType>) -> Self {
        Self { params, results }
    }

    /// Compare against an expected shape.
    ///
    /// `result` of `None` still requires exactly one return value but accepts any type.
    pub fn check(
        &self,
        params: &[DataType],
        result: Option<&DataType>,
    ) -> Result<(), SignatureMismatch> {
        if self.params.len() != params.len() {
            return Err(SignatureMismatch::Arity {
                expected: params.len(),
                found: self.params.len(),
            });
        }
        if let Some((position, (found, expected))) = self
            .params
            .iter()
            .zip(params)
            .enumerate()
            .find(|(_, (found, expected))| found != expected)
        {
            return Err(SignatureMismatch::ParameterType {
                position,
                expected: *expected,
                found: *found,
            });
        }
        let [found] = self.results.as_slice() else {
            return Err(SignatureMismatch::ResultCount {
                found: self.results.len(),
            });
        };
        match result {
            Some(expected) if expected != found => Err(SignatureMismatch::ResultType {
                expected: *expected,
                found: *found,
            }),
            _ => Ok(()),
        }
    }

    /// The single result type, if there is exactly one.
    pub fn result(&self) -> Option<DataType> {
        match self.results.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, ")")?;
        match self.results.as_slice() {
            [] => Ok(()),
            [only] => write!(f, " -> {only}"),
            many => {
                write!(f, " -> (")?;
                for (i, r) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{r}")?;
                }
                write!(f, ")")
            }
        }
    }
}

type Body = dyn Fn(&[Value]) -> Result<Vec<Value>, SignatureMismatch> + Send + Sync;

/// A callable value with a runtime-visible [`Signature`].
#[derive(Clone)]
pub struct Function {
    signature: Signature,
    body: Arc<Body>,
}

impl Function {
    /// Wrap a one-argument closure.
    pub fn unary<A, R, F>(f: F) -> Self
    where
        A: Element,
        R: Element,
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            signature: Signature::new(vec![A::DATA_TYPE], vec![R::DATA_TYPE]),
            body: Arc::new(move |args| {
                let a = arg::<A>(args, 0)?;
                Ok(vec![f(a).into_value()])
            }),
        }
    }

    /// Wrap a two-argument closure.
    pub fn binary<A, B, R, F>(f: F) -> Self
    where
        A: Element,
        B: Element,
        R: Element,
        F: Fn(A, B) -> R + Send + Sync + 'static,
    {
        Self {
            signature: Signature::new(vec![A::DATA_TYPE, B::DATA_TYPE], vec![R::DATA_TYPE]),
            body: Arc::new(move |args| {
                let a = arg::<A>(args, 0)?;
                let b = arg::<B>(args, 1)?;
                Ok(vec![f(a, b).into_value()])
            }),
        }
    }

    /// Wrap a one-argument closure that returns nothing.
    pub fn procedure<A, F>(f: F) -> Self
    where
        A: Element,
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            signature: Signature::new(vec![A::DATA_TYPE], Vec::new()),
            body: Arc::new(move |args| {
                f(arg::<A>(args, 0)?);
                Ok(Vec::new())
            }),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn arity(&self) -> usize {
        self.signature.params.len()
    }

    /// Invoke the function, checking arity and argument types first.
    pub fn call(&self, args: &[Value]) -> ProcessingResult<Vec<Value>> {
        if args.len() != self.arity() {
            return Err(ProcessingError::signature(
                Operation::Call,
                SignatureMismatch::Arity {
                    expected: self.arity(),
                    found: args.len(),
                },
            ));
        }
        (self.body)(args).map_err(|m| ProcessingError::signature(Operation::Call, m))
    }

    /// Invoke a function known to return exactly one value.
    pub(crate) fn call_single(&self, args: &[Value]) -> ProcessingResult<Value> {
        let mut out = self.call(args)?;
        match out.pop() {
            Some(v) if out.is_empty() => Ok(v),
            _ => Err(ProcessingError::signature(
                Operation::Call,
                SignatureMismatch::ResultCount {
                    found: self.signature.results.len(),
                },
            )),
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("signature", &self.signature.to_string())
            .finish()
    }
}

fn arg<T: Element>(args: &[Value], position: usize) -> Result<T, SignatureMismatch> {
    let value = args.get(position).ok_or(SignatureMismatch::Arity {
        expected: position + 1,
        found: args.len(),
    })?;
    T::from_value(value).ok_or(SignatureMismatch::ParameterType {
        position,
        expected: T::DATA_TYPE,
        found: value.data_type(),
    })
}

/// Confirm that `callable` is a function with the given parameter types and one result.
///
/// `result` of `None` skips the result type check (the map case, where the output type is
/// derived from the function). Pure; safe to call before any data is touched.
pub fn verify<'a>(
    callable: &'a Operand,
    params: &[DataType],
    result: Option<&DataType>,
) -> Result<&'a Function, SignatureMismatch> {
    let function = callable.as_function().ok_or(SignatureMismatch::NotCallable {
        found: callable.kind(),
    })?;
    function.signature().check(params, result)?;
    Ok(function)
}

#[cfg(test)]
mod tests {
    use super::{Function, Signature, verify};
    use crate::error::{ProcessingError, SignatureMismatch};
    use crate::operand::Operand;
    use crate::types::{DataType, Value};

    #[test]
    fn closures_produce_matching_signatures() {
        let f = Function::unary(|s: String| s.len() as i64);
        assert_eq!(f.signature().to_string(), "fn(Utf8) -> Int64");

        let g = Function::binary(|a: i64, b: i64| a + b);
        assert_eq!(g.signature().to_string(), "fn(Int64, Int64) -> Int64");

        let p = Function::procedure(|_: bool| {});
        assert_eq!(p.signature().to_string(), "fn(Bool)");
        assert_eq!(p.signature().result(), None);
    }

    #[test]
    fn verify_accepts_matching_function() {
        let op = Operand::from(Function::unary(|x: i64| x * 2));
        assert!(verify(&op, &[DataType::Int64], Some(&DataType::Int64)).is_ok());
        assert!(verify(&op, &[DataType::Int64], None).is_ok());
    }

    #[test]
    fn verify_rejects_non_callable() {
        let op = Operand::from(Value::Int64(3));
        assert_eq!(
            verify(&op, &[DataType::Int64], None).unwrap_err(),
            SignatureMismatch::NotCallable { found: "scalar" }
        );
    }

    #[test]
    fn verify_rejects_wrong_arity() {
        let op = Operand::from(Function::binary(|a: i64, b: i64| a + b));
        assert_eq!(
            verify(&op, &[DataType::Int64], None).unwrap_err(),
            SignatureMismatch::Arity {
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn verify_rejects_wrong_parameter_type() {
        let op = Operand::from(Function::unary(|x: i64| x));
        assert_eq!(
            verify(&op, &[DataType::Utf8], None).unwrap_err(),
            SignatureMismatch::ParameterType {
                position: 0,
                expected: DataType::Utf8,
                found: DataType::Int64
            }
        );
    }

    #[test]
    fn verify_rejects_missing_result() {
        let op = Operand::from(Function::procedure(|_: i64| {}));
        assert_eq!(
            verify(&op, &[DataType::Int64], None).unwrap_err(),
            SignatureMismatch::ResultCount { found: 0 }
        );
    }

    #[test]
    fn verify_rejects_wrong_result_type() {
        let op = Operand::from(Function::unary(|x: i64| x));
        assert_eq!(
            verify(&op, &[DataType::Int64], Some(&DataType::Bool)).unwrap_err(),
            SignatureMismatch::ResultType {
                expected: DataType::Bool,
                found: DataType::Int64
            }
        );
    }

    #[test]
    fn check_reports_multiple_results() {
        let sig = Signature::new(vec![DataType::Int64], vec![DataType::Int64, DataType::Int64]);
        assert_eq!(
            sig.check(&[DataType::Int64], None).unwrap_err(),
            SignatureMismatch::ResultCount { found: 2 }
        );
        assert_eq!(sig.to_string(), "fn(Int64) -> (Int64, Int64)");
    }

    #[test]
    fn call_checks_arguments_before_running_body() {
        let f = Function::binary(|a: String, b: String| a + &b);
        let out = f
            .call(&[Value::Utf8("ab".to_string()), Value::Utf8("cd".to_string())])
            .unwrap();
        assert_eq!(out, vec![Value::Utf8("abcd".to_string())]);

        assert!(matches!(
            f.call(&[Value::Utf8("ab".to_string())]),
            Err(ProcessingError::Signature {
                source: SignatureMismatch::Arity { expected: 2, found: 1 },
                ..
            })
        ));
        assert!(matches!(
            f.call(&[Value::Utf8("ab".to_string()), Value::Int64(1)]),
            Err(ProcessingError::Signature {
                source: SignatureMismatch::ParameterType { position: 1, .. },
                ..
            })
        ));
    }
}

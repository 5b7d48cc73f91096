//! Runtime values.

use std::fmt;

use crate::error::{EvalError, EvalResult};
use crate::heap::{ArrayRef, ObjectRef};

/// A value produced by evaluating an expression.
///
/// All variants are `Copy`: objects and arrays are handles into the [`Heap`](crate::Heap).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    /// Result of a statement or a `void` call.
    Void,
    Bool(bool),
    Int(i64),
    Null,
    Object(ObjectRef),
    Array(ArrayRef),
}

impl Value {
    /// Name of the variant, for type-mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Void => "void",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Null => "null",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
        }
    }

    pub fn as_bool(self) -> EvalResult<bool> {
        match self {
            Value::Bool(b) => Ok(b),
            other => Err(EvalError::type_mismatch("bool", other)),
        }
    }

    pub fn as_int(self) -> EvalResult<i64> {
        match self {
            Value::Int(n) => Ok(n),
            other => Err(EvalError::type_mismatch("int", other)),
        }
    }

    pub fn as_object(self) -> EvalResult<ObjectRef> {
        match self {
            Value::Object(obj) => Ok(obj),
            other => Err(EvalError::type_mismatch("object", other)),
        }
    }

    pub fn as_array(self) -> EvalResult<ArrayRef> {
        match self {
            Value::Array(arr) => Ok(arr),
            other => Err(EvalError::type_mismatch("array", other)),
        }
    }

    #[inline]
    pub fn is_null(self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => write!(f, "void"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Null => write!(f, "null"),
            Value::Object(obj) => write!(f, "object#{}", obj.raw()),
            Value::Array(arr) => write!(f, "array#{}", arr.raw()),
        }
    }
}

//! Evaluation errors.

use duck_diagnostic::{Diagnostic, ErrorCode};
use thiserror::Error;

use crate::value::Value;

/// Result of evaluating an expression or a native member body.
pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("variable '{0}' is read before it is assigned")]
    Unassigned(String),

    #[error("'{0}' accessed on a null reference")]
    NullReference(String),

    #[error("no native implementation of '{0}'")]
    NoNativeBody(String),

    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: &'static str },

    #[error("break outside of the loop it targets")]
    InvalidBreak,

    #[error("expected {expected} argument(s), found {found}")]
    ArgumentCount { expected: usize, found: usize },

    #[error("invalid handle: {0}")]
    InvalidHandle(String),
}

impl EvalError {
    #[cold]
    pub fn type_mismatch(expected: &'static str, found: Value) -> Self {
        EvalError::TypeMismatch {
            expected,
            found: found.type_name(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EvalError::Unassigned(_) => ErrorCode::E3001,
            EvalError::NullReference(_) => ErrorCode::E3002,
            EvalError::NoNativeBody(_) => ErrorCode::E3003,
            EvalError::TypeMismatch { .. } => ErrorCode::E3004,
            EvalError::InvalidBreak => ErrorCode::E3005,
            EvalError::ArgumentCount { .. } => ErrorCode::E3006,
            EvalError::InvalidHandle(_) => ErrorCode::E9001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            EvalError::NoNativeBody(_) => diagnostic.with_suggestion("register a body with `NativeMethods::define`"),
            EvalError::InvalidHandle(_) => {
                diagnostic.with_note("the tree was built against a different arena, heap or registry")
            }
            _ => diagnostic,
        }
    }
}

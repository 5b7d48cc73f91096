//! Lowering errors.
//!
//! Messages reproduce the host compiler's wording (CS1579, CS0202, CS1674)
//! so they can be compared with what the compiler itself reports.

use duck_diagnostic::{Diagnostic, ErrorCode};
use thiserror::Error;

/// Member of the enumerator shape that could not be found.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MissingMember {
    Current,
    MoveNext,
}

impl MissingMember {
    pub fn name(self) -> &'static str {
        match self {
            MissingMember::Current => "Current",
            MissingMember::MoveNext => "MoveNext",
        }
    }
}

/// Why a `foreach` or `using` could not be lowered.
///
/// No IR is produced when lowering fails.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LowerError {
    /// No `GetEnumerator()` on the type or its enumerable interfaces.
    #[error(
        "foreach statement cannot operate on variables of type '{type_name}' because \
         '{type_name}' does not contain a public instance or extension definition for 'GetEnumerator'"
    )]
    NotEnumerable { type_name: String },

    /// `GetEnumerator()` returns a type without `Current` or `MoveNext()`.
    #[error(
        "foreach requires that the return type '{enumerator_name}' of \
         '{type_name}.GetEnumerator()' must have a suitable public 'MoveNext' method and public 'Current' property"
    )]
    InvalidEnumerator {
        type_name: String,
        enumerator_name: String,
        missing: MissingMember,
    },

    /// The resource of a `using` has no disposal contract.
    ///
    /// `type_name` is the metadata name, with arity suffix (`ValueTypeEnumerator`1`).
    #[error("'{type_name}': type used in a using statement must be implicitly convertible to 'System.IDisposable'")]
    NotDisposable { type_name: String },
}

impl LowerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LowerError::NotEnumerable { .. } => ErrorCode::E1001,
            LowerError::InvalidEnumerator {
                missing: MissingMember::Current,
                ..
            } => ErrorCode::E1002,
            LowerError::InvalidEnumerator {
                missing: MissingMember::MoveNext,
                ..
            } => ErrorCode::E1003,
            LowerError::NotDisposable { .. } => ErrorCode::E2001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            LowerError::NotEnumerable { type_name } => diagnostic
                .with_note(format!("`{type_name}` declares no `GetEnumerator()` and implements no enumerable interface"))
                .with_suggestion("add a public parameterless `GetEnumerator()` method"),
            LowerError::InvalidEnumerator {
                enumerator_name,
                missing,
                ..
            } => diagnostic
                .with_note(format!("`{enumerator_name}` has no public `{}`", missing.name()))
                .with_suggestion(match missing {
                    MissingMember::Current => "add a readable public `Current` property",
                    MissingMember::MoveNext => "add a public `bool MoveNext()` method",
                }),
            LowerError::NotDisposable { .. } => diagnostic
                .with_note("the enumerator is neither convertible to `System.IDisposable` nor a stack-only type with a public `Dispose()`")
                .with_suggestion("implement `System.IDisposable` on the enumerator"),
        }
    }
}

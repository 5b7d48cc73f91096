//! Error codes for all diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the phase that raised it.

use std::fmt;

/// Error codes for all diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Enumerable shape errors
/// - E2xxx: Disposal classification errors
/// - E3xxx: Evaluation errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Shape Errors (E1xxx)
    /// No accessible `GetEnumerator()`
    E1001,
    /// Enumerator has no readable `Current`
    E1002,
    /// Enumerator has no `bool MoveNext()`
    E1003,

    // Disposal Errors (E2xxx)
    /// Type used in a using statement is not convertible to `IDisposable`
    E2001,

    // Evaluation Errors (E3xxx)
    /// Variable read before it was bound
    E3001,
    /// Member access on null
    E3002,
    /// No native body registered for a member
    E3003,
    /// Value has the wrong runtime type
    E3004,
    /// `break` with no enclosing loop
    E3005,
    /// Wrong number of arguments
    E3006,

    // Internal Errors (E9xxx)
    /// Handle does not name a registered type or member
    E9001,
}

impl ErrorCode {
    /// All error codes, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E2001,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        ErrorCode::E3006,
        ErrorCode::E9001,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line description, used by `duckc explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "type has no accessible GetEnumerator()",
            ErrorCode::E1002 => "enumerator has no readable Current property",
            ErrorCode::E1003 => "enumerator has no MoveNext() returning bool",
            ErrorCode::E2001 => "type used in a using statement is not convertible to IDisposable",
            ErrorCode::E3001 => "variable read before assignment",
            ErrorCode::E3002 => "member access on a null reference",
            ErrorCode::E3003 => "member has no native implementation",
            ErrorCode::E3004 => "value has an unexpected runtime type",
            ErrorCode::E3005 => "break outside of a loop",
            ErrorCode::E3006 => "wrong number of arguments",
            ErrorCode::E9001 => "unknown type or member handle",
        }
    }

    /// Check if this is a shape detection error.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003)
    }

    /// Check if this is a disposal classification error.
    pub fn is_disposal_error(&self) -> bool {
        matches!(self, ErrorCode::E2001)
    }

    /// Check if this is an evaluation error.
    pub fn is_eval_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E3001
                | ErrorCode::E3002
                | ErrorCode::E3003
                | ErrorCode::E3004
                | ErrorCode::E3005
                | ErrorCode::E3006
        )
    }

    /// Check if this is an internal error.
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

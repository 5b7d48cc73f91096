//! Diagnostic system for shape-detection, lowering and evaluation errors.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong), reproducing the host compiler's
//!   wording where consumers match on it
//! - Notes (why it's wrong)
//! - Suggestions (how to fix)

mod diagnostic;
mod error_code;

pub use diagnostic::{Attachment, Diagnostic, Severity};
pub use error_code::ErrorCode;

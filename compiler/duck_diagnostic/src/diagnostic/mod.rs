//! Reportable errors and warnings.
//!
//! Inputs are registered types rather than source text, so a diagnostic
//! carries no spans. Its attachments name the types and members involved.

use std::fmt;

use crate::ErrorCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra lines printed under the headline, in the order they were added.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Attachment {
    /// Context: which type or member the check looked at.
    Note(String),
    /// A change that would make the input acceptable.
    Help(String),
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attachment::Note(text) => write!(f, "  = note: {text}"),
            Attachment::Help(text) => write!(f, "  = help: {text}"),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    /// Headline. Lowering errors reuse the host compiler's wording here.
    pub message: String,
    pub attachments: Vec<Attachment>,
}

impl Diagnostic {
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::with_severity(code, Severity::Error)
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::with_severity(code, Severity::Warning)
    }

    fn with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            attachments: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.attachments.push(Attachment::Note(note.into()));
        self
    }

    pub fn with_suggestion(mut self, help: impl Into<String>) -> Self {
        self.attachments.push(Attachment::Help(help.into()));
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Text of every note, skipping suggestions.
    pub fn notes(&self) -> impl Iterator<Item = &str> {
        self.attachments.iter().filter_map(|attachment| match attachment {
            Attachment::Note(text) => Some(text.as_str()),
            Attachment::Help(_) => None,
        })
    }
}

/// ```text
/// error[E2001]: 'ValueTypeEnumerator`1': type used in a using statement ...
///   = note: enumerator returned by `EnumerableWithValueTypeEnumerator<int>.GetEnumerator()`
///   = help: implement `System.IDisposable` on the enumerator
/// ```
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        self.attachments
            .iter()
            .try_for_each(|attachment| write!(f, "\n{attachment}"))
    }
}

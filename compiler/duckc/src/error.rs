use duck_diagnostic::Diagnostic;
use duck_eval::EvalError;
use duck_lower::LowerError;
use thiserror::Error;

/// Failure of a driver command after its arguments were accepted.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error(transparent)]
    Lower(#[from] LowerError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl DriverError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            DriverError::Lower(e) => e.to_diagnostic(),
            DriverError::Eval(e) => e.to_diagnostic(),
        }
    }
}

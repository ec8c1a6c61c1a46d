use apg_domain::FormStep;
use thiserror::Error;

use crate::validate::{ValidationIssue, ValidationResult};

/// Generation was aborted because the form is incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Validation failed: {reason}")]
pub struct ValidationFailure {
    pub reason: ValidationIssue,
    pub focus_target: FormStep,
}

impl ValidationFailure {
    pub fn new(reason: ValidationIssue) -> Self {
        Self {
            reason,
            focus_target: reason.step(),
        }
    }
}

impl ValidationResult {
    /// `Ok(())` for valid input, otherwise the failure to surface.
    pub fn into_result(self) -> Result<(), ValidationFailure> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid {
                reason,
                focus_target,
            } => Err(ValidationFailure {
                reason,
                focus_target,
            }),
        }
    }
}

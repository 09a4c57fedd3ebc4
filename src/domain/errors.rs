use thiserror::Error;

/// Errors raised when a caller breaks the schema contract.
///
/// None of these are user-facing conditions: the UI only offers valid
/// templates, fields, and options, so hitting one means a programming error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("No template is selected")]
    NoActiveTemplate,

    #[error("Field '{field}' is not part of template '{template}'")]
    UnknownField { template: String, field: String },

    #[error("Field '{field}' has no choice named '{choice}'")]
    UnknownChoice { field: String, choice: String },

    #[error("'{value}' is not an option of field '{field}'")]
    InvalidOption { field: String, value: String },

    #[error("Field '{field}' expects {expected}")]
    KindMismatch { field: String, expected: &'static str },
}

pub type DomainResult<T> = Result<T, DomainError>;

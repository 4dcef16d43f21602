// File: src/error.rs
// Purpose: Errors raised while assembling forms

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Field already defined: {0}")]
    DuplicateField(String),
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

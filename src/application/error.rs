use thiserror::Error;

use crate::domain::{EditError, NotFoundError, ValidationError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Expense not found: {0}")]
    NotFound(String),

    #[error("Reference '{reference}' matches {matches} expenses; use more characters")]
    AmbiguousReference { reference: String, matches: usize },
}

impl From<NotFoundError> for AppError {
    fn from(err: NotFoundError) -> Self {
        AppError::NotFound(err.0.to_string())
    }
}

impl From<EditError> for AppError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::NotFound(e) => e.into(),
            EditError::Invalid(e) => e.into(),
        }
    }
}

use thiserror::Error;

use super::{format_cents, Cents, ExpenseId, MAX_AMOUNT_CENTS};

/// Malformed or missing input for an expense.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Description must not be empty")]
    EmptyDescription,

    #[error("Invalid amount '{0}': use a number like '4.50' or '12'")]
    InvalidAmount(String),

    #[error("Amount must be positive")]
    NonPositiveAmount,

    #[error("Amount '{0}' is less than one cent")]
    BelowOneCent(String),

    #[error("Amount must not exceed {}", format_cents(MAX_AMOUNT_CENTS))]
    AmountTooLarge,

    #[error("Ledger total would exceed {}", format_cents(Cents::MAX))]
    TotalOverflow,

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}

/// An operation referenced an id absent from the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Expense not found: {0}")]
pub struct NotFoundError(pub ExpenseId);

/// Failure modes of [`Ledger::edit`](super::Ledger::edit).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::{Category, Cents, ValidationError};

pub type ExpenseId = Uuid;

/// Largest amount a single expense may carry: 1,000,000,000.00
pub const MAX_AMOUNT_CENTS: Cents = 100_000_000_000;

/// A single user-entered expense.
/// `id` and `date` are fixed at creation; the other fields may be edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    /// Free-text label, never empty
    pub description: String,
    /// Amount in cents (always positive)
    pub amount_cents: Cents,
    pub category: Category,
    /// Calendar date the expense was recorded, serialized as YYYY-MM-DD
    pub date: NaiveDate,
}

impl ExpenseRecord {
    /// Create a record with a fresh id. Fields must already be validated.
    pub(crate) fn new(
        description: String,
        amount_cents: Cents,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description,
            amount_cents,
            category,
            date,
        }
    }
}

/// Check the mutable fields of an expense, returning the trimmed description.
pub fn validate_fields(description: &str, amount_cents: Cents) -> Result<String, ValidationError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    if amount_cents <= 0 {
        return Err(ValidationError::NonPositiveAmount);
    }
    if amount_cents > MAX_AMOUNT_CENTS {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(description.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fields_trims_description() {
        assert_eq!(validate_fields("  Coffee ", 450), Ok("Coffee".to_string()));
    }

    #[test]
    fn test_validate_fields_rejects_blank_description() {
        assert_eq!(
            validate_fields("", 450),
            Err(ValidationError::EmptyDescription)
        );
        assert_eq!(
            validate_fields("   \t", 450),
            Err(ValidationError::EmptyDescription)
        );
    }

    #[test]
    fn test_validate_fields_rejects_non_positive_amount() {
        assert_eq!(
            validate_fields("Coffee", 0),
            Err(ValidationError::NonPositiveAmount)
        );
        assert_eq!(
            validate_fields("Coffee", -450),
            Err(ValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_validate_fields_caps_amount() {
        assert!(validate_fields("Car", MAX_AMOUNT_CENTS).is_ok());
        assert_eq!(
            validate_fields("Car", MAX_AMOUNT_CENTS + 1),
            Err(ValidationError::AmountTooLarge)
        );
    }

    #[test]
    fn test_record_serializes_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let record = ExpenseRecord::new("Bus".into(), 200, Category::Transportation, date);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2024-03-09");
        assert_eq!(json["category"], "Transportation");
        assert_eq!(json["amount_cents"], 200);
    }
}

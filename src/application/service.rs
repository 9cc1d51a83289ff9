use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{
    parse_cents, Category, Cents, ExpenseId, ExpenseRecord, Ledger, ParseCentsError,
    ValidationError, MAX_AMOUNT_CENTS,
};

use super::{AppError, CategoryReport};

/// Minimum number of characters accepted as an id prefix.
pub const MIN_ID_PREFIX_LEN: usize = 4;

/// Application service providing high-level operations for the expense ledger.
/// This is the primary interface for any client (CLI shell, tests, a future UI).
/// Inputs arrive as raw text and are parsed and validated here.
#[derive(Debug, Default)]
pub struct ExpenseService {
    ledger: Ledger,
}

/// New values for an edit. `None` keeps the current value of that field.
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.amount.is_none() && self.category.is_none()
    }
}

/// Filter for querying expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub category: Option<Category>,
    /// Inclusive lower bound
    pub from_date: Option<NaiveDate>,
    /// Inclusive upper bound
    pub to_date: Option<NaiveDate>,
    /// Keep only the most recent N matches
    pub limit: Option<usize>,
}

/// An expense together with its 1-based position in the full list.
#[derive(Debug, Clone, Copy)]
pub struct ExpenseEntry<'a> {
    pub position: usize,
    pub record: &'a ExpenseRecord,
}

impl ExpenseService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing ledger.
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ========================
    // Mutations
    // ========================

    /// Record a new expense dated today.
    pub fn add_expense(
        &mut self,
        description: &str,
        amount: &str,
        category: &str,
    ) -> Result<ExpenseRecord, AppError> {
        self.add_expense_on(Utc::now().date_naive(), description, amount, category)
    }

    /// Record a new expense with an explicit date.
    pub fn add_expense_on(
        &mut self,
        date: NaiveDate,
        description: &str,
        amount: &str,
        category: &str,
    ) -> Result<ExpenseRecord, AppError> {
        let result = parse_amount(amount)
            .and_then(|amount_cents| Ok((amount_cents, parse_category(category)?)))
            .and_then(|(amount_cents, category)| {
                self.ledger.add_on(date, description, amount_cents, category)
            });

        let id = result.inspect_err(|e| debug!(error = %e, "Rejected new expense"))?;
        let record = self.record(id)?;

        info!(
            expense_id = %record.id,
            amount_cents = record.amount_cents,
            category = %record.category,
            "Recorded expense"
        );
        Ok(record)
    }

    /// Change an existing expense. Fields left out of `update` keep their current value.
    pub fn edit_expense(
        &mut self,
        reference: &str,
        update: ExpenseUpdate,
    ) -> Result<ExpenseRecord, AppError> {
        let id = self.resolve(reference)?;
        let current = self.record(id)?;

        let amount_cents = match update.amount.as_deref() {
            Some(text) => parse_amount(text)?,
            None => current.amount_cents,
        };
        let category = match update.category.as_deref() {
            Some(text) => parse_category(text)?,
            None => current.category,
        };
        let description = update.description.as_deref().unwrap_or(&current.description);

        self.ledger
            .edit(id, description, amount_cents, category)
            .inspect_err(|e| debug!(expense_id = %id, error = %e, "Rejected edit"))?;

        let record = self.record(id)?;
        info!(
            expense_id = %id,
            old_amount_cents = current.amount_cents,
            new_amount_cents = record.amount_cents,
            "Edited expense"
        );
        Ok(record)
    }

    /// Remove an expense, returning the removed record.
    pub fn delete_expense(&mut self, reference: &str) -> Result<ExpenseRecord, AppError> {
        let id = self.resolve(reference)?;
        let removed = self.ledger.delete(id)?;
        info!(
            expense_id = %id,
            amount_cents = removed.amount_cents,
            "Deleted expense"
        );
        Ok(removed)
    }

    // ========================
    // Queries
    // ========================

    /// Turn a user-facing reference into an expense id.
    ///
    /// A reference is a 1-based list position, a full id, or an id prefix of at
    /// least [`MIN_ID_PREFIX_LEN`] characters. Numeric references are tried as
    /// positions first.
    pub fn resolve(&self, reference: &str) -> Result<ExpenseId, AppError> {
        let reference = reference.trim();
        let not_found = || AppError::NotFound(reference.to_string());

        if let Ok(position) = reference.parse::<usize>() {
            let by_position = position
                .checked_sub(1)
                .and_then(|index| self.ledger.list().get(index));
            if let Some(expense) = by_position {
                return Ok(expense.id);
            }
            if reference.len() < MIN_ID_PREFIX_LEN {
                return Err(not_found());
            }
        }

        if let Ok(id) = Uuid::parse_str(reference) {
            return self.ledger.get(id).map(|e| e.id).ok_or_else(not_found);
        }

        let is_prefix = reference.len() >= MIN_ID_PREFIX_LEN
            && reference.chars().all(|c| c.is_ascii_hexdigit() || c == '-');
        if !is_prefix {
            return Err(not_found());
        }

        let prefix = reference.to_ascii_lowercase();
        let matches: Vec<ExpenseId> = self
            .ledger
            .iter()
            .filter(|e| e.id.to_string().starts_with(&prefix))
            .map(|e| e.id)
            .collect();

        match matches.as_slice() {
            [] => Err(not_found()),
            [id] => Ok(*id),
            _ => Err(AppError::AmbiguousReference {
                reference: reference.to_string(),
                matches: matches.len(),
            }),
        }
    }

    /// Look up a single expense by reference.
    pub fn get_expense(&self, reference: &str) -> Result<ExpenseEntry<'_>, AppError> {
        let id = self.resolve(reference)?;
        self.entries()
            .find(|entry| entry.record.id == id)
            .ok_or_else(|| AppError::NotFound(reference.to_string()))
    }

    /// List expenses in insertion order, optionally filtered.
    pub fn list_expenses(&self, filter: &ExpenseFilter) -> Vec<ExpenseEntry<'_>> {
        let mut entries: Vec<ExpenseEntry<'_>> = self
            .entries()
            .filter(|entry| {
                let e = entry.record;
                filter.category.is_none_or(|c| e.category == c)
                    && filter.from_date.is_none_or(|from| e.date >= from)
                    && filter.to_date.is_none_or(|to| e.date <= to)
            })
            .collect();

        if let Some(limit) = filter.limit {
            let skip = entries.len().saturating_sub(limit);
            entries.drain(..skip);
        }

        entries
    }

    pub fn total_expenses(&self) -> Cents {
        self.ledger.total_expenses()
    }

    pub fn category_total(&self, category: Category) -> Cents {
        self.ledger.category_total(category)
    }

    pub fn category_totals(&self) -> Vec<(Category, Cents)> {
        self.ledger.category_totals()
    }

    pub fn category_report(&self, as_of: NaiveDate) -> CategoryReport {
        CategoryReport::from_ledger(&self.ledger, as_of)
    }

    fn entries(&self) -> impl Iterator<Item = ExpenseEntry<'_>> {
        self.ledger
            .iter()
            .enumerate()
            .map(|(index, record)| ExpenseEntry {
                position: index + 1,
                record,
            })
    }

    fn record(&self, id: ExpenseId) -> Result<ExpenseRecord, AppError> {
        self.ledger
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }
}

/// Parse a user-entered amount into positive cents.
pub fn parse_amount(text: &str) -> Result<Cents, ValidationError> {
    let cents = parse_cents(text).map_err(|e| match e {
        ParseCentsError::InvalidFormat => ValidationError::InvalidAmount(text.to_string()),
        ParseCentsError::OutOfRange => ValidationError::AmountTooLarge,
    })?;

    // "0.004" is positive but rounds away to nothing
    let has_nonzero_digit = text.bytes().any(|b| matches!(b, b'1'..=b'9'));
    if cents == 0 && has_nonzero_digit && !text.trim_start().starts_with('-') {
        return Err(ValidationError::BelowOneCent(text.to_string()));
    }
    if cents <= 0 {
        return Err(ValidationError::NonPositiveAmount);
    }
    if cents > MAX_AMOUNT_CENTS {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(cents)
}

/// Parse a user-entered category label or key.
pub fn parse_category(text: &str) -> Result<Category, ValidationError> {
    text.parse()
        .map_err(|_| ValidationError::UnknownCategory(text.to_string()))
}

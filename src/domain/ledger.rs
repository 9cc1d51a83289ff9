use chrono::{NaiveDate, Utc};

use super::{
    validate_fields, Category, Cents, EditError, ExpenseId, ExpenseRecord, NotFoundError,
    ValidationError,
};

/// Sum of all amounts in a list of expenses.
pub fn compute_total(expenses: &[ExpenseRecord]) -> Cents {
    expenses.iter().map(|e| e.amount_cents).sum()
}

/// Sum of the amounts filed under a single category. Zero when nothing matches.
pub fn compute_category_total(category: Category, expenses: &[ExpenseRecord]) -> Cents {
    expenses
        .iter()
        .filter(|e| e.category == category)
        .map(|e| e.amount_cents)
        .sum()
}

/// Subtotals for every category in display order, including empty ones.
pub fn compute_all_category_totals(expenses: &[ExpenseRecord]) -> Vec<(Category, Cents)> {
    let mut totals: Vec<(Category, Cents)> = Category::ALL.iter().map(|&c| (c, 0)).collect();

    for expense in expenses {
        if let Some((_, total)) = totals.iter_mut().find(|(c, _)| *c == expense.category) {
            *total += expense.amount_cents;
        }
    }

    totals
}

/// The in-memory set of expenses for one session.
///
/// Records keep insertion order. Totals are never stored: every aggregate is
/// recomputed from the records, so they can't drift from the record set.
/// Mutations are refused when the overall total would no longer fit in
/// [`Cents`], so no aggregate can overflow.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    expenses: Vec<ExpenseRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new expense dated today (UTC).
    pub fn add(
        &mut self,
        description: &str,
        amount_cents: Cents,
        category: Category,
    ) -> Result<ExpenseId, ValidationError> {
        self.add_on(Utc::now().date_naive(), description, amount_cents, category)
    }

    /// Record a new expense with an explicit creation date.
    pub fn add_on(
        &mut self,
        date: NaiveDate,
        description: &str,
        amount_cents: Cents,
        category: Category,
    ) -> Result<ExpenseId, ValidationError> {
        let description = validate_fields(description, amount_cents)?;
        self.ensure_total_fits(None, amount_cents)?;
        let record = ExpenseRecord::new(description, amount_cents, category, date);
        let id = record.id;
        self.expenses.push(record);
        Ok(id)
    }

    /// Replace description, amount and category of an existing expense.
    /// The id, date and position of the record are left untouched.
    pub fn edit(
        &mut self,
        id: ExpenseId,
        description: &str,
        amount_cents: Cents,
        category: Category,
    ) -> Result<(), EditError> {
        let index = self.position(id).ok_or(NotFoundError(id))?;
        let description = validate_fields(description, amount_cents)?;
        self.ensure_total_fits(Some(index), amount_cents)?;

        let record = &mut self.expenses[index];
        record.description = description;
        record.amount_cents = amount_cents;
        record.category = category;
        Ok(())
    }

    /// Remove an expense, returning it.
    pub fn delete(&mut self, id: ExpenseId) -> Result<ExpenseRecord, NotFoundError> {
        let index = self.position(id).ok_or(NotFoundError(id))?;
        Ok(self.expenses.remove(index))
    }

    pub fn get(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// All expenses in insertion order.
    pub fn list(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExpenseRecord> {
        self.expenses.iter()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn total_expenses(&self) -> Cents {
        compute_total(&self.expenses)
    }

    pub fn category_total(&self, category: Category) -> Cents {
        compute_category_total(category, &self.expenses)
    }

    pub fn category_totals(&self) -> Vec<(Category, Cents)> {
        compute_all_category_totals(&self.expenses)
    }

    /// Check the total with `amount_cents` added, skipping the record at `replacing`.
    fn ensure_total_fits(
        &self,
        replacing: Option<usize>,
        amount_cents: Cents,
    ) -> Result<(), ValidationError> {
        self.expenses
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != replacing)
            .try_fold(amount_cents, |sum, (_, e)| sum.checked_add(e.amount_cents))
            .map(|_| ())
            .ok_or(ValidationError::TotalOverflow)
    }

    fn position(&self, id: ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|e| e.id == id)
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a ExpenseRecord;
    type IntoIter = std::slice::Iter<'a, ExpenseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

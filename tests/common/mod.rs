// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use outlay::application::ExpenseService;
use outlay::cli::Shell;
use outlay::domain::{Category, Cents, ExpenseId, Ledger};

/// Helper to parse a date string into a NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Sum computed by walking the records, independent of the ledger's own totals
pub fn recomputed_total(ledger: &Ledger) -> Cents {
    ledger.list().iter().map(|e| e.amount_cents).sum()
}

/// Test fixture: a month of typical spending
pub struct SampleExpenses;

impl SampleExpenses {
    /// Coffee and bus fare from the basic scenario
    pub fn create_basic(ledger: &mut Ledger) -> Result<(ExpenseId, ExpenseId)> {
        let coffee = ledger.add_on(
            parse_date("2024-03-01"),
            "Coffee",
            450,
            Category::FoodAndDining,
        )?;
        let bus = ledger.add_on(
            parse_date("2024-03-01"),
            "Bus",
            200,
            Category::Transportation,
        )?;
        Ok((coffee, bus))
    }

    /// Spread across several categories and dates
    pub fn create_month(service: &mut ExpenseService) -> Result<()> {
        service.add_expense_on(parse_date("2024-03-01"), "Groceries", "82.40", "food")?;
        service.add_expense_on(parse_date("2024-03-02"), "Train pass", "45", "transportation")?;
        service.add_expense_on(parse_date("2024-03-05"), "Cinema", "14.50", "entertainment")?;
        service.add_expense_on(parse_date("2024-03-09"), "Dinner out", "37.60", "Food & Dining")?;
        service.add_expense_on(parse_date("2024-03-15"), "Electricity", "120", "utilities")?;
        service.add_expense_on(parse_date("2024-03-20"), "Pharmacy", "9.99", "healthcare")?;
        Ok(())
    }
}

/// Run a script of shell lines and return everything written to the output
pub fn run_script(script: &str) -> Result<String> {
    let mut shell = Shell::new(ExpenseService::new(), Vec::new(), "$");
    shell.run(script.as_bytes(), false)?;
    Ok(String::from_utf8(shell.into_output())?)
}

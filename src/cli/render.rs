//! Plain-text tables for the shell.

use std::io::{self, Write};

use crate::application::{CategoryReport, ExpenseEntry};
use crate::domain::{format_money, Category, Cents, ExpenseRecord};

const RULE_WIDTH: usize = 86;

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// First block of the id, enough to type back as a reference.
pub fn short_id(record: &ExpenseRecord) -> String {
    record.id.simple().to_string()[..8].to_string()
}

pub fn expense_line(record: &ExpenseRecord, currency: &str) -> String {
    format!(
        "{} {} ({}, {})",
        record.description,
        format_money(record.amount_cents, currency),
        record.category,
        record.date.format("%Y-%m-%d")
    )
}

pub fn write_expense_table<W: Write>(
    out: &mut W,
    entries: &[ExpenseEntry<'_>],
    currency: &str,
) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No expenses found.");
    }

    writeln!(
        out,
        "{:>4}  {:<8}  {:<10}  {:<28}  {:<16}  {:>10}",
        "#", "ID", "DATE", "DESCRIPTION", "CATEGORY", "AMOUNT"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    let mut shown: Cents = 0;
    for entry in entries {
        let e = entry.record;
        writeln!(
            out,
            "{:>4}  {:<8}  {:<10}  {:<28}  {:<16}  {:>10}",
            entry.position,
            short_id(e),
            e.date.format("%Y-%m-%d"),
            truncate(&e.description, 28),
            e.category.as_str(),
            format_money(e.amount_cents, currency)
        )?;
        shown += e.amount_cents;
    }

    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "{:<74}  {:>10}",
        format!("{} expense(s)", entries.len()),
        format_money(shown, currency)
    )
}

pub fn write_expense_detail<W: Write>(
    out: &mut W,
    entry: &ExpenseEntry<'_>,
    currency: &str,
) -> io::Result<()> {
    let e = entry.record;
    writeln!(out, "Expense #{}", entry.position)?;
    writeln!(out, "  ID:          {}", e.id)?;
    writeln!(out, "  Description: {}", e.description)?;
    writeln!(out, "  Amount:      {}", format_money(e.amount_cents, currency))?;
    writeln!(out, "  Category:    {}", e.category)?;
    writeln!(out, "  Date:        {}", e.date.format("%Y-%m-%d"))
}

pub fn write_category_totals<W: Write>(
    out: &mut W,
    totals: &[(Category, Cents)],
    total: Cents,
    currency: &str,
) -> io::Result<()> {
    for (category, amount) in totals {
        writeln!(
            out,
            "{:<16} {:>12}",
            category.as_str(),
            format_money(*amount, currency)
        )?;
    }
    writeln!(out, "{}", "-".repeat(29))?;
    writeln!(out, "{:<16} {:>12}", "TOTAL", format_money(total, currency))
}

pub fn write_report_table<W: Write>(
    out: &mut W,
    report: &CategoryReport,
    currency: &str,
) -> io::Result<()> {
    writeln!(out, "Category Spending Report")?;
    writeln!(out, "As of: {}", report.as_of.format("%Y-%m-%d"))?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<16} {:>12} {:>8} {:>12} {:>8}",
        "CATEGORY", "TOTAL", "COUNT", "AVERAGE", "PERCENT"
    )?;
    writeln!(out, "{}", "-".repeat(60))?;

    for cat in &report.categories {
        writeln!(
            out,
            "{:<16} {:>12} {:>8} {:>12} {:>7.1}%",
            cat.category.as_str(),
            format_money(cat.total, currency),
            cat.count,
            format_money(cat.average, currency),
            cat.percentage
        )?;
    }

    writeln!(out, "{}", "-".repeat(60))?;
    writeln!(
        out,
        "{:<16} {:>12} {:>8}",
        "TOTAL",
        format_money(report.total, currency),
        report.count
    )
}

pub fn write_categories<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{:<16} {:<16}", "CATEGORY", "KEY")?;
    writeln!(out, "{}", "-".repeat(32))?;
    for category in Category::ALL {
        writeln!(out, "{:<16} {:<16}", category.as_str(), category.key())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Coffee", 10), "Coffee");
        assert_eq!(truncate("A very long description", 10), "A very ...");
        assert_eq!(truncate("Café crème brûlée", 8), "Café ...");
    }

    #[test]
    fn test_category_totals_lists_every_category() {
        let totals: Vec<(Category, Cents)> = Category::ALL.iter().map(|&c| (c, 0)).collect();
        let mut out = Vec::new();
        write_category_totals(&mut out, &totals, 0, "$").unwrap();
        let text = String::from_utf8(out).unwrap();

        for category in Category::ALL {
            assert!(text.contains(category.as_str()));
        }
        assert!(text.contains("TOTAL"));
        assert!(text.contains("$0.00"));
    }
}

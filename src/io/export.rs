use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::io::Write;

use crate::application::CategoryReport;
use crate::domain::{format_cents, Cents, ExpenseRecord, Ledger};

/// Snapshot of the current session, for JSON export
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub expenses: Vec<ExpenseRecord>,
    pub total_cents: Cents,
}

/// Exporter for rendering the ledger to various formats
pub struct Exporter<'a> {
    ledger: &'a Ledger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Export expenses to CSV format
    pub fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "date", "description", "category", "amount"])?;

        let mut count = 0;
        for expense in self.ledger {
            csv_writer.write_record([
                expense.id.to_string(),
                expense.date.format("%Y-%m-%d").to_string(),
                expense.description.clone(),
                expense.category.as_str().to_string(),
                format_cents(expense.amount_cents),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the per-category report to CSV format
    pub fn export_report_csv<W: Write>(&self, writer: W, as_of: NaiveDate) -> Result<usize> {
        let report = CategoryReport::from_ledger(self.ledger, as_of);
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["category", "total", "count", "average", "percentage"])?;

        for summary in &report.categories {
            csv_writer.write_record([
                summary.category.as_str().to_string(),
                format_cents(summary.total),
                summary.count.to_string(),
                format_cents(summary.average),
                format!("{:.2}", summary.percentage),
            ])?;
        }

        csv_writer.flush()?;
        Ok(report.categories.len())
    }

    /// Export the per-category report as JSON
    pub fn export_report_json<W: Write>(&self, mut writer: W, as_of: NaiveDate) -> Result<CategoryReport> {
        let report = CategoryReport::from_ledger(self.ledger, as_of);
        serde_json::to_writer_pretty(&mut writer, &report)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(report)
    }

    /// Export the whole session as a JSON snapshot
    pub fn export_snapshot_json<W: Write>(&self, mut writer: W) -> Result<SessionSnapshot> {
        let snapshot = SessionSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            expenses: self.ledger.list().to_vec(),
            total_cents: self.ledger.total_expenses(),
        };

        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[test]
    fn test_csv_quotes_descriptions_with_commas() {
        let mut ledger = Ledger::new();
        ledger
            .add("Milk, eggs", 725, Category::FoodAndDining)
            .unwrap();

        let mut out = Vec::new();
        let count = Exporter::new(&ledger).export_expenses_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(count, 1);
        assert!(text.contains("\"Milk, eggs\",Food & Dining,7.25"));
    }

    #[test]
    fn test_empty_ledger_exports_header_only() {
        let ledger = Ledger::new();
        let mut out = Vec::new();
        let count = Exporter::new(&ledger).export_expenses_csv(&mut out).unwrap();

        assert_eq!(count, 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,date,description,category,amount\n"
        );
    }
}

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Category, Cents, Ledger};

#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub as_of: NaiveDate,
    pub categories: Vec<CategorySummary>,
    pub total: Cents,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub total: Cents,
    pub count: usize,
    pub average: Cents,
    pub percentage: f64,
}

impl CategoryReport {
    /// Summarize a ledger by category. Every category gets a row, in display order.
    pub fn from_ledger(ledger: &Ledger, as_of: NaiveDate) -> Self {
        let total = ledger.total_expenses();

        let categories = Category::ALL
            .into_iter()
            .map(|category| {
                let (count, cat_total) = ledger
                    .iter()
                    .filter(|e| e.category == category)
                    .fold((0usize, 0 as Cents), |(n, sum), e| (n + 1, sum + e.amount_cents));

                CategorySummary {
                    category,
                    total: cat_total,
                    count,
                    average: if count > 0 { cat_total / count as Cents } else { 0 },
                    percentage: if total > 0 {
                        (cat_total as f64 / total as f64) * 100.0
                    } else {
                        0.0
                    },
                }
            })
            .collect();

        Self {
            as_of,
            categories,
            total,
            count: ledger.len(),
        }
    }

    /// Rows with at least one expense.
    pub fn non_empty(&self) -> impl Iterator<Item = &CategorySummary> {
        self.categories.iter().filter(|c| c.count > 0)
    }
}

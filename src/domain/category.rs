use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of labels an expense can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    Transportation,
    Entertainment,
    Shopping,
    Utilities,
    Healthcare,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 7] = [
        Category::FoodAndDining,
        Category::Transportation,
        Category::Entertainment,
        Category::Shopping,
        Category::Utilities,
        Category::Healthcare,
        Category::Other,
    ];

    /// Human-readable label, as offered to the user.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Other => "Other",
        }
    }

    /// Short single-word key, convenient to type on a command line.
    pub fn key(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "food",
            Category::Transportation => "transportation",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Utilities => "utilities",
            Category::Healthcare => "healthcare",
            Category::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Accepts either the label or the key, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| {
                c.as_str().eq_ignore_ascii_case(needle) || c.key().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct ParseCategoryError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
            assert_eq!(category.key().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("food & dining".parse(), Ok(Category::FoodAndDining));
        assert_eq!("  FOOD ".parse(), Ok(Category::FoodAndDining));
        assert_eq!("Healthcare".parse(), Ok(Category::Healthcare));
    }

    #[test]
    fn test_category_parse_rejects_unknown() {
        assert_eq!(
            "Groceries".parse::<Category>(),
            Err(ParseCategoryError("Groceries".to_string()))
        );
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::FoodAndDining).unwrap();
        assert_eq!(json, "\"Food & Dining\"");

        let parsed: Category = serde_json::from_str("\"Utilities\"").unwrap();
        assert_eq!(parsed, Category::Utilities);
    }

    #[test]
    fn test_display_order_is_stable() {
        let labels: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        assert_eq!(
            labels,
            [
                "Food & Dining",
                "Transportation",
                "Entertainment",
                "Shopping",
                "Utilities",
                "Healthcare",
                "Other"
            ]
        );
    }
}

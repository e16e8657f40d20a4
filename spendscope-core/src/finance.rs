//! Transaction and category types shared by ingestion, categorization and insights

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A statement row before categorization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawTransaction {
    /// Date of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Human-readable description as printed on the statement
    pub description: String,
    /// Positive = income, negative = expense
    pub amount: f64,
}

impl RawTransaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
        }
    }
}

/// A categorized transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// 1-based position within the uploaded batch
    pub id: u32,
    pub date: NaiveDate,
    pub description: String,
    /// Positive = income, negative = expense
    pub amount: f64,
    pub category: Category,
}

impl Transaction {
    pub fn new(
        id: u32,
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        category: Category,
    ) -> Self {
        Self {
            id,
            date,
            description: description.into(),
            amount,
            category,
        }
    }

    /// Attach a category and id to a raw statement row
    pub fn from_raw(id: u32, raw: &RawTransaction, category: Category) -> Self {
        Self::new(id, raw.date, &raw.description, raw.amount, category)
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

/// Spending categories. Closed set; serialized by display name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Health")]
    Health,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Health & Fitness")]
    HealthAndFitness,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Groceries,
        Category::FoodAndDining,
        Category::Transportation,
        Category::Shopping,
        Category::Health,
        Category::Income,
        Category::BillsAndUtilities,
        Category::Entertainment,
        Category::HealthAndFitness,
    ];

    /// Display name, also the serialized form
    pub fn name(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::FoodAndDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Shopping => "Shopping",
            Category::Health => "Health",
            Category::Income => "Income",
            Category::BillsAndUtilities => "Bills & Utilities",
            Category::Entertainment => "Entertainment",
            Category::HealthAndFitness => "Health & Fitness",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts the display name, case-insensitively; `and` may stand in for `&`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(" and ", " & ");
        Category::ALL
            .into_iter()
            .find(|c| c.name().to_lowercase() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

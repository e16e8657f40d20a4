//! Search and filtering for the transaction list.

use serde::{Deserialize, Serialize};
use spendscope_core::{Category, Transaction};
use std::str::FromStr;

/// Which side of the ledger to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    All,
    Income,
    Expenses,
}

impl View {
    fn admits(&self, txn: &Transaction) -> bool {
        match self {
            View::All => true,
            View::Income => txn.is_income(),
            View::Expenses => txn.is_expense(),
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(View::All),
            "income" => Ok(View::Income),
            "expenses" | "expense" => Ok(View::Expenses),
            other => Err(format!("unknown view: {other} (expected all, income or expenses)")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub query: Option<String>,
    pub category: Option<Category>,
    pub view: View,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        self.query = if q.trim().is_empty() { None } else { Some(q) };
        self
    }

    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    /// Query hits description, category name, date or amount text, ignoring case.
    pub fn matches(&self, txn: &Transaction) -> bool {
        if !self.view.admits(txn) {
            return false;
        }
        if self.category.is_some_and(|c| c != txn.category) {
            return false;
        }
        match &self.query {
            None => true,
            Some(q) => {
                let q = q.to_lowercase();
                txn.description.to_lowercase().contains(&q)
                    || txn.category.name().to_lowercase().contains(&q)
                    || txn.date.to_string().contains(&q)
                    || txn.amount.to_string().contains(&q)
            }
        }
    }

    pub fn apply<'a>(&self, txns: &'a [Transaction]) -> Vec<&'a Transaction> {
        txns.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Unique categories in first-seen order
pub fn categories_present(txns: &[Transaction]) -> Vec<Category> {
    let mut seen = Vec::new();
    for t in txns {
        if !seen.contains(&t.category) {
            seen.push(t.category);
        }
    }
    seen
}

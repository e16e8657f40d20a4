//! Spending by category, the data behind the breakdown chart.

use serde::{Deserialize, Serialize};
use spendscope_core::{Category, Transaction};

use crate::insights::expense_totals;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: Category,
    /// Absolute spending in USD
    pub amount: f64,
    /// Fraction of total spending (0.0 - 1.0)
    pub share: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendingBreakdown {
    /// Total absolute spending across all expense categories
    pub total: f64,
    /// One slice per category with expenses, in first-seen order
    pub slices: Vec<CategorySlice>,
}

impl SpendingBreakdown {
    pub fn from_transactions(txns: &[Transaction]) -> Self {
        let totals = expense_totals(txns);
        let total: f64 = totals.iter().map(|(_, amount)| amount).sum();

        let slices = totals
            .into_iter()
            .map(|(category, amount)| CategorySlice {
                category,
                amount,
                share: if total > 0.0 && total.is_finite() { amount / total } else { 0.0 },
            })
            .collect();

        Self { total, slices }
    }

    /// Slices to draw when one category is selected; all slices otherwise.
    /// Shares stay relative to the full total.
    pub fn focused(&self, category: Option<Category>) -> Vec<&CategorySlice> {
        self.slices
            .iter()
            .filter(|s| category.is_none_or(|c| s.category == c))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(id: u32, amount: f64, category: Category) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2023, 7, id).unwrap();
        Transaction::new(id, date, "t", amount, category)
    }

    #[test]
    fn test_breakdown_groups_expenses() {
        let txns = [
            txn(1, -30.0, Category::Groceries),
            txn(2, 500.0, Category::Income),
            txn(3, -10.0, Category::Transportation),
            txn(4, -60.0, Category::Groceries),
        ];
        let b = SpendingBreakdown::from_transactions(&txns);
        assert_eq!(b.total, 100.0);
        assert_eq!(b.slices.len(), 2);
        assert_eq!(b.slices[0].category, Category::Groceries);
        assert_eq!(b.slices[0].amount, 90.0);
        assert!((b.slices[0].share - 0.9).abs() < 1e-12);
        assert_eq!(b.slices[1].category, Category::Transportation);

        let share_sum: f64 = b.slices.iter().map(|s| s.share).sum();
        assert!((share_sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_focus_on_category() {
        let txns = [txn(1, -30.0, Category::Groceries), txn(2, -10.0, Category::Health)];
        let b = SpendingBreakdown::from_transactions(&txns);
        let focused = b.focused(Some(Category::Health));
        assert_eq!(focused.len(), 1);
        assert_eq!(focused[0].share, 0.25);
        assert_eq!(b.focused(None).len(), 2);
        assert!(b.focused(Some(Category::Entertainment)).is_empty());
    }

    #[test]
    fn test_no_expenses() {
        let b = SpendingBreakdown::from_transactions(&[txn(1, 10.0, Category::Income)]);
        assert!(b.is_empty());
        assert_eq!(b.total, 0.0);
    }
}

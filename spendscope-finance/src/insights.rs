//! Templated spending insights derived from a categorized statement.
//!
//! Everything is recomputed from the full transaction list; there is no
//! incremental state.

use serde::{Deserialize, Serialize};
use spendscope_core::{Category, CurrencyDisplay, Transaction};

/// Food & Dining purchases below this absolute amount count as "small".
pub const SMALL_FOOD_THRESHOLD: f64 = 15.0;
/// How many small food purchases it takes before we call it a pattern.
pub const SMALL_FOOD_MIN_COUNT: usize = 2;
/// Savings rate at or above which the statement is praised.
pub const TARGET_SAVINGS_RATE: f64 = 0.20;

pub const STATIC_RECOMMENDATION: &str = "Consider setting up automatic transfers to a savings account on payday to build your emergency fund.";

/// Aggregate view of one statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSummary {
    pub top_spending_category: Option<Category>,
    /// Share of total spending taken by the top category (0.0 - 1.0)
    pub top_category_share: Option<f64>,
    /// Sum of small Food & Dining purchases, when there were enough of them
    pub savings_opportunity: Option<f64>,
    /// `None` when there is no income to measure against
    pub savings_rate: Option<f64>,
    pub total_spending: f64,
    pub total_income: f64,
    pub insights: Vec<String>,
}

impl InsightSummary {
    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }
}

/// Sum absolute expense amounts per category, keeping first-seen order.
pub(crate) fn expense_totals(txns: &[Transaction]) -> Vec<(Category, f64)> {
    let mut totals: Vec<(Category, f64)> = Vec::new();
    for t in txns.iter().filter(|t| t.is_expense()) {
        match totals.iter_mut().find(|(c, _)| *c == t.category) {
            Some((_, sum)) => *sum += t.abs_amount(),
            None => totals.push((t.category, t.abs_amount())),
        }
    }
    totals
}

/// Derive insights, formatting money in USD.
pub fn derive_insights(txns: &[Transaction]) -> InsightSummary {
    derive_insights_with(txns, &CurrencyDisplay::default())
}

/// Derive insights, formatting money with the given display currency.
pub fn derive_insights_with(txns: &[Transaction], money: &CurrencyDisplay) -> InsightSummary {
    let mut summary = InsightSummary::default();
    if txns.is_empty() {
        return summary;
    }

    let expenses: Vec<&Transaction> = txns.iter().filter(|t| t.is_expense()).collect();
    let income_total: f64 = txns.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let spending_total: f64 = expenses.iter().map(|t| t.abs_amount()).sum();
    summary.total_income = income_total;
    summary.total_spending = spending_total;

    // Top category; strict `>` keeps the first-seen category on ties
    let mut top: Option<(Category, f64)> = None;
    for (category, sum) in expense_totals(txns) {
        if top.is_none_or(|(_, best)| sum > best) {
            top = Some((category, sum));
        }
    }
    // Overflowing sums make every ratio meaningless
    let ratios_defined = spending_total.is_finite() && income_total.is_finite();

    if let Some((category, sum)) = top.filter(|_| ratios_defined && spending_total > 0.0) {
        let share = sum / spending_total;
        summary.top_spending_category = Some(category);
        summary.top_category_share = Some(share);
        summary.insights.push(format!(
            "Your highest spending category is {category}, accounting for {:.1}% of your expenses.",
            share * 100.0
        ));
    }

    let small_food: Vec<f64> = expenses
        .iter()
        .filter(|t| t.category == Category::FoodAndDining && t.abs_amount() < SMALL_FOOD_THRESHOLD)
        .map(|t| t.abs_amount())
        .collect();
    if small_food.len() >= SMALL_FOOD_MIN_COUNT {
        let potential: f64 = small_food.iter().sum();
        summary.savings_opportunity = Some(potential);
        summary.insights.push(format!(
            "You spent {} on small food purchases. Consider preparing meals at home to save money.",
            money.format(potential)
        ));
    }

    let entertainment: Vec<f64> = expenses
        .iter()
        .filter(|t| t.category == Category::Entertainment)
        .map(|t| t.abs_amount())
        .collect();
    let total: f64 = entertainment.iter().sum();
    if !entertainment.is_empty() && total.is_finite() {
        summary.insights.push(format!(
            "Your entertainment subscriptions cost {}. Review if you're using all services regularly.",
            money.format(total)
        ));
    }

    if ratios_defined && income_total > 0.0 {
        let rate = (income_total - spending_total) / income_total;
        summary.savings_rate = Some(rate);
        let pct = rate * 100.0;
        summary.insights.push(if rate < TARGET_SAVINGS_RATE {
            format!("Your current savings rate is {pct:.1}%. Aim for at least 20% to build financial security.")
        } else {
            format!("Great job! Your savings rate is {pct:.1}%, which is above the recommended 20%.")
        });
    }

    summary.insights.push(STATIC_RECOMMENDATION.to_string());
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spendscope_core::{Currency, ExchangeRates};

    fn txn(id: u32, amount: f64, category: Category) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2023, 7, id.min(28)).unwrap();
        Transaction::new(id, date, format!("txn {id}"), amount, category)
    }

    #[test]
    fn test_empty_statement() {
        let summary = derive_insights(&[]);
        assert_eq!(summary, InsightSummary::default());
        assert!(summary.is_empty());
        assert!(summary.top_spending_category.is_none());
        assert!(summary.savings_opportunity.is_none());
    }

    #[test]
    fn test_small_example() {
        let txns = [
            txn(1, -85.43, Category::Groceries),
            txn(2, -4.50, Category::FoodAndDining),
            txn(3, 2500.00, Category::Income),
        ];
        let s = derive_insights(&txns);

        assert!((s.total_spending - 89.93).abs() < 1e-9);
        assert_eq!(s.top_spending_category, Some(Category::Groceries));
        assert!((s.savings_rate.unwrap() - 0.964028).abs() < 1e-6);
        assert_eq!(s.savings_opportunity, None);
        assert_eq!(
            s.insights,
            vec![
                "Your highest spending category is Groceries, accounting for 95.0% of your expenses.".to_string(),
                "Great job! Your savings rate is 96.4%, which is above the recommended 20%.".to_string(),
                STATIC_RECOMMENDATION.to_string(),
            ]
        );
    }

    #[test]
    fn test_small_food_needs_two_purchases() {
        let two = [
            txn(1, -4.50, Category::FoodAndDining),
            txn(2, -3.00, Category::FoodAndDining),
            txn(3, -40.00, Category::FoodAndDining),
        ];
        let s = derive_insights(&two);
        assert_eq!(s.savings_opportunity, Some(7.5));
        assert!(s.insights.contains(
            &"You spent $7.50 on small food purchases. Consider preparing meals at home to save money."
                .to_string()
        ));

        let one = [txn(1, -4.50, Category::FoodAndDining), txn(2, -40.0, Category::FoodAndDining)];
        let s = derive_insights(&one);
        assert_eq!(s.savings_opportunity, None);
        assert!(!s.insights.iter().any(|i| i.contains("small food")));
    }

    #[test]
    fn test_threshold_is_strict() {
        let txns = [
            txn(1, -15.00, Category::FoodAndDining),
            txn(2, -14.99, Category::FoodAndDining),
        ];
        assert_eq!(derive_insights(&txns).savings_opportunity, None);
    }

    #[test]
    fn test_single_entertainment_charge_is_reported() {
        let txns = [txn(1, -14.99, Category::Entertainment), txn(2, 100.0, Category::Income)];
        let s = derive_insights(&txns);
        assert_eq!(
            s.insights[1],
            "Your entertainment subscriptions cost $14.99. Review if you're using all services regularly."
        );
    }

    #[test]
    fn test_zero_income_skips_savings_rate() {
        let txns = [txn(1, -50.0, Category::Shopping), txn(2, -25.0, Category::Health)];
        let s = derive_insights(&txns);
        assert_eq!(s.savings_rate, None);
        assert_eq!(s.total_income, 0.0);
        assert!(s.insights.iter().all(|i| !i.contains("savings rate")));
        assert!(s.insights.iter().all(|i| !i.contains("NaN") && !i.contains("inf")));
        assert_eq!(s.insights.len(), 2);
    }

    #[test]
    fn test_overflowing_totals_skip_ratio_sentences() {
        let txns = [
            txn(1, 1e308, Category::Income),
            txn(2, 1e308, Category::Income),
            txn(3, -1e308, Category::Shopping),
            txn(4, -1e308, Category::Shopping),
        ];
        let s = derive_insights(&txns);

        assert!(s.total_income.is_infinite());
        assert!(s.total_spending.is_infinite());
        assert_eq!(s.top_spending_category, None);
        assert_eq!(s.top_category_share, None);
        assert_eq!(s.savings_rate, None);
        assert_eq!(s.insights, vec![STATIC_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn test_low_savings_rate_variant() {
        let txns = [txn(1, 1000.0, Category::Income), txn(2, -900.0, Category::Shopping)];
        let s = derive_insights(&txns);
        assert_eq!(
            s.insights[1],
            "Your current savings rate is 10.0%. Aim for at least 20% to build financial security."
        );
    }

    #[test]
    fn test_negative_savings_rate() {
        let txns = [txn(1, 100.0, Category::Income), txn(2, -150.0, Category::Shopping)];
        let s = derive_insights(&txns);
        assert_eq!(s.savings_rate, Some(-0.5));
        assert!(s.insights[1].starts_with("Your current savings rate is -50.0%."));
    }

    #[test]
    fn test_exactly_twenty_percent_is_praised() {
        let txns = [txn(1, 100.0, Category::Income), txn(2, -80.0, Category::Shopping)];
        let s = derive_insights(&txns);
        assert!(s.insights[1].starts_with("Great job! Your savings rate is 20.0%"));
    }

    #[test]
    fn test_income_only_has_no_top_category() {
        let s = derive_insights(&[txn(1, 2500.0, Category::Income)]);
        assert_eq!(s.top_spending_category, None);
        assert_eq!(s.savings_rate, Some(1.0));
        assert_eq!(s.insights.len(), 2);
    }

    #[test]
    fn test_zero_amounts_join_neither_side() {
        let txns = [
            txn(1, 0.0, Category::Shopping),
            txn(2, -10.0, Category::Health),
            txn(3, 50.0, Category::Income),
        ];
        let s = derive_insights(&txns);
        assert_eq!(s.total_spending, 10.0);
        assert_eq!(s.total_income, 50.0);
        assert_eq!(s.top_spending_category, Some(Category::Health));
    }

    #[test]
    fn test_tie_goes_to_first_seen_category() {
        let txns = [
            txn(1, -20.0, Category::Transportation),
            txn(2, -20.0, Category::Groceries),
        ];
        assert_eq!(derive_insights(&txns).top_spending_category, Some(Category::Transportation));
    }

    #[test]
    fn test_sentences_use_display_currency() {
        let money = CurrencyDisplay::new(Currency::Inr, ExchangeRates::new(80.0));
        let txns = [
            txn(1, -4.0, Category::FoodAndDining),
            txn(2, -6.0, Category::FoodAndDining),
        ];
        let s = derive_insights_with(&txns, &money);
        // Summary numbers stay in USD
        assert_eq!(s.savings_opportunity, Some(10.0));
        assert!(s.insights[1].starts_with("You spent ₹800.00 on small food purchases."));
    }
}

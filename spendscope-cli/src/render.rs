//! Plain-text rendering of a statement report.

use spendscope_core::{Category, CurrencyDisplay, Transaction};
use spendscope_finance::{StatementReport, TransactionFilter};

const BAR_WIDTH: f64 = 30.0;

pub fn print_report(
    report: &StatementReport,
    filter: &TransactionFilter,
    money: &CurrencyDisplay,
) {
    print_breakdown(report, filter.category, money);
    println!();
    print_insights(report, money);
    println!();
    print_transactions(&report.transactions, filter, money);
}

fn print_breakdown(report: &StatementReport, focus: Option<Category>, money: &CurrencyDisplay) {
    let b = &report.breakdown;
    println!("## Spending by Category (total: {})\n", money.format(b.total));
    if b.is_empty() {
        println!("No spending data available");
        return;
    }
    for slice in b.focused(focus) {
        let bar = "#".repeat((slice.share * BAR_WIDTH).round() as usize);
        println!(
            "  {:<18} {:>14} {:>6.1}%  {}",
            slice.category.name(),
            money.format(slice.amount),
            slice.share * 100.0,
            bar
        );
    }
}

fn print_insights(report: &StatementReport, money: &CurrencyDisplay) {
    println!("## Financial Insights & Recommendations\n");
    let insights = report.insights();
    if insights.is_empty() {
        println!("Upload a bank statement to get personalized insights");
        return;
    }

    if let Some(top) = report.summary.top_spending_category {
        println!("Top spending: {top}");
    }
    if let Some(amount) = report.summary.savings_opportunity {
        println!(
            "Savings opportunity: {} (by reducing small food purchases)",
            money.format(amount)
        );
    }
    println!();
    for insight in insights {
        println!("- {insight}");
    }

    if let Some(analysis) = &report.analysis {
        if !analysis.savings_opportunities.is_empty() {
            println!("\nSavings opportunities:");
            for o in &analysis.savings_opportunities {
                println!("- {}: {}", money.format(o.amount), o.description);
            }
        }
        if !analysis.budget_recommendations.is_empty() {
            println!("\nBudget recommendations:");
            for r in &analysis.budget_recommendations {
                println!("- {r}");
            }
        }
    }
}

fn print_transactions(txns: &[Transaction], filter: &TransactionFilter, money: &CurrencyDisplay) {
    let shown = filter.apply(txns);
    println!("## Transactions ({} of {})\n", shown.len(), txns.len());
    for t in shown {
        println!(
            "  {:>3}  {:<6}  {:<32} {:<18} {:>14}",
            t.id,
            t.date.format("%b %-d").to_string(),
            truncate(&t.description, 32),
            t.category.name(),
            money.format(t.amount)
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Coffee Shop", 32), "Coffee Shop");
        assert_eq!(truncate("ABCDEFGHIJ", 8), "ABCDE...");
    }
}

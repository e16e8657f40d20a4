//! Built-in demo statement, served for PDF uploads until text extraction exists.

use chrono::NaiveDate;
use spendscope_core::RawTransaction;
use std::time::Duration;
use tracing::info;

const DEMO_ROWS: [(&str, &str, f64); 12] = [
    ("2023-07-01", "Grocery Store", -85.43),
    ("2023-07-03", "Coffee Shop", -4.50),
    ("2023-07-05", "Gas Station", -45.00),
    ("2023-07-07", "Online Retailer", -65.99),
    ("2023-07-10", "Pharmacy", -12.99),
    ("2023-07-12", "Salary", 2500.00),
    ("2023-07-15", "Restaurant", -78.35),
    ("2023-07-18", "Utility Bill", -95.40),
    ("2023-07-20", "Streaming Service", -14.99),
    ("2023-07-22", "Mobile Phone", -65.00),
    ("2023-07-25", "Public Transit", -25.00),
    ("2023-07-28", "Gym Membership", -49.99),
];

/// The twelve-row July 2023 demo statement.
pub fn demo_statement() -> Vec<RawTransaction> {
    DEMO_ROWS
        .iter()
        .filter_map(|(date, desc, amount)| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
            Some(RawTransaction::new(date, *desc, *amount))
        })
        .collect()
}

/// Supply the demo statement after a simulated processing delay.
pub async fn demo_statement_after(delay: Duration) -> Vec<RawTransaction> {
    if !delay.is_zero() {
        info!(delay_ms = delay.as_millis() as u64, "processing statement");
        tokio::time::sleep(delay).await;
    }
    demo_statement()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_statement_rows() {
        let txns = demo_statement();
        assert_eq!(txns.len(), 12);
        assert_eq!(txns[0].description, "Grocery Store");
        assert_eq!(txns[5].amount, 2500.0);
        assert_eq!(txns.iter().filter(|t| t.amount > 0.0).count(), 1);
    }

    #[tokio::test]
    async fn test_demo_statement_after_zero_delay() {
        let txns = demo_statement_after(Duration::ZERO).await;
        assert_eq!(txns, demo_statement());
    }
}

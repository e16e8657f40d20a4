//! Extracted statement text parser
//!
//! Expected rows after PDF-to-text (header and summary lines are ignored):
//!   2023-07-01     Grocery Store                 -85.43
//!   07/12/2023     PAYROLL ACME INC           $2,500.00
//!   07/28/2023     WALMART.COM                 - $14.05

use anyhow::Result;
use regex::Regex;
use spendscope_core::RawTransaction;

use super::{parse_statement_amount, parse_statement_date};

/// Parse extracted statement text into raw transactions.
pub fn parse_statement_text(text: &str) -> Result<Vec<RawTransaction>> {
    let txn_re = Regex::new(concat!(
        r"^\s*(?P<date>\d{4}-\d{2}-\d{2}|\d{1,2}/\d{1,2}/\d{4})\s+",
        r"(?P<desc>.+?)\s+",
        r"(?P<amount>[-+]?\s*\$?\d{1,3}(?:,?\d{3})*(?:\.\d{2})?)\s*$"
    ))?;

    let mut out = Vec::new();
    for line in text.lines() {
        let Some(caps) = txn_re.captures(line) else {
            continue;
        };
        let Some(date) = parse_statement_date(&caps["date"]) else {
            continue;
        };
        let Some(amount) = parse_statement_amount(&caps["amount"]) else {
            continue;
        };

        out.push(RawTransaction::new(date, caps["desc"].trim(), amount));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_basic_rows() {
        let text = r#"
ACCOUNT ACTIVITY
Date           Description                         Amount
2023-07-01     Grocery Store                       -85.43
07/12/2023     PAYROLL ACME INC                 $2,500.00
07/28/2023     WALMART.COM                       - $14.05
Ending balance                                   2,400.52
"#;

        let txns = parse_statement_text(text).unwrap();
        assert_eq!(txns.len(), 3);
        assert_eq!(txns[0].amount, -85.43);
        assert_eq!(txns[0].description, "Grocery Store");
        assert_eq!(txns[1].amount, 2500.0);
        assert_eq!(txns[2].amount, -14.05);
        assert!(txns[2].description.contains("WALMART"));
    }

    #[test]
    fn test_ignores_invalid_calendar_dates() {
        let text = "2023-02-30   Coffee Shop   -4.50\n";
        assert!(parse_statement_text(text).unwrap().is_empty());
    }
}

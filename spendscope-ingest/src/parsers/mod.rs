//! Statement parsers. Each returns bank-agnostic `RawTransaction`s.

pub mod csv_statement;
pub mod text_statement;

pub use csv_statement::{parse_csv_reader, parse_csv_statement};
pub use text_statement::parse_statement_text;

use chrono::NaiveDate;

/// Accepts `YYYY-MM-DD` and `MM/DD/YYYY`.
pub(crate) fn parse_statement_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

/// Parses `-85.43`, `$1,234.56`, `- $14.05`, `+2500`, `-$4.50`.
pub(crate) fn parse_statement_amount(s: &str) -> Option<f64> {
    let compact: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '$')
        .collect();
    if compact.is_empty() {
        return None;
    }
    compact.parse::<f64>().ok().filter(|a| a.is_finite())
}

//! Display currencies, conversion from the USD base, and locale formatting

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Approximate USD to INR rate used when nothing is configured
pub const DEFAULT_USD_TO_INR: f64 = 75.0;

/// Supported display currencies. Amounts are stored in USD.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "INR")]
    Inr,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Inr => "INR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported currency: {0} (expected USD or INR)")]
pub struct UnsupportedCurrency(pub String);

impl FromStr for Currency {
    type Err = UnsupportedCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "INR" => Ok(Currency::Inr),
            _ => Err(UnsupportedCurrency(s.to_string())),
        }
    }
}

/// Fixed exchange rates relative to the USD base
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ExchangeRates {
    pub usd_to_inr: f64,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self {
            usd_to_inr: DEFAULT_USD_TO_INR,
        }
    }
}

impl ExchangeRates {
    pub fn new(usd_to_inr: f64) -> Self {
        Self { usd_to_inr }
    }

    fn multiplier(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => 1.0,
            Currency::Inr => self.usd_to_inr,
        }
    }

    /// Convert a USD amount into `target`
    pub fn convert(&self, amount_usd: f64, target: Currency) -> f64 {
        amount_usd * self.multiplier(target)
    }

    /// Convert an amount in `from` back to USD
    pub fn to_base(&self, amount: f64, from: Currency) -> f64 {
        amount / self.multiplier(from)
    }
}

/// Format an amount already expressed in `currency`.
///
/// USD uses western grouping (`$1,234.56`), INR uses Indian grouping
/// (`₹1,23,456.78`). Negative amounts get a leading minus.
pub fn format_amount(amount: f64, currency: Currency) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let grouped = match currency {
        Currency::Usd => group_western(&whole),
        Currency::Inr => group_indian(&whole),
    };

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{}{grouped}.{frac:02}", currency.symbol())
}

fn group_western(digits: &str) -> String {
    group_from_right(digits, 3, 3)
}

fn group_indian(digits: &str) -> String {
    group_from_right(digits, 3, 2)
}

// First group (rightmost) has `first` digits, the rest `rest` digits.
fn group_from_right(digits: &str, first: usize, rest: usize) -> String {
    if digits.len() <= first {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - first);
    let mut groups = vec![tail.to_string()];
    let mut remaining = head;
    while remaining.len() > rest {
        let (h, t) = remaining.split_at(remaining.len() - rest);
        groups.push(t.to_string());
        remaining = h;
    }
    groups.push(remaining.to_string());
    groups.reverse();
    groups.join(",")
}

/// Selected display currency plus the rates used to reach it
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CurrencyDisplay {
    pub currency: Currency,
    pub rates: ExchangeRates,
}

impl CurrencyDisplay {
    pub fn new(currency: Currency, rates: ExchangeRates) -> Self {
        Self { currency, rates }
    }

    /// Convert a USD amount into the display currency
    pub fn convert(&self, amount_usd: f64) -> f64 {
        self.rates.convert(amount_usd, self.currency)
    }

    /// Convert and format a USD amount
    pub fn format(&self, amount_usd: f64) -> String {
        format_amount(self.convert(amount_usd), self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_amount(0.0, Currency::Usd), "$0.00");
        assert_eq!(format_amount(7.5, Currency::Usd), "$7.50");
        assert_eq!(format_amount(-85.43, Currency::Usd), "-$85.43");
        assert_eq!(format_amount(1234.5, Currency::Usd), "$1,234.50");
        assert_eq!(format_amount(1234567.891, Currency::Usd), "$1,234,567.89");
    }

    #[test]
    fn test_format_inr_indian_grouping() {
        assert_eq!(format_amount(999.0, Currency::Inr), "₹999.00");
        assert_eq!(format_amount(123456.78, Currency::Inr), "₹1,23,456.78");
        assert_eq!(format_amount(12345678.0, Currency::Inr), "₹1,23,45,678.00");
        assert_eq!(format_amount(-6407.25, Currency::Inr), "-₹6,407.25");
    }

    #[test]
    fn test_convert_uses_injected_rate() {
        let rates = ExchangeRates::new(83.0);
        assert_eq!(rates.convert(2.0, Currency::Inr), 166.0);
        assert_eq!(rates.convert(2.0, Currency::Usd), 2.0);
        assert_eq!(ExchangeRates::default().convert(1.0, Currency::Inr), 75.0);
    }

    #[test]
    fn test_round_trip_conversion() {
        let rates = ExchangeRates::new(82.37);
        for amount in [0.01, -85.43, 2500.0, 14.99] {
            let there = rates.convert(amount, Currency::Inr);
            let back = rates.to_base(there, Currency::Inr);
            assert!((back - amount).abs() < 1e-9, "{amount} came back as {back}");
        }
    }

    #[test]
    fn test_display_converts_then_formats() {
        let display = CurrencyDisplay::new(Currency::Inr, ExchangeRates::default());
        assert_eq!(display.format(-85.43), "-₹6,407.25");
        assert_eq!(CurrencyDisplay::default().format(2500.0), "$2,500.00");
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!("inr".parse::<Currency>(), Ok(Currency::Inr));
        assert_eq!("USD".parse::<Currency>(), Ok(Currency::Usd));
        assert!("EUR".parse::<Currency>().is_err());
    }
}

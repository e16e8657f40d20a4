//! spendscope-core: transaction, category and currency types

pub mod currency;
pub mod finance;

pub use currency::{Currency, CurrencyDisplay, ExchangeRates, format_amount};
pub use finance::{Category, RawTransaction, Transaction, UnknownCategory};

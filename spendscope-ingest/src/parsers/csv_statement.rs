//! Generic CSV statement export.
//!
//! Expects a header row naming `date`, `description` and `amount` columns
//! (any order, any case, extra columns ignored):
//!   Date,Description,Amount
//!   2023-07-01,Grocery Store,-85.43
//!   07/12/2023,Salary,"$2,500.00"

use anyhow::{Context, Result, bail};
use spendscope_core::RawTransaction;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use super::{parse_statement_amount, parse_statement_date};

struct Columns {
    date: usize,
    description: usize,
    amount: usize,
}

fn locate_columns(headers: &csv::StringRecord) -> Result<Columns> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    match (find("date"), find("description"), find("amount")) {
        (Some(date), Some(description), Some(amount)) => Ok(Columns {
            date,
            description,
            amount,
        }),
        _ => bail!(
            "missing required columns (need date, description, amount; found: {})",
            headers.iter().collect::<Vec<_>>().join(", ")
        ),
    }
}

/// Parse CSV statement data from any reader. Rows with an unparseable date or
/// amount are skipped.
pub fn parse_csv_reader<R: Read>(reader: R) -> Result<Vec<RawTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("reading CSV header")?.clone();
    let cols = locate_columns(&headers)?;

    let mut txns = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result?;

        let date = match record.get(cols.date).and_then(parse_statement_date) {
            Some(d) => d,
            None => {
                debug!(row = line + 2, "skipping CSV row with unparseable date");
                continue;
            }
        };
        let amount = match record.get(cols.amount).and_then(parse_statement_amount) {
            Some(a) => a,
            None => {
                debug!(row = line + 2, "skipping CSV row with unparseable amount");
                continue;
            }
        };

        txns.push(RawTransaction::new(
            date,
            record.get(cols.description).unwrap_or("").trim(),
            amount,
        ));
    }

    Ok(txns)
}

/// Parse a CSV statement file.
pub fn parse_csv_statement(path: impl AsRef<Path>) -> Result<Vec<RawTransaction>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_csv_reader(file).with_context(|| format!("parsing {}", path.display()))
}

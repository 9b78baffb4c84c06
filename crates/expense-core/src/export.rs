//! CSV export of the full ledger.

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use expense_domain::{ExpenseRecord, ISO_DATE_FORMAT};

use crate::CoreError;

pub const CSV_HEADER: [&str; 5] = ["Date", "Category", "Description", "Amount", "Recurring"];

/// Writes every record in insertion order.
///
/// `Description` is wrapped in double quotes and nothing else is quoted or escaped, so a
/// description containing quotes or commas yields a malformed row. Consumers of the existing
/// export format depend on this layout.
pub fn write_csv<W: Write>(records: &[ExpenseRecord], writer: W) -> Result<(), CoreError> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for record in records {
        wtr.write_record([
            record.date.format(ISO_DATE_FORMAT).to_string(),
            record.category.to_string(),
            format!("\"{}\"", record.description),
            record.amount.to_string(),
            record.recurring.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(records: &[ExpenseRecord]) -> Result<String, CoreError> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| CoreError::Export(err.to_string()))
}

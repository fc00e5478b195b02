//! CSV deserialization.
//!
//! Each CSV row is deserialized by serde into a flat `CsvTransaction` and then
//! mapped into a [`TransactionRecord`]. Kind and amount are not judged here;
//! that is the validator's job.
//!
//! Rows that cannot be deserialized at all come out as [`MalformedRow`] so the
//! engine can report them like any other refusal. I/O errors from the
//! underlying reader are passed on to the caller.

use rust_decimal::Decimal;
use serde::Deserialize;
use crate::domain::{ClientId, TransactionId, TransactionRecord};

/// Flat representation of a single CSV row. `amount` is optional because
/// dispute/resolve/chargeback rows don't carry one. It is read from its text
/// form so that the written scale survives.
#[derive(Debug, Clone, Deserialize)]
struct CsvTransaction {
    r#type: String,
    client: ClientId,
    tx: TransactionId,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    amount: Option<Decimal>,
}

impl From<CsvTransaction> for TransactionRecord {
    fn from(row: CsvTransaction) -> Self {
        TransactionRecord::new(row.r#type, row.client, row.tx, row.amount)
    }
}

/// A row that could not be turned into a record (bad id, bad amount, too few
/// fields). Carries the reader's description, position included.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed row: {0}")]
pub struct MalformedRow(pub String);

/// One data row: a record, or the reason it could not be read.
pub type ParsedRow = Result<TransactionRecord, MalformedRow>;

#[derive(Debug, thiserror::Error)]
#[error("failed to read transactions: {0}")]
pub struct InputError(#[from] csv::Error);

/// Reader settings for transaction files: trimmed fields, optional trailing
/// amount column.
pub fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All).flexible(true);
    builder
}

/// Returns an iterator that lazily deserializes CSV rows into transaction
/// records. Only I/O errors end up in the outer `Err`.
pub fn deserialize_csv<D: std::io::Read>(
    reader: &mut csv::Reader<D>,
) -> impl Iterator<Item = Result<ParsedRow, InputError>> {
    reader
        .deserialize::<CsvTransaction>()
        .map(|result| match result {
            Ok(row) => Ok(Ok(TransactionRecord::from(row))),
            Err(e) if e.is_io_error() => Err(InputError::from(e)),
            Err(e) => Ok(Err(MalformedRow(e.to_string()))),
        })
}

//! Serializes final account state to CSV.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{domain::ClientId, engine::ClientAccounts};

const HEADER: [&str; 5] = ["client", "available", "held", "total", "locked"];

/// Maps directly to the required output columns: client, available, held, total, locked.
#[derive(Debug, Serialize)]
struct OutputCsv {
    client: ClientId,
    available: Decimal,
    held: Decimal,
    total: Decimal,
    locked: bool,
}

/// Values are written at the scale they were computed with; only the sign of
/// zero is normalized.
fn unsigned_zero(mut value: Decimal) -> Decimal {
    if value.is_zero() {
        value.set_sign_positive(true);
    }
    value
}

/// Writes the header and one row per client, in first-seen order. The header
/// is written even when there are no accounts.
pub fn print_accounts(
    client_accounts: &ClientAccounts,
    writer: impl std::io::Write,
) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADER)?;
    for (client_id, account) in client_accounts.iter() {
        let balance = &account.balance;
        let output_csv = OutputCsv {
            client: client_id,
            available: unsigned_zero(balance.available()),
            held: unsigned_zero(balance.held()),
            total: unsigned_zero(balance.total()?),
            locked: account.locked,
        };
        wtr.serialize(output_csv)?;
    }
    wtr.flush()?;
    Ok(())
}

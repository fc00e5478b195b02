#![allow(dead_code)]

use ledger_reconciler::{
    diagnostics::{RecordedRefusals, RefusalReason},
    domain::{Account, Balance, ClientId, TransactionRecord},
    engine::PaymentsEngine,
};
use rust_decimal::Decimal;

pub fn run(records: Vec<TransactionRecord>) -> PaymentsEngine<RecordedRefusals> {
    let mut engine = PaymentsEngine::with_sink(RecordedRefusals::new());
    engine.process_transactions(records);
    engine
}

pub fn account(available: Decimal, held: Decimal, locked: bool) -> Account {
    Account {
        balance: Balance::new(available, held),
        locked,
    }
}

/// Reasons collected by the engine's sink, in order.
pub fn refusal_reasons(engine: &PaymentsEngine<RecordedRefusals>) -> Vec<RefusalReason> {
    engine
        .sink()
        .as_slice()
        .iter()
        .map(|refusal| refusal.reason.clone())
        .collect()
}

pub fn deposit(client: u16, tx: u32, amount: Decimal) -> TransactionRecord {
    TransactionRecord::new("deposit", client.into(), tx.into(), Some(amount))
}

pub fn withdrawal(client: u16, tx: u32, amount: Decimal) -> TransactionRecord {
    TransactionRecord::new("withdrawal", client.into(), tx.into(), Some(amount))
}

pub fn dispute(client: u16, tx: u32) -> TransactionRecord {
    TransactionRecord::new("dispute", client.into(), tx.into(), None)
}

pub fn resolve(client: u16, tx: u32) -> TransactionRecord {
    TransactionRecord::new("resolve", client.into(), tx.into(), None)
}

pub fn chargeback(client: u16, tx: u32) -> TransactionRecord {
    TransactionRecord::new("chargeback", client.into(), tx.into(), None)
}

pub fn client(id: u16) -> ClientId {
    ClientId::from(id)
}

//! Append-only record of accepted deposits and withdrawals, plus the set of
//! transaction IDs currently under dispute.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::domain::{ClientId, Deposit, TransactionId, Withdrawal};

/// The original movement of an accepted deposit or withdrawal.
///
/// `amount` is always the positive magnitude that a dispute moves from
/// available to held, whichever kind created the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    pub transaction_id: TransactionId,
    pub client_id: ClientId,
    pub amount: Decimal,
}

impl From<&Deposit> for LedgerEntry {
    fn from(deposit: &Deposit) -> Self {
        Self {
            transaction_id: deposit.transaction_id(),
            client_id: deposit.client_id(),
            amount: deposit.amount(),
        }
    }
}

impl From<&Withdrawal> for LedgerEntry {
    fn from(withdrawal: &Withdrawal) -> Self {
        Self {
            transaction_id: withdrawal.transaction_id(),
            client_id: withdrawal.client_id(),
            amount: withdrawal.amount(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Ledger {
    entries: HashMap<TransactionId, LedgerEntry>,
    disputed: HashSet<TransactionId>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new entry. Callers check [`Ledger::is_unique`] first; an
    /// existing entry is never overwritten.
    pub fn record(&mut self, entry: LedgerEntry) {
        self.entries.entry(entry.transaction_id).or_insert(entry);
    }
    pub fn lookup(&self, tx_id: TransactionId) -> Option<&LedgerEntry> {
        self.entries.get(&tx_id)
    }
    /// True iff no deposit or withdrawal from any client used this id.
    pub fn is_unique(&self, tx_id: TransactionId) -> bool {
        !self.entries.contains_key(&tx_id)
    }

    pub fn mark_disputed(&mut self, tx_id: TransactionId) {
        self.disputed.insert(tx_id);
    }
    pub fn unmark_disputed(&mut self, tx_id: TransactionId) {
        self.disputed.remove(&tx_id);
    }
    pub fn is_disputed(&self, tx_id: TransactionId) -> bool {
        self.disputed.contains(&tx_id)
    }
}

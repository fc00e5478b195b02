//! Stateful payments engine.
//!
//! Processes an ordered stream of transaction records and maintains per-client
//! account balances together with the ledger of accepted deposits and
//! withdrawals that dispute-family transactions refer back to.

use std::convert::Infallible;

use tracing::{debug, info};

use crate::{
    diagnostics::{DiagnosticSink, Refusal, RefusalReason, TracingDiagnostics},
    domain::{
        Account, Chargeback, ClientId, Deposit, Dispute, Resolve, Transaction, TransactionId,
        TransactionRecord, Withdrawal,
    },
    engine::errors::EngineError,
    ledger::{Ledger, LedgerEntry},
    parsing::ParsedRow,
    validation,
};
pub use types::ClientAccounts;

pub mod errors;
mod types;

/// Counts gathered over one call to [`PaymentsEngine::process_transactions`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub accepted: usize,
    pub refused: usize,
}

pub struct PaymentsEngine<S = TracingDiagnostics> {
    client_accounts: ClientAccounts,
    ledger: Ledger,
    sink: S,
}

impl Default for PaymentsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentsEngine {
    pub fn new() -> Self {
        Self::with_sink(TracingDiagnostics)
    }
}

/// Guard: all operations are rejected on a locked (frozen) account.
fn check_account_eligibility(client_id: ClientId, account: &Account) -> Result<(), EngineError> {
    if account.locked {
        return Err(EngineError::AccountLocked(client_id));
    }
    Ok(())
}

/// Looks up the ledger entry a dispute-family transaction refers to and makes
/// sure it belongs to the client raising it.
fn owned_entry(
    ledger: &Ledger,
    tx_id: TransactionId,
    client_id: ClientId,
) -> Result<LedgerEntry, EngineError> {
    let Some(entry) = ledger.lookup(tx_id) else {
        return Err(EngineError::TransactionNotFound(tx_id));
    };
    if entry.client_id != client_id {
        return Err(EngineError::ClientMismatch {
            tx: tx_id,
            owner: entry.client_id,
            claimant: client_id,
        });
    }
    Ok(*entry)
}

impl<S: DiagnosticSink> PaymentsEngine<S> {
    pub fn with_sink(sink: S) -> Self {
        Self {
            client_accounts: ClientAccounts::new(),
            ledger: Ledger::new(),
            sink,
        }
    }
    pub fn client_accounts(&self) -> &ClientAccounts {
        &self.client_accounts
    }
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
    pub fn sink(&self) -> &S {
        &self.sink
    }
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Consumes records one at a time, in order. Refusals go to the sink and
    /// never stop the run.
    pub fn process_transactions(
        &mut self,
        records: impl IntoIterator<Item = TransactionRecord>,
    ) -> RunSummary {
        let rows = records
            .into_iter()
            .map(|record| Ok::<ParsedRow, Infallible>(Ok(record)));
        let Ok(summary) = self.try_process_transactions(rows);
        summary
    }

    /// Like [`PaymentsEngine::process_transactions`], for row sources that
    /// can fail. Malformed rows are refusals; the first source error ends the
    /// run and is returned.
    pub fn try_process_transactions<E>(
        &mut self,
        rows: impl IntoIterator<Item = Result<ParsedRow, E>>,
    ) -> Result<RunSummary, E> {
        let mut summary = RunSummary::default();
        for row in rows {
            let row = row?;
            summary.processed += 1;
            if self.process_row(row) {
                summary.accepted += 1;
            } else {
                summary.refused += 1;
            }
        }
        info!(
            processed = summary.processed,
            accepted = summary.accepted,
            refused = summary.refused,
            "all transactions processed"
        );
        Ok(summary)
    }

    /// Applies a record, or reports a row that could not be read as one.
    pub fn process_row(&mut self, row: ParsedRow) -> bool {
        match row {
            Ok(record) => self.process_record(record),
            Err(malformed) => {
                self.sink.record_refusal(&Refusal {
                    client: None,
                    tx: None,
                    reason: RefusalReason::from(malformed),
                });
                false
            }
        }
    }

    /// Validates and applies a single record. Returns whether it was accepted.
    pub fn process_record(&mut self, record: TransactionRecord) -> bool {
        let client = record.client_id();
        let tx = record.transaction_id();

        let reason = match validation::validate(record) {
            Ok(transaction) => {
                let kind = transaction.kind();
                match self.apply(transaction) {
                    Ok(()) => {
                        debug!(client = %client, tx = %tx, %kind, "transaction applied");
                        return true;
                    }
                    Err(e) => RefusalReason::from(e),
                }
            }
            Err(e) => RefusalReason::from(e),
        };

        self.sink.record_refusal(&Refusal::for_record(client, tx, reason));
        false
    }

    /// Applies an already validated transaction on top of the current state.
    pub fn apply(&mut self, transaction: Transaction) -> Result<(), EngineError> {
        match transaction {
            Transaction::Deposit(deposit) => self.process_deposit_transaction(deposit),
            Transaction::Withdrawal(withdrawal) => {
                self.process_withdrawal_transaction(withdrawal)
            }
            Transaction::Dispute(dispute) => self.process_dispute_transaction(dispute),
            Transaction::Resolve(resolve) => self.process_resolve_transaction(resolve),
            Transaction::Chargeback(chargeback) => {
                self.process_chargeback_transaction(chargeback)
            }
        }
    }

    fn process_deposit_transaction(&mut self, transaction: Deposit) -> Result<(), EngineError> {
        let client_id = transaction.client_id();
        let account = self.client_accounts.get_or_create_account_mut(client_id);
        check_account_eligibility(client_id, account)?;

        if !self.ledger.is_unique(transaction.transaction_id()) {
            return Err(EngineError::DuplicateTransaction(
                transaction.transaction_id(),
            ));
        }

        account.balance.add(transaction.amount())?;
        // Record the deposit so it can be referenced later by disputes.
        self.ledger.record(LedgerEntry::from(&transaction));

        Ok(())
    }

    fn process_withdrawal_transaction(
        &mut self,
        transaction: Withdrawal,
    ) -> Result<(), EngineError> {
        let client_id = transaction.client_id();
        let account = self.client_accounts.get_or_create_account_mut(client_id);
        check_account_eligibility(client_id, account)?;

        if !self.ledger.is_unique(transaction.transaction_id()) {
            return Err(EngineError::DuplicateTransaction(
                transaction.transaction_id(),
            ));
        }

        account.balance.try_remove(transaction.amount())?;
        // Withdrawals are disputable too; a refused one never reserves its id.
        self.ledger.record(LedgerEntry::from(&transaction));

        Ok(())
    }

    fn process_dispute_transaction(&mut self, transaction: Dispute) -> Result<(), EngineError> {
        let client_id = transaction.client_id();
        let tx_id = transaction.disputed_tx_id();
        let account = self.client_accounts.get_or_create_account_mut(client_id);
        check_account_eligibility(client_id, account)?;

        let entry = owned_entry(&self.ledger, tx_id, client_id)?;

        // Prevent double-disputes on the same transaction.
        if self.ledger.is_disputed(tx_id) {
            return Err(EngineError::TransactionAlreadyDisputed(tx_id));
        }

        account.balance.try_hold(entry.amount)?;
        self.ledger.mark_disputed(tx_id);

        Ok(())
    }

    fn process_resolve_transaction(&mut self, transaction: Resolve) -> Result<(), EngineError> {
        let client_id = transaction.client_id();
        let tx_id = transaction.disputed_tx_id();
        let account = self.client_accounts.get_or_create_account_mut(client_id);
        check_account_eligibility(client_id, account)?;

        let entry = owned_entry(&self.ledger, tx_id, client_id)?;
        if !self.ledger.is_disputed(tx_id) {
            return Err(EngineError::TransactionNotDisputed(tx_id));
        }

        account.balance.release(entry.amount)?;
        self.ledger.unmark_disputed(tx_id);

        Ok(())
    }

    fn process_chargeback_transaction(
        &mut self,
        transaction: Chargeback,
    ) -> Result<(), EngineError> {
        let client_id = transaction.client_id();
        let tx_id = transaction.disputed_tx_id();
        let account = self.client_accounts.get_or_create_account_mut(client_id);
        check_account_eligibility(client_id, account)?;

        let entry = owned_entry(&self.ledger, tx_id, client_id)?;
        if !self.ledger.is_disputed(tx_id) {
            return Err(EngineError::TransactionNotDisputed(tx_id));
        }

        account.balance.remove_held(entry.amount)?;
        account.locked = true;
        self.ledger.unmark_disputed(tx_id);

        Ok(())
    }
}

//! Admission checks run on every record before it reaches the engine.
//!
//! A record passes when its kind is one of the five known kinds and, for
//! deposits and withdrawals, it carries a strictly positive amount. Amounts on
//! dispute-family records are ignored.

use rust_decimal::Decimal;

use crate::domain::{
    Chargeback, Deposit, Dispute, Resolve, Transaction, TransactionKind, TransactionRecord,
    UnknownKind, Withdrawal,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),
    #[error("{0} is missing an amount")]
    MissingAmount(TransactionKind),
    #[error("{kind} amount must be positive, got {amount}")]
    NonPositiveAmount {
        kind: TransactionKind,
        amount: Decimal,
    },
}

/// Returns true when [`validate`] would admit the record.
pub fn is_valid(record: &TransactionRecord) -> bool {
    check(record).is_ok()
}

/// Turns a raw record into a typed [`Transaction`], or explains why it is rejected.
pub fn validate(record: TransactionRecord) -> Result<Transaction, ValidationError> {
    let kind = check(&record)?;
    let client = record.client_id();
    let tx = record.transaction_id();
    let transaction: Transaction = match kind {
        TransactionKind::Deposit => {
            Deposit::new(client, tx, movement_amount(kind, &record)?).into()
        }
        TransactionKind::Withdrawal => {
            Withdrawal::new(client, tx, movement_amount(kind, &record)?).into()
        }
        TransactionKind::Dispute => Dispute::new(client, tx).into(),
        TransactionKind::Resolve => Resolve::new(client, tx).into(),
        TransactionKind::Chargeback => Chargeback::new(client, tx).into(),
    };
    Ok(transaction)
}

fn check(record: &TransactionRecord) -> Result<TransactionKind, ValidationError> {
    let kind: TransactionKind = record.kind().parse()?;
    match kind {
        TransactionKind::Deposit | TransactionKind::Withdrawal => {
            movement_amount(kind, record)?;
        }
        TransactionKind::Dispute | TransactionKind::Resolve | TransactionKind::Chargeback => {}
    }
    Ok(kind)
}

fn movement_amount(
    kind: TransactionKind,
    record: &TransactionRecord,
) -> Result<Decimal, ValidationError> {
    let amount = record
        .amount()
        .ok_or(ValidationError::MissingAmount(kind))?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount { kind, amount });
    }
    Ok(amount)
}

use crate::domain::{ClientId, DomainError, TransactionId};

/// Business-rule refusals. None of them leave any effect on engine state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("account {0} is locked")]
    AccountLocked(ClientId),
    #[error("duplicate transaction id {0}")]
    DuplicateTransaction(TransactionId),
    #[error("transaction {0} not found")]
    TransactionNotFound(TransactionId),
    #[error("transaction {tx} belongs to client {owner}, not {claimant}")]
    ClientMismatch {
        tx: TransactionId,
        owner: ClientId,
        claimant: ClientId,
    },
    #[error("transaction {0} already disputed")]
    TransactionAlreadyDisputed(TransactionId),
    #[error("transaction {0} not disputed")]
    TransactionNotDisputed(TransactionId),
    #[error(transparent)]
    DomainError(#[from] DomainError),
}

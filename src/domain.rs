//! Core domain types: transaction records, typed transactions, accounts, and balances.

use std::str::FromStr;

use derive_more::{Display, From, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Newtype wrapper for client identifiers (u16 on the wire).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, From, Into, Display,
)]
pub struct ClientId(u16);

/// Newtype wrapper for globally-unique transaction identifiers (u32 on the wire).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, From, Into, Display,
)]
pub struct TransactionId(u32);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        available: Decimal,
        requested: Decimal,
    },
    #[error("balance overflow")]
    Overflow,
}

/// The five transaction kinds understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TransactionKind {
    #[display("deposit")]
    Deposit,
    #[display("withdrawal")]
    Withdrawal,
    #[display("dispute")]
    Dispute,
    #[display("resolve")]
    Resolve,
    #[display("chargeback")]
    Chargeback,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized transaction type '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for TransactionKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(Self::Deposit),
            "withdrawal" => Ok(Self::Withdrawal),
            "dispute" => Ok(Self::Dispute),
            "resolve" => Ok(Self::Resolve),
            "chargeback" => Ok(Self::Chargeback),
            other => Err(UnknownKind(other.to_owned())),
        }
    }
}

/// One input event exactly as read from the record source.
///
/// The kind is kept as text and the amount is optional; the validator decides
/// whether the record becomes a [`Transaction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    kind: String,
    client: ClientId,
    tx: TransactionId,
    amount: Option<Decimal>,
}

impl TransactionRecord {
    pub fn new(
        kind: impl Into<String>,
        client: ClientId,
        tx: TransactionId,
        amount: Option<Decimal>,
    ) -> Self {
        Self {
            kind: kind.into(),
            client,
            tx,
            amount,
        }
    }
    pub fn kind(&self) -> &str {
        &self.kind
    }
    pub fn client_id(&self) -> ClientId {
        self.client
    }
    pub fn transaction_id(&self) -> TransactionId {
        self.tx
    }
    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }
}

/// Sum type over all transaction kinds the engine can process.
#[derive(Debug, Clone, From, PartialEq)]
pub enum Transaction {
    Deposit(Deposit),
    Withdrawal(Withdrawal),
    Dispute(Dispute),
    Resolve(Resolve),
    Chargeback(Chargeback),
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Transaction::Deposit(_) => TransactionKind::Deposit,
            Transaction::Withdrawal(_) => TransactionKind::Withdrawal,
            Transaction::Dispute(_) => TransactionKind::Dispute,
            Transaction::Resolve(_) => TransactionKind::Resolve,
            Transaction::Chargeback(_) => TransactionKind::Chargeback,
        }
    }
    pub fn client_id(&self) -> ClientId {
        match self {
            Transaction::Deposit(t) => t.client_id(),
            Transaction::Withdrawal(t) => t.client_id(),
            Transaction::Dispute(t) => t.client_id(),
            Transaction::Resolve(t) => t.client_id(),
            Transaction::Chargeback(t) => t.client_id(),
        }
    }
    /// The id carried by the record: the new id for movements, the referenced
    /// id for the dispute family.
    pub fn transaction_id(&self) -> TransactionId {
        match self {
            Transaction::Deposit(t) => t.transaction_id(),
            Transaction::Withdrawal(t) => t.transaction_id(),
            Transaction::Dispute(t) => t.disputed_tx_id(),
            Transaction::Resolve(t) => t.disputed_tx_id(),
            Transaction::Chargeback(t) => t.disputed_tx_id(),
        }
    }
}

// Movement transactions carry an amount (deposits & withdrawals).
#[derive(Debug, Clone, PartialEq)]
pub struct Deposit(MovementTransaction);
#[derive(Debug, Clone, PartialEq)]
pub struct Withdrawal(MovementTransaction);

// Dispute-family transactions reference an existing tx by ID (no amount field).
#[derive(Debug, Clone, PartialEq)]
pub struct Dispute(DisputeTransaction);
#[derive(Debug, Clone, PartialEq)]
pub struct Resolve(DisputeTransaction);
#[derive(Debug, Clone, PartialEq)]
pub struct Chargeback(DisputeTransaction);

impl Deposit {
    pub fn new(client: ClientId, tx: TransactionId, amount: Decimal) -> Self {
        Self(MovementTransaction::new(client, tx, amount))
    }
    pub fn amount(&self) -> Decimal {
        self.0.amount
    }
    pub fn client_id(&self) -> ClientId {
        self.0.client
    }
    pub fn transaction_id(&self) -> TransactionId {
        self.0.tx
    }
}

impl Withdrawal {
    pub fn new(client: ClientId, tx: TransactionId, amount: Decimal) -> Self {
        Self(MovementTransaction::new(client, tx, amount))
    }
    pub fn amount(&self) -> Decimal {
        self.0.amount
    }
    pub fn client_id(&self) -> ClientId {
        self.0.client
    }
    pub fn transaction_id(&self) -> TransactionId {
        self.0.tx
    }
}

impl Dispute {
    pub fn new(client: ClientId, disputed_tx: TransactionId) -> Self {
        Self(DisputeTransaction::new(client, disputed_tx))
    }
    pub fn client_id(&self) -> ClientId {
        self.0.client
    }
    pub fn disputed_tx_id(&self) -> TransactionId {
        self.0.disputed_tx
    }
}

impl Resolve {
    pub fn new(client: ClientId, disputed_tx: TransactionId) -> Self {
        Self(DisputeTransaction::new(client, disputed_tx))
    }
    pub fn client_id(&self) -> ClientId {
        self.0.client
    }
    pub fn disputed_tx_id(&self) -> TransactionId {
        self.0.disputed_tx
    }
}

impl Chargeback {
    pub fn new(client: ClientId, disputed_tx: TransactionId) -> Self {
        Self(DisputeTransaction::new(client, disputed_tx))
    }
    pub fn client_id(&self) -> ClientId {
        self.0.client
    }
    pub fn disputed_tx_id(&self) -> TransactionId {
        self.0.disputed_tx
    }
}

/// A single client account. Locked accounts reject all further operations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Account {
    pub balance: Balance,
    pub locked: bool,
}

/// Tracks a client's funds. Invariant: total = available + held, and the
/// total is always representable.
///
/// Both sides start as `0.0` and every sum or difference keeps the larger
/// scale of its operands, so values read back with the precision of the
/// amounts that produced them, never fewer than one fractional digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    available: Decimal,
    held: Decimal,
}

impl Default for Balance {
    fn default() -> Self {
        Self::new(Decimal::new(0, 1), Decimal::new(0, 1))
    }
}

impl Balance {
    pub fn new(available: Decimal, held: Decimal) -> Self {
        Self { available, held }
    }
    pub fn available(&self) -> Decimal {
        self.available
    }
    pub fn held(&self) -> Decimal {
        self.held
    }
    pub fn total(&self) -> Result<Decimal, DomainError> {
        plus(self.available, self.held).ok_or(DomainError::Overflow)
    }
    /// Credit funds (deposit). Increases available.
    pub fn add(&mut self, amount: Decimal) -> Result<(), DomainError> {
        self.settle(plus(self.available, amount), Some(self.held))
    }
    /// Debit funds (withdrawal). Fails if available < amount.
    pub fn try_remove(&mut self, amount: Decimal) -> Result<(), DomainError> {
        self.ensure_available(amount)?;
        self.settle(minus(self.available, amount), Some(self.held))
    }
    /// Move funds from available to held (dispute). Fails if available < amount.
    pub fn try_hold(&mut self, amount: Decimal) -> Result<(), DomainError> {
        self.ensure_available(amount)?;
        self.settle(minus(self.available, amount), plus(self.held, amount))
    }
    /// Move funds from held to available (resolve). Total stays the same.
    pub fn release(&mut self, amount: Decimal) -> Result<(), DomainError> {
        self.settle(plus(self.available, amount), minus(self.held, amount))
    }
    /// Drop held funds (chargeback).
    ///
    /// Unlike [`Balance::try_hold`], held is not checked against the amount
    /// and may go negative if it is short.
    pub fn remove_held(&mut self, amount: Decimal) -> Result<(), DomainError> {
        self.settle(Some(self.available), minus(self.held, amount))
    }

    fn ensure_available(&self, amount: Decimal) -> Result<(), DomainError> {
        if self.available < amount {
            return Err(DomainError::InsufficientFunds {
                available: self.available,
                requested: amount,
            });
        }
        Ok(())
    }
    /// Commits new sides only if both and their sum fit; otherwise nothing changes.
    fn settle(
        &mut self,
        available: Option<Decimal>,
        held: Option<Decimal>,
    ) -> Result<(), DomainError> {
        let (Some(available), Some(held)) = (available, held) else {
            return Err(DomainError::Overflow);
        };
        plus(available, held).ok_or(DomainError::Overflow)?;
        self.available = available;
        self.held = held;
        Ok(())
    }
}

fn plus(lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
    let sum = lhs.checked_add(rhs)?;
    Some(widen(sum, lhs.scale().max(rhs.scale())))
}

fn minus(lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
    let difference = lhs.checked_sub(rhs)?;
    Some(widen(difference, lhs.scale().max(rhs.scale())))
}

// rust_decimal hands back the other operand as is when one side is zero.
fn widen(mut value: Decimal, scale: u32) -> Decimal {
    if value.scale() < scale {
        value.rescale(scale);
    }
    value
}

/// Inner struct shared by Deposit and Withdrawal - transactions that carry an amount.
#[derive(Debug, Clone, PartialEq)]
struct MovementTransaction {
    client: ClientId,
    tx: TransactionId,
    amount: Decimal,
}

impl MovementTransaction {
    fn new(client: ClientId, tx: TransactionId, amount: Decimal) -> Self {
        Self { client, tx, amount }
    }
}

/// Inner struct shared by Dispute, Resolve, and Chargeback - they reference an existing tx.
#[derive(Debug, Clone, PartialEq)]
struct DisputeTransaction {
    client: ClientId,
    disputed_tx: TransactionId,
}

impl DisputeTransaction {
    fn new(client: ClientId, disputed_tx: TransactionId) -> Self {
        Self {
            client,
            disputed_tx,
        }
    }
}

//! Side channel for refused transactions.
//!
//! The engine never logs directly; it hands every refusal to a
//! [`DiagnosticSink`]. The binary uses [`TracingDiagnostics`], tests usually
//! plug in [`RecordedRefusals`] and assert on what was collected.

use std::fmt;

use tracing::warn;

use crate::{
    domain::{ClientId, TransactionId},
    engine::errors::EngineError,
    parsing::MalformedRow,
    validation::ValidationError,
};

/// Why a record had no effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefusalReason {
    #[error(transparent)]
    Malformed(#[from] MalformedRow),
    #[error("invalid record: {0}")]
    Invalid(#[from] ValidationError),
    #[error("{0}")]
    Rejected(#[from] EngineError),
}

/// A refused record together with the ids it carried. Malformed rows carry
/// no ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refusal {
    pub client: Option<ClientId>,
    pub tx: Option<TransactionId>,
    pub reason: RefusalReason,
}

impl Refusal {
    pub fn for_record(client: ClientId, tx: TransactionId, reason: RefusalReason) -> Self {
        Self {
            client: Some(client),
            tx: Some(tx),
            reason,
        }
    }
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.client, self.tx) {
            (Some(client), Some(tx)) => write!(f, "client {client}, tx {tx}: {}", self.reason),
            _ => write!(f, "{}", self.reason),
        }
    }
}

impl std::error::Error for Refusal {}

pub trait DiagnosticSink {
    fn record_refusal(&mut self, refusal: &Refusal);
}

/// Emits each refusal as a `warn` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn record_refusal(&mut self, refusal: &Refusal) {
        warn!("transaction refused: {refusal}");
    }
}

/// Keeps every refusal in arrival order.
#[derive(Debug, Default, Clone)]
pub struct RecordedRefusals(Vec<Refusal>);

impl RecordedRefusals {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn as_slice(&self) -> &[Refusal] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl DiagnosticSink for RecordedRefusals {
    fn record_refusal(&mut self, refusal: &Refusal) {
        self.0.push(refusal.clone());
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn record_refusal(&mut self, refusal: &Refusal) {
        (**self).record_refusal(refusal);
    }
}

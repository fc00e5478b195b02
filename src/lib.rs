//! Reconciles per-client balances from an ordered stream of ledger
//! transactions and reports the final state of every account.

use std::io::{Read, Write};

use crate::{
    diagnostics::DiagnosticSink,
    engine::{PaymentsEngine, RunSummary},
};

pub mod diagnostics;
pub mod domain;
pub mod engine;
pub mod ledger;
pub mod output;
pub mod parsing;
pub mod validation;

/// Reads transactions as CSV from `input`, runs them through a fresh engine
/// reporting refusals to `sink`, and writes the account report to `output`.
///
/// Only I/O failures abort the run; no report is written in that case.
pub fn reconcile<S: DiagnosticSink>(
    input: impl Read,
    output: impl Write,
    sink: S,
) -> anyhow::Result<RunSummary> {
    let mut rdr = parsing::reader_builder().from_reader(input);
    let mut engine = PaymentsEngine::with_sink(sink);

    let summary = engine.try_process_transactions(parsing::deserialize_csv(&mut rdr))?;

    output::print_accounts(engine.client_accounts(), output)?;
    Ok(summary)
}

use std::{fs::File, path::PathBuf};

use anyhow::Context;
use clap::Parser;

use ledger_reconciler::diagnostics::TracingDiagnostics;

fn main() -> anyhow::Result<()> {
    let args = Arguments::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let file = File::open(&args.input_file)
        .with_context(|| format!("failed to open {}", args.input_file.display()))?;

    ledger_reconciler::reconcile(file, std::io::stdout().lock(), TracingDiagnostics)
        .with_context(|| format!("failed to reconcile {}", args.input_file.display()))?;

    Ok(())
}

/// Reconciles client balances from a CSV file of transactions and prints the
/// resulting accounts as CSV on stdout.
#[derive(Parser)]
struct Arguments {
    /// Path to the transactions CSV (`type,client,tx,amount`).
    input_file: PathBuf,
    /// Most verbose level written to stderr.
    #[arg(long, default_value_t = tracing::Level::WARN)]
    log_level: tracing::Level,
}

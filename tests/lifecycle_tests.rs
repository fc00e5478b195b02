mod common;

use common::{account, chargeback, client, deposit, dispute, resolve, run, withdrawal};
use rust_decimal::dec;

/// Client isolation: a chargeback on one client does not touch another.
#[test]
fn chargeback_on_one_client_does_not_affect_another() {
    let engine = run(vec![
        deposit(1, 1, dec!(100.0)),
        deposit(2, 2, dec!(200.0)),
        dispute(1, 1),
        chargeback(1, 1),
        deposit(2, 3, dec!(1.0)),
    ]);

    let expected = vec![
        (client(1), account(dec!(0.0), dec!(0.0), true)),
        (client(2), account(dec!(201.0), dec!(0.0), false)),
    ];

    assert_eq!(engine.client_accounts().as_slice(), expected.as_slice());
}

/// Transactions for different clients can be interleaved; order is chronological.
#[test]
fn interleaved_transactions_for_multiple_clients() {
    let engine = run(vec![
        deposit(1, 1, dec!(100.0)),
        deposit(2, 2, dec!(200.0)),
        withdrawal(1, 3, dec!(30.0)),
        withdrawal(2, 4, dec!(50.0)),
        deposit(1, 5, dec!(10.0)),
    ]);

    let expected = vec![
        (client(1), account(dec!(80.0), dec!(0.0), false)),
        (client(2), account(dec!(150.0), dec!(0.0), false)),
    ];

    assert_eq!(engine.client_accounts().as_slice(), expected.as_slice());
}

/// Input order matters: the same records in a different order give a
/// different result.
#[test]
fn reordering_records_changes_outcome() {
    let in_order = run(vec![deposit(1, 1, dec!(10.0)), withdrawal(1, 2, dec!(10.0))]);
    let reordered = run(vec![withdrawal(1, 2, dec!(10.0)), deposit(1, 1, dec!(10.0))]);

    assert_eq!(
        in_order.client_accounts().as_slice(),
        vec![(client(1), account(dec!(0.0), dec!(0.0), false))].as_slice()
    );
    assert_eq!(
        reordered.client_accounts().as_slice(),
        vec![(client(1), account(dec!(10.0), dec!(0.0), false))].as_slice()
    );
}

#[test]
fn full_dispute_resolve_cycle_leaves_balance_intact() {
    let engine = run(vec![
        deposit(1, 1, dec!(100.0)),
        deposit(1, 2, dec!(50.0)),
        dispute(1, 1),
        resolve(1, 1),
    ]);

    let expected = vec![(client(1), account(dec!(150.0), dec!(0.0), false))];

    assert_eq!(engine.client_accounts().as_slice(), expected.as_slice());
}

/// A resolved tx can be re-disputed and then charged back.
#[test]
fn re_dispute_after_resolve_then_chargeback() {
    let engine = run(vec![
        deposit(1, 1, dec!(100.0)),
        dispute(1, 1),
        resolve(1, 1),
        dispute(1, 1),    // re-dispute
        chargeback(1, 1), // chargeback the re-dispute
        dispute(1, 1),    // terminal: account is locked
    ]);

    let expected = vec![(client(1), account(dec!(0.0), dec!(0.0), true))];

    assert_eq!(engine.client_accounts().as_slice(), expected.as_slice());
    assert!(!engine.ledger().is_disputed(1.into()));
}

/// Mixed outcomes for one client:
///   tx 1 (10) disputed, resolved
///   tx 2 (20) disputed, charged back (locks the account)
///   tx 3 (30) disputed, left in held
///   tx 4 (40) never disputed
#[test]
fn interleaved_disputes_with_mixed_outcomes() {
    let engine = run(vec![
        deposit(1, 1, dec!(10.0)),
        deposit(1, 2, dec!(20.0)),
        deposit(1, 3, dec!(30.0)),
        deposit(1, 4, dec!(40.0)),
        dispute(1, 1),
        dispute(1, 2),
        dispute(1, 3),
        // available = 40, held = 60
        resolve(1, 1),
        // available = 50, held = 50
        chargeback(1, 2),
        // available = 50, held = 30, locked
    ]);

    let expected = vec![(client(1), account(dec!(50.0), dec!(30.0), true))];

    assert_eq!(engine.client_accounts().as_slice(), expected.as_slice());
    assert_eq!(engine.client_accounts().as_slice()[0].1.balance.total(), Ok(dec!(80.0)));
}

#[test]
fn summary_counts_accepted_and_refused_records() {
    let mut engine = ledger_reconciler::engine::PaymentsEngine::with_sink(
        ledger_reconciler::diagnostics::RecordedRefusals::new(),
    );

    let summary = engine.process_transactions(vec![
        deposit(1, 1, dec!(10.0)),
        withdrawal(1, 2, dec!(50.0)), // insufficient funds
        dispute(1, 1),
        resolve(1, 3), // unknown tx
    ]);

    assert_eq!(summary.processed, 4);
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.refused, 2);
    assert_eq!(engine.sink().len(), 2);
}

#[test]
fn independent_engines_do_not_share_state() {
    let first = run(vec![deposit(1, 1, dec!(10.0))]);
    let second = run(vec![deposit(1, 1, dec!(20.0))]);

    assert_eq!(
        first.client_accounts().as_slice(),
        vec![(client(1), account(dec!(10.0), dec!(0.0), false))].as_slice()
    );
    assert_eq!(
        second.client_accounts().as_slice(),
        vec![(client(1), account(dec!(20.0), dec!(0.0), false))].as_slice()
    );
}

use ledger_reconciler::{
    domain::{Deposit, Withdrawal},
    ledger::{Ledger, LedgerEntry},
};
use rust_decimal::dec;

#[test]
fn new_ledger_knows_no_ids() {
    let ledger = Ledger::new();

    assert!(ledger.is_unique(1.into()));
    assert_eq!(ledger.lookup(1.into()), None);
    assert!(!ledger.is_disputed(1.into()));
}

#[test]
fn recorded_entry_can_be_looked_up() {
    let mut ledger = Ledger::new();
    let entry = LedgerEntry::from(&Deposit::new(3.into(), 10.into(), dec!(4.5)));

    ledger.record(entry);

    assert!(!ledger.is_unique(10.into()));
    assert_eq!(ledger.lookup(10.into()), Some(&entry));
    assert!(ledger.is_unique(11.into()));
}

/// Withdrawal entries keep the positive withdrawn amount.
#[test]
fn withdrawal_entry_keeps_positive_amount() {
    let entry = LedgerEntry::from(&Withdrawal::new(1.into(), 2.into(), dec!(7.25)));

    assert_eq!(entry.amount, dec!(7.25));
    assert_eq!(entry.client_id, 1.into());
    assert_eq!(entry.transaction_id, 2.into());
}

#[test]
fn existing_entry_is_never_overwritten() {
    let mut ledger = Ledger::new();
    let first = LedgerEntry::from(&Deposit::new(1.into(), 5.into(), dec!(1.0)));
    let second = LedgerEntry::from(&Deposit::new(2.into(), 5.into(), dec!(9.0)));

    ledger.record(first);
    ledger.record(second);

    assert_eq!(ledger.lookup(5.into()), Some(&first));
}

#[test]
fn dispute_marks_toggle() {
    let mut ledger = Ledger::new();
    ledger.record(LedgerEntry::from(&Deposit::new(1.into(), 1.into(), dec!(1.0))));

    ledger.mark_disputed(1.into());
    assert!(ledger.is_disputed(1.into()));

    ledger.unmark_disputed(1.into());
    assert!(!ledger.is_disputed(1.into()));

    // entries survive the dispute lifecycle
    assert!(ledger.lookup(1.into()).is_some());
}

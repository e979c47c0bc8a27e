mod common;

use common::{date, make_transaction};
use expense_tracker::ledger::Ledger;
use expense_tracker::models::{Filter, TransactionType, MAX_AMOUNT};
use rust_decimal_macros::dec;

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    ledger.insert(make_transaction(1, TransactionType::Income, dec!(1000), "Salary", date(2024, 1, 1)));
    ledger.insert(make_transaction(2, TransactionType::Expense, dec!(400), "Rent", date(2024, 1, 2)));
    ledger.insert(make_transaction(3, TransactionType::Expense, dec!(25.50), "Groceries", date(2024, 1, 3)));
    ledger.insert(make_transaction(4, TransactionType::Income, dec!(80), "Refund", date(2024, 1, 4)));
    ledger
}

fn ids(txs: &[&expense_tracker::models::Transaction]) -> Vec<u64> {
    txs.iter().map(|tx| tx.id).collect()
}

#[test]
fn test_ledger_creation() {
    let ledger = Ledger::new();
    assert!(ledger.is_empty());
    assert_eq!(ledger.summarize().balance, dec!(0));
    assert_eq!(ledger.max_id(), None);
}

#[test]
fn test_insert_puts_newest_first() {
    let ledger = sample_ledger();
    let order: Vec<u64> = ledger.transactions().iter().map(|tx| tx.id).collect();
    assert_eq!(order, vec![4, 3, 2, 1]);
}

#[test]
fn test_duplicate_id_rejected() {
    let mut ledger = sample_ledger();
    let dup = make_transaction(2, TransactionType::Income, dec!(5), "Dup", date(2024, 1, 5));

    assert!(!ledger.insert(dup));
    assert_eq!(ledger.len(), 4);
    assert_eq!(ledger.get(2).unwrap().description, "Rent");
}

#[test]
fn test_non_positive_amount_rejected() {
    let mut ledger = Ledger::new();
    assert!(!ledger.insert(make_transaction(1, TransactionType::Income, dec!(0), "Zero", date(2024, 1, 1))));
    assert!(!ledger.insert(make_transaction(2, TransactionType::Expense, dec!(-3), "Neg", date(2024, 1, 1))));
    assert!(ledger.is_empty());
}

#[test]
fn test_summarize_splits_by_type() {
    let summary = sample_ledger().summarize();
    assert_eq!(summary.income, dec!(1080));
    assert_eq!(summary.expenses, dec!(425.50));
    assert_eq!(summary.balance, dec!(654.50));
    assert_eq!(summary.balance, summary.income - summary.expenses);
}

#[test]
fn test_filter_all_returns_everything_in_order() {
    let ledger = sample_ledger();
    let all = ledger.filter(Filter::All);
    assert_eq!(all.len(), ledger.len());
    assert_eq!(ids(&all), vec![4, 3, 2, 1]);
}

#[test]
fn test_filter_by_type_preserves_relative_order() {
    let ledger = sample_ledger();

    let income = ledger.filter(Filter::Income);
    assert_eq!(ids(&income), vec![4, 1]);
    assert!(income.iter().all(|tx| tx.is_income()));

    let expense = ledger.filter(Filter::Expense);
    assert_eq!(ids(&expense), vec![3, 2]);
    assert!(expense.iter().all(|tx| tx.is_expense()));
}

#[test]
fn test_filter_on_empty_ledger() {
    let ledger = Ledger::new();
    assert!(ledger.filter(Filter::All).is_empty());
    assert!(ledger.filter(Filter::Expense).is_empty());
}

#[test]
fn test_remove_existing() {
    let mut ledger = sample_ledger();
    let removed = ledger.remove(2).unwrap();

    assert_eq!(removed.description, "Rent");
    assert_eq!(ledger.len(), 3);
    assert!(!ledger.contains(2));
    assert_eq!(ledger.summarize().expenses, dec!(25.50));
}

#[test]
fn test_remove_unknown_is_noop() {
    let mut ledger = sample_ledger();
    assert!(ledger.remove(99).is_none());
    assert_eq!(ledger.len(), 4);
}

#[test]
fn test_remove_twice_is_idempotent() {
    let mut ledger = sample_ledger();
    assert!(ledger.remove(3).is_some());
    assert!(ledger.remove(3).is_none());
    assert_eq!(ledger.len(), 3);
}

#[test]
fn test_insert_then_remove_restores_state() {
    let mut ledger = sample_ledger();
    let before: Vec<_> = ledger.transactions().to_vec();
    let summary_before = ledger.summarize();

    ledger.insert(make_transaction(5, TransactionType::Expense, dec!(12), "Lunch", date(2024, 1, 6)));
    assert_ne!(ledger.summarize(), summary_before);
    ledger.remove(5);

    assert_eq!(ledger.transactions(), before.as_slice());
    assert_eq!(ledger.summarize(), summary_before);
}

#[test]
fn test_from_snapshot_keeps_order_and_drops_bad_records() {
    let snapshot = vec![
        make_transaction(9, TransactionType::Expense, dec!(10), "Newest", date(2024, 1, 9)),
        make_transaction(8, TransactionType::Income, dec!(-1), "Broken", date(2024, 1, 8)),
        make_transaction(7, TransactionType::Income, dec!(20), "Middle", date(2024, 1, 7)),
        make_transaction(9, TransactionType::Income, dec!(30), "Dup", date(2024, 1, 6)),
    ];
    let ledger = Ledger::from_snapshot(snapshot);

    let order: Vec<u64> = ledger.transactions().iter().map(|tx| tx.id).collect();
    assert_eq!(order, vec![9, 7]);
    assert_eq!(ledger.max_id(), Some(9));
}

#[test]
fn test_amount_above_ceiling_rejected() {
    let mut ledger = Ledger::new();
    let over = MAX_AMOUNT + dec!(0.01);
    assert!(!ledger.insert(make_transaction(1, TransactionType::Income, over, "Too big", date(2024, 1, 1))));
    assert!(ledger.insert(make_transaction(2, TransactionType::Income, MAX_AMOUNT, "Ceiling", date(2024, 1, 1))));
    assert_eq!(ledger.len(), 1);
}

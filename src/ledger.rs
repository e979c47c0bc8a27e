use std::collections::HashSet;

use log::warn;
use crate::models::{is_valid_amount, Filter, Summary, Transaction, TransactionId};

/// In-memory transaction collection, newest first
pub struct Ledger {
    /// Records in insertion order, most recent at index 0
    transactions: Vec<Transaction>,
    /// Ids present in `transactions` (for duplicate detection)
    ids: HashSet<TransactionId>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Build a ledger from a stored snapshot, already ordered newest first
    ///
    /// Records with an out-of-range amount or a repeated id are dropped.
    pub fn from_snapshot(snapshot: Vec<Transaction>) -> Self {
        let mut ledger = Self::new();
        for tx in snapshot {
            if ledger.accepts(&tx) {
                ledger.ids.insert(tx.id);
                ledger.transactions.push(tx);
            }
        }
        ledger
    }

    /// Insert a transaction at the front
    /// Returns false if the amount is out of range or the id is already taken
    pub fn insert(&mut self, tx: Transaction) -> bool {
        if !self.accepts(&tx) {
            return false;
        }
        self.ids.insert(tx.id);
        self.transactions.insert(0, tx);
        true
    }

    /// Remove the transaction with this id, if present
    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        if !self.ids.remove(&id) {
            return None;
        }
        let index = self.transactions.iter().position(|tx| tx.id == id)?;
        Some(self.transactions.remove(index))
    }

    fn accepts(&self, tx: &Transaction) -> bool {
        if !is_valid_amount(tx.amount) {
            warn!(
                "Ignoring transaction {} with out-of-range amount {}",
                tx.id, tx.amount
            );
            return false;
        }
        if self.ids.contains(&tx.id) {
            warn!("Ignoring duplicate transaction id {}", tx.id);
            return false;
        }
        true
    }

    /// Totals over every transaction, regardless of the active filter
    pub fn summarize(&self) -> Summary {
        Summary::from_transactions(&self.transactions)
    }

    /// Matching transactions in their stored order
    pub fn filter(&self, filter: Filter) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|tx| filter.matches(tx))
            .collect()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    pub fn contains(&self, id: TransactionId) -> bool {
        self.ids.contains(&id)
    }

    /// Highest id in the collection
    pub fn max_id(&self) -> Option<TransactionId> {
        self.ids.iter().copied().max()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

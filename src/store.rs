use log::{debug, error, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{self, StoreError};
use crate::ledger::Ledger;
use crate::models::{Filter, Summary, Transaction, TransactionForm, TransactionId};
use crate::storage::{decode_snapshot, encode_snapshot, KeyValueStorage};

/// Default storage key of the persisted snapshot
pub const DEFAULT_STORAGE_KEY: &str = "expenseTrackerTransactions";

/// What a store mutation did to the collection
#[derive(Debug, Clone, PartialEq)]
pub enum StoreChange {
    Added(Transaction),
    Removed(Transaction),
    /// Nothing matched (e.g. deleting an unknown id)
    Unchanged,
}

/// Transaction collection mirrored to key-value storage
///
/// The store owns the authoritative in-memory ledger. Every successful
/// mutation rewrites the whole snapshot under `key`:
///
/// 1. **Mutate**: the ledger is updated in memory
/// 2. **Persist**: the full collection is serialized and written in one `set_item`
///
/// Reads never fail: a missing or unreadable snapshot loads as an empty store.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use expense_tracker::clock::FixedClock;
/// use expense_tracker::models::TransactionForm;
/// use expense_tracker::storage::MemoryStorage;
/// use expense_tracker::store::TransactionStore;
///
/// let clock = FixedClock::new(1_700_000_000_000, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
/// let mut store = TransactionStore::load(MemoryStorage::new(), clock, "tx");
///
/// let form = TransactionForm {
///     description: "Salary".to_string(),
///     amount: "1000".to_string(),
///     tx_type: "income".to_string(),
///     category: "salary".to_string(),
///     date: "2024-01-01".to_string(),
///     ..Default::default()
/// };
/// store.add(&form).unwrap();
///
/// assert_eq!(store.summarize().balance, rust_decimal::Decimal::from(1000));
/// assert_eq!(store.storage().write_count(), 1);
/// ```
pub struct TransactionStore<S: KeyValueStorage, C: Clock = SystemClock> {
    ledger: Ledger,
    storage: S,
    clock: C,
    /// Storage entry holding the snapshot
    key: String,
    /// Highest id handed out or loaded, ids never go below it
    last_id: TransactionId,
}

impl<S: KeyValueStorage, C: Clock> TransactionStore<S, C> {
    /// Load the persisted snapshot stored under `key`
    ///
    /// A missing entry, a storage read error or malformed JSON all yield an
    /// empty store. Failures are logged, never returned.
    pub fn load(storage: S, clock: C, key: impl Into<String>) -> Self {
        let key = key.into();

        let snapshot = match storage.get_item(&key) {
            Ok(Some(raw)) => match decode_snapshot(&raw) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("Discarding unreadable snapshot '{}': {}", key, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read snapshot '{}': {}", key, e);
                Vec::new()
            }
        };

        let ledger = Ledger::from_snapshot(snapshot);
        info!("Loaded {} transactions from '{}'", ledger.len(), key);

        let last_id = ledger.max_id().unwrap_or(0);
        Self {
            ledger,
            storage,
            clock,
            key,
            last_id,
        }
    }

    /// Validate a submission and insert it at the front
    ///
    /// On success the new record gets an id derived from the clock, and the
    /// snapshot is rewritten. A rejected submission leaves the store untouched.
    pub fn add(&mut self, form: &TransactionForm) -> Result<StoreChange, StoreError> {
        let new_tx = form.validate().map_err(|e| {
            warn!("Rejected submission: {}", e);
            e
        })?;

        let tx = new_tx.into_transaction(self.next_id());
        if !self.ledger.insert(tx.clone()) {
            return Ok(StoreChange::Unchanged);
        }
        self.last_id = tx.id;

        self.persist(StoreChange::Added(tx))
    }

    /// Remove the record with this id
    ///
    /// Unknown ids are not an error; the snapshot is rewritten either way.
    pub fn remove(&mut self, id: TransactionId) -> Result<StoreChange, StoreError> {
        let change = match self.ledger.remove(id) {
            Some(tx) => StoreChange::Removed(tx),
            None => {
                debug!("Delete of unknown transaction id {}", id);
                StoreChange::Unchanged
            }
        };

        self.persist(change)
    }

    /// Timestamp-derived id, bumped past the last one if the clock has not moved
    fn next_id(&self) -> TransactionId {
        let now = TransactionId::try_from(self.clock.now_millis()).unwrap_or(0);
        now.max(self.last_id.saturating_add(1))
    }

    fn persist(&mut self, change: StoreChange) -> Result<StoreChange, StoreError> {
        match self.write_snapshot() {
            Ok(()) => Ok(change),
            Err(source) => {
                error!("Failed to save snapshot '{}': {}", self.key, source);
                Err(StoreError::Persist { change, source })
            }
        }
    }

    fn write_snapshot(&mut self) -> error::Result<()> {
        let json = encode_snapshot(self.ledger.transactions())?;
        self.storage.set_item(&self.key, &json)?;
        debug!(
            "Saved {} transactions to '{}'",
            self.ledger.len(),
            self.key
        );
        Ok(())
    }

    pub fn summarize(&self) -> Summary {
        self.ledger.summarize()
    }

    pub fn filter(&self, filter: Filter) -> Vec<&Transaction> {
        self.ledger.filter(filter)
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.ledger.get(id)
    }

    /// All records, newest first
    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

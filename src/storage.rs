use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Result, TrackerError};
use crate::models::Transaction;

/// Local key-value storage holding string values under string keys
///
/// This is the persistence boundary of the tracker: the whole transaction
/// collection lives under a single key as a JSON array, and every mutation
/// rewrites that entry in full.
///
/// # Example
///
/// ```
/// use expense_tracker::storage::{KeyValueStorage, MemoryStorage};
///
/// let mut storage = MemoryStorage::new();
/// storage.set_item("greeting", "hello").unwrap();
///
/// assert_eq!(storage.get_item("greeting").unwrap().as_deref(), Some("hello"));
/// assert_eq!(storage.get_item("missing").unwrap(), None);
/// ```
pub trait KeyValueStorage {
    /// Read the value stored under `key`, `None` if there is no entry
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete the entry for `key`; deleting a missing key is not an error
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

/// True if `key` can name a storage entry on disk
///
/// Keys are non-empty, do not start with '.', and use only ASCII letters,
/// digits, '_', '-' and '.'.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Serialize the full collection as a JSON array
pub fn encode_snapshot(transactions: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string(transactions)?)
}

/// Parse a JSON array of transactions
pub fn decode_snapshot(raw: &str) -> Result<Vec<Transaction>> {
    Ok(serde_json::from_str(raw)?)
}

/// HashMap-backed storage for tests and ephemeral sessions
///
/// Counts writes so tests can check that every mutation rewrote the snapshot.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    write_count: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry without counting it as a write
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }

    /// Number of `set_item` calls so far
    pub fn write_count(&self) -> usize {
        self.write_count
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.write_count += 1;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// Directory-backed storage, one `<key>.json` file per key
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the entry, so readers see either the old or the new snapshot.
///
/// # Example
///
/// ```no_run
/// use expense_tracker::storage::{FileStorage, KeyValueStorage};
///
/// let mut storage = FileStorage::new("./data").unwrap();
/// storage.set_item("expenseTrackerTransactions", "[]").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_key(key) {
            return Err(TrackerError::Storage {
                key: key.to_string(),
                reason: "keys may only contain letters, digits, '_', '-' and '.'".to_string(),
            });
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp_path = self.dir.join(format!(".{}.json.tmp", key));

        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, &path)?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

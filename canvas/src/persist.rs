//! Local persistence blob: the static card list as one JSON array under one key.
//!
//! The blob is written after every change to the static card list and read
//! once at startup. Reads are schema-validated; a blob that fails validation
//! is ignored and the in-memory board is left as it was. AI cards are never
//! persisted.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::collections::HashMap;

use crate::doc::{Card, CardStore};

/// Key the card list is stored under.
pub const STORAGE_KEY: &str = "h-clone";

/// Errors produced while reading or writing the persistence blob.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The stored text is not JSON at all.
    #[error("stored blob is not valid JSON: {0}")]
    Json(serde_json::Error),
    /// The stored JSON does not match the card list schema.
    #[error("stored blob does not match the card schema: {0}")]
    Schema(serde_json::Error),
    /// The backing key-value storage refused the operation.
    #[error("storage unavailable: {0}")]
    Storage(String),
}

/// Minimal string key-value storage, shaped like the browser's `Storage`.
pub trait KeyValueStorage {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Storage`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Storage`] if the backend rejects the write
    /// (for example when the browser quota is exhausted).
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-process storage for tests and non-browser hosts.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// `window.localStorage`.
#[cfg(target_arch = "wasm32")]
pub struct BrowserStorage {
    inner: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    /// Open the window's local storage. `None` outside a browsing context or
    /// when storage access is denied.
    #[must_use]
    pub fn local() -> Option<Self> {
        match web_sys::window()?.local_storage() {
            Ok(Some(inner)) => Some(Self { inner }),
            Ok(None) | Err(_) => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        self.inner
            .get_item(key)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.inner
            .set_item(key, value)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }
}

/// Serialize the card list to the blob format.
///
/// # Errors
///
/// Returns [`PersistError::Json`] if serialization fails.
pub fn encode_cards(cards: &[Card]) -> Result<String, PersistError> {
    serde_json::to_string(cards).map_err(PersistError::Json)
}

/// Parse and validate a blob.
///
/// The blob must be an array of objects each carrying a string `id`, a string
/// `text`, a `position` with numeric `x` and `y`, and a numeric `width`.
/// Unknown keys are ignored.
///
/// # Errors
///
/// Returns [`PersistError::Json`] for text that is not JSON and
/// [`PersistError::Schema`] for JSON of the wrong shape.
pub fn decode_cards(raw: &str) -> Result<Vec<Card>, PersistError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(PersistError::Json)?;
    serde_json::from_value(value).map_err(PersistError::Schema)
}

/// Load the stored card list into `store`.
///
/// A missing key is treated like an empty object, which never validates.
/// Returns `Ok(true)` when the stored cards replaced the in-memory list and
/// `Ok(false)` when the blob was absent or invalid.
///
/// # Errors
///
/// Returns [`PersistError::Storage`] only when the storage itself fails.
pub fn load(storage: &impl KeyValueStorage, store: &mut CardStore) -> Result<bool, PersistError> {
    let raw = storage
        .get_item(STORAGE_KEY)?
        .unwrap_or_else(|| "{}".to_owned());
    match decode_cards(&raw) {
        Ok(cards) => {
            store.replace_cards(cards);
            Ok(true)
        }
        Err(PersistError::Json(_) | PersistError::Schema(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Write the full static card list from `store`.
///
/// # Errors
///
/// Returns [`PersistError::Storage`] if the write is rejected.
pub fn save(storage: &mut impl KeyValueStorage, store: &CardStore) -> Result<(), PersistError> {
    let blob = encode_cards(store.cards())?;
    storage.set_item(STORAGE_KEY, &blob)
}

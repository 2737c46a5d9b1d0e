//! Local-storage persistence of the static cards.
//!
//! DESIGN
//! ======
//! The store's revision counter is the save trigger: every static-card
//! mutation bumps it, and [`SaveTracker`] writes the full card list once per
//! new revision. AI cards never reach storage.

use canvas::doc::CardStore;
use canvas::persist::{KeyValueStorage, PersistError, load, save};

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

/// Remembers the last revision written so unchanged stores are not rewritten.
#[derive(Debug, Default)]
pub struct SaveTracker {
    last_saved: Option<u64>,
}

impl SaveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the stored blob into `store`.
    ///
    /// Returns whether stored cards were applied. Applied cards count as
    /// saved; after a missing or invalid blob the next save writes the empty
    /// board over it.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Storage`] if storage cannot be read.
    pub fn restore(&mut self, store: &mut CardStore, storage: &impl KeyValueStorage) -> Result<bool, PersistError> {
        let applied = load(storage, store)?;
        if applied {
            self.last_saved = Some(store.revision());
        }
        Ok(applied)
    }

    /// Write the card list if its revision changed since the last write.
    ///
    /// Returns whether a write happened.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the storage write fails; the revision
    /// stays unsaved so the next change retries.
    pub fn save_if_changed(&mut self, store: &CardStore, storage: &mut impl KeyValueStorage) -> Result<bool, PersistError> {
        let revision = store.revision();
        if self.last_saved == Some(revision) {
            return Ok(false);
        }
        save(storage, store)?;
        self.last_saved = Some(revision);
        Ok(true)
    }
}

/// Load stored cards into the board and save on every later change.
#[cfg(feature = "csr")]
pub fn install(engine: leptos::prelude::RwSignal<canvas::engine::EngineCore>) {
    use canvas::persist::BrowserStorage;
    use leptos::prelude::*;

    let Some(mut storage) = BrowserStorage::local() else {
        log::warn!("local storage unavailable; cards will not persist");
        return;
    };
    let mut tracker = SaveTracker::new();

    let restored = engine.try_update(|e| tracker.restore(&mut e.store, &storage));
    match restored {
        Some(Ok(true)) => log::info!("restored cards from local storage"),
        Some(Ok(false)) => log::info!("no valid stored cards; starting empty"),
        Some(Err(e)) => log::warn!("failed to read stored cards: {e}"),
        None => {}
    }

    let revision = Memo::new(move |_| engine.with(|e| e.store.revision()));
    Effect::new(move || {
        revision.track();
        let result = engine.with_untracked(|e| tracker.save_if_changed(&e.store, &mut storage));
        if let Err(e) = result {
            log::warn!("failed to save cards: {e}");
        }
    });
}

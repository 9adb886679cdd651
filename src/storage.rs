//! `PreferenceStore` over `window.localStorage`.

use shell::prefs::{PreferenceStore, StorageChange, StoreError};
use web_sys::{Storage, StorageEvent, Window};

/// `localStorage`, or nothing when the browser refuses access. Reads then
/// return `None` and writes fail with [`StoreError::Unavailable`].
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("storage: localStorage blocked: {err:?}");
                None
            }
        };
        if storage.is_none() {
            log::info!("storage: no localStorage; preferences will not persist");
        }
        Self { storage }
    }
}

impl PreferenceStore for LocalStore {
    fn read(&self, key: &str) -> Option<String> {
        let storage = self.storage.as_ref()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("storage: read {key} failed: {err:?}");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage.set_item(key, value).map_err(|err| StoreError::Rejected {
            key: key.to_owned(),
            reason: format!("{err:?}"),
        })
    }
}

/// Translate a `storage` event from another tab.
pub fn change_from_event(event: &StorageEvent) -> StorageChange {
    StorageChange { key: event.key(), value: event.new_value() }
}

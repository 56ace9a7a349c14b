//! LocalStorage-backed preferences (WASM only)

use web_sys::Storage;

use crate::error::PlatformError;
use crate::prefs::KeyValueStore;

/// `window.localStorage`
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, PlatformError> {
        let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
        let storage = window
            .local_storage()?
            .ok_or_else(|| PlatformError::Js("localStorage unavailable".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set_string(&mut self, key: &str, value: &str) {
        // Quota or privacy-mode failures are not fatal
        if let Err(e) = self.storage.set_item(key, value) {
            log::warn!("Failed to persist '{}': {:?}", key, e);
        }
    }
}

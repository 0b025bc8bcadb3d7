#[cfg(test)]
use std::collections::HashMap;

use crate::error::SiteError;

pub trait KeyValueStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), SiteError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SiteError> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| SiteError::Storage(crate::error::js_error(err)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for BrowserStorage {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), SiteError> {
        Ok(())
    }
}

#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    read_only: bool,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.values.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn read_only() -> Self {
        Self {
            values: HashMap::new(),
            read_only: true,
        }
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SiteError> {
        if self.read_only {
            return Err(SiteError::Storage("quota exceeded".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn flag_is_set<S: KeyValueStore>(store: &S, key: &str) -> bool {
    store.read(key).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn memory_storage_is_last_write_wins() {
        let mut store = MemoryStorage::new();
        store.write("portfolio-theme", "cyber").unwrap();
        store.write("portfolio-theme", "light").unwrap();
        assert_eq!(store.read("portfolio-theme").as_deref(), Some("light"));
    }

    #[test]
    fn flags_are_presence_only() {
        let store = MemoryStorage::with_value("terminalVisited", "");
        assert!(flag_is_set(&store, "terminalVisited"));
        assert!(!flag_is_set(&MemoryStorage::new(), "terminalVisited"));
    }

    #[test]
    fn read_only_store_reports_storage_error() {
        let mut store = MemoryStorage::read_only();
        assert_eq!(
            store.write("k", "v").unwrap_err(),
            SiteError::Storage("quota exceeded".to_string())
        );
    }
}

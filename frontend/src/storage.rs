use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// A string key/value store that survives page reloads (or at least
/// pretends to).
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// The browser's `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn inner() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub fn is_available() -> bool {
        Self::inner().is_some()
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::inner()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::inner() {
            if storage.set_item(key, value).is_err() {
                tracing::warn!(key, "failed to write to local storage");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::inner() {
            if storage.remove_item(key).is_err() {
                tracing::warn!(key, "failed to remove from local storage");
            }
        }
    }
}

/// Storage kept in memory for the lifetime of the page.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Local storage when the browser grants it (it may not, e.g. in some
/// private modes), memory otherwise.
pub fn browser_storage() -> Rc<dyn Storage> {
    if LocalStorage::is_available() {
        Rc::new(LocalStorage)
    } else {
        tracing::warn!("local storage unavailable, sessions will not survive a reload");
        Rc::new(MemoryStorage::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_clones_share_items() {
        let storage = MemoryStorage::default();
        let other = storage.clone();

        storage.set("auth_token", "abc");
        assert_eq!(other.get("auth_token").as_deref(), Some("abc"));

        other.remove("auth_token");
        assert!(storage.is_empty());
    }
}

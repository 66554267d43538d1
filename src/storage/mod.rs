use leptos::logging::warn;
use serde::{Deserialize, Serialize};

pub(crate) const THEME_KEY: &str = "theme";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum StorageErrorKind {
    /// No `window`, or `localStorage` is disabled (private mode, sandboxed iframe).
    Unavailable,
    /// The backend refused the operation (quota exceeded, security error).
    Rejected,
}

#[derive(Clone, Debug)]
pub(crate) struct StorageError {
    pub kind: StorageErrorKind,
    pub message: String,
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StorageError {
    pub(crate) fn unavailable() -> Self {
        Self {
            kind: StorageErrorKind::Unavailable,
            message: "localStorage is unavailable".to_string(),
        }
    }

    pub(crate) fn rejected(op: &str, key: &str, detail: impl std::fmt::Debug) -> Self {
        Self {
            kind: StorageErrorKind::Rejected,
            message: format!("{op} `{key}` rejected: {detail:?}"),
        }
    }
}

pub(crate) type StorageResult<T> = Result<T, StorageError>;

/// Raw string key-value backend. No policy lives here.
pub(crate) trait KeyValueStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// The browser's `window.localStorage`, looked up on every call so a page where storage is
/// disabled simply yields `Unavailable` instead of failing at construction.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalStorage;

impl LocalStorage {
    fn storage() -> StorageResult<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(StorageError::unavailable)
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::rejected("get", key, e))
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::rejected("set", key, e))
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::rejected("remove", key, e))
    }
}

/// Decode a JSON value stored under `key`. Any failure (backend error, missing entry,
/// malformed payload) reads as `None`.
pub(crate) fn load_json_from_storage<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: for<'de> Deserialize<'de>,
{
    let json = match store.get_item(key) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            warn!("storage: read of `{key}` failed: {e}");
            return None;
        }
    };

    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("storage: ignoring malformed value under `{key}`: {e}");
            None
        }
    }
}

pub(crate) fn save_json_to_storage<S, T>(store: &S, key: &str, value: &T)
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            warn!("storage: could not encode `{key}`: {e}");
            return;
        }
    };

    if let Err(e) = store.set_item(key, &json) {
        warn!("storage: write of `{key}` failed: {e}");
    }
}

pub(crate) fn remove_from_storage<S>(store: &S, key: &str)
where
    S: KeyValueStore + ?Sized,
{
    if let Err(e) = store.remove_item(key) {
        warn!("storage: removal of `{key}` failed: {e}");
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryStore;

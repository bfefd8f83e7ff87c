//! Key-value preference storage contracts and adapters.
//!
//! Every value is a whole JSON document stored as text under one key. A save replaces the
//! previous value in one step, so readers see either the old or the new document, never a mix.

use std::{cell::RefCell, collections::BTreeMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Object-safe boxed future used by [`PrefsStore`] async methods.
pub type PrefsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for persisted key-value documents (JSON stored as text per key).
pub trait PrefsStore {
    /// Loads the raw JSON text stored under `key`.
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>>;

    /// Replaces the raw JSON text stored under `key`.
    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>>;

    /// Deletes `key`.
    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op store for unsupported targets; nothing survives a reload.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_pref<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_pref<'a>(&'a self, _key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store keyed by string. Clones share the same backing map.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Creates a store pre-seeded with raw JSON entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::default();
        store.inner.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        store
    }

    /// Returns the raw JSON text under `key` without going through the async contract.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    /// Returns the stored keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().keys().cloned().collect()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.raw(key)) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}

/// Loads and deserializes a typed value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub async fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_pref(key).await? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| format!("{key}: {e}"))?;
    Ok(Some(value))
}

/// Serializes the whole value and saves it through a [`PrefsStore`] implementation.
///
/// Serialization happens before the store is touched, so a failure leaves the previous value.
///
/// # Errors
///
/// Returns an error when serialization or the store save fails.
pub async fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| format!("{key}: {e}"))?;
    store.save_pref(key, &raw).await
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use futures::executor::block_on;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct IconSpot {
        x: i32,
        y: i32,
    }

    #[test]
    fn memory_store_overwrites_and_deletes() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;

        block_on(store_obj.save_pref("homeos_settings", "{\"theme\":\"dark\"}")).expect("save");
        block_on(store_obj.save_pref("homeos_settings", "{\"theme\":\"light\"}")).expect("save");
        assert_eq!(
            block_on(store_obj.load_pref("homeos_settings")).expect("load"),
            Some("{\"theme\":\"light\"}".to_string())
        );
        block_on(store_obj.delete_pref("homeos_settings")).expect("delete");
        assert_eq!(
            block_on(store_obj.load_pref("homeos_settings")).expect("load"),
            None
        );
    }

    #[test]
    fn clones_share_backing_map() {
        let store = MemoryPrefsStore::with_entries([("a", "1")]);
        let clone = store.clone();
        block_on(clone.save_pref("b", "2")).expect("save");
        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.raw("b").as_deref(), Some("2"));
    }

    #[test]
    fn typed_helpers_round_trip_maps() {
        let store = MemoryPrefsStore::default();
        let mut positions = BTreeMap::new();
        positions.insert("notepad".to_string(), IconSpot { x: 20, y: 120 });

        block_on(save_pref_with(&store, "desktop-icon-positions", &positions)).expect("save");
        let loaded: Option<BTreeMap<String, IconSpot>> =
            block_on(load_pref_with(&store, "desktop-icon-positions")).expect("load");
        assert_eq!(loaded, Some(positions));
    }

    #[test]
    fn corrupt_json_reports_key() {
        let store = MemoryPrefsStore::with_entries([("desktop-files", "[not json")]);
        let err = block_on(load_pref_with::<_, Vec<String>>(&store, "desktop-files"))
            .expect_err("corrupt value");
        assert!(err.starts_with("desktop-files:"), "{err}");
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopPrefsStore;
        let store_obj: &dyn PrefsStore = &store;
        assert_eq!(block_on(store_obj.load_pref("k")).expect("load"), None);
        block_on(store_obj.save_pref("k", "{}")).expect("save");
        block_on(store_obj.delete_pref("k")).expect("delete");
    }
}

//! Extension trait for [`KeyValueStore`] with typed convenience methods.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{KeyValueStore, StoreError};

/// Typed convenience methods for [`KeyValueStore`].
///
/// Provides `get_json`/`set_json` for serde-serializable types. These are
/// default methods on an extension trait so that [`KeyValueStore`] stays
/// object-safe and implementors only handle raw strings.
///
/// # Example
///
/// ```
/// use fable_store::{KeyValueStoreExt, MemoryStore};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Snapshot { active_tab: String }
///
/// let store = MemoryStore::new();
/// store.set_json("widget", &Snapshot { active_tab: "2".into() }).unwrap();
/// let snapshot: Option<Snapshot> = store.get_json("widget").unwrap();
/// assert_eq!(snapshot.unwrap().active_tab, "2");
/// ```
pub trait KeyValueStoreExt: KeyValueStore {
    /// Retrieve and JSON-decode the value under `key`.
    ///
    /// Returns `Ok(None)` when absent and [`StoreError::Json`] when the stored
    /// text is not a valid `T`.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(text) = self.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Json {
                key: key.to_owned(),
                source,
            })
    }

    /// JSON-encode `value` and store it under `key`.
    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string(value).map_err(|source| StoreError::Json {
            key: key.to_owned(),
            source,
        })?;
        self.set(key, &text)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    use super::*;
    use crate::MemoryStore;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        count: u32,
    }

    #[test]
    fn test_json_round_trip() {
        let store = MemoryStore::new();
        let entry = Entry {
            name: "tab".to_owned(),
            count: 3,
        };

        store.set_json("entry", &entry).unwrap();
        let loaded: Option<Entry> = store.get_json("entry").unwrap();

        assert_eq!(loaded, Some(entry));
    }

    #[test]
    fn test_get_json_absent() {
        let store = MemoryStore::new();
        let loaded: Option<Entry> = store.get_json("missing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_get_json_malformed() {
        let store = MemoryStore::new();
        store.set("entry", "{not json").unwrap();

        let result: Result<Option<Entry>, _> = store.get_json("entry");
        assert!(matches!(result, Err(StoreError::Json { ref key, .. }) if key == "entry"));
    }

    #[test]
    fn test_get_json_wrong_shape() {
        let store = MemoryStore::new();
        store.set("entry", r#"{"name": 5}"#).unwrap();

        let result: Result<Option<Entry>, _> = store.get_json("entry");
        assert!(result.is_err());
    }

    #[test]
    fn test_works_through_trait_object() {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set_json("n", &42_u32).unwrap();
        assert_eq!(store.get_json::<u32>("n").unwrap(), Some(42));
    }
}

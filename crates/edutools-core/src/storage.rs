//! Property storage abstraction.
//!
//! Feature modules persist their data through this seam. The navigation
//! core keeps no state of its own here and is rebuilt on every start.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ToolsError;

/// Separator between namespace segments of a storage key.
const NAMESPACE_SEPARATOR: char = ':';

/// Key→value storage with optional namespacing.
pub trait PropertyStorage: Send + Sync + fmt::Debug {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::Storage` if the backend rejects the write.
    fn set(&self, key: &str, value: Value) -> Result<(), ToolsError>;

    /// Removes the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::Storage` if the backend rejects the write.
    fn drop_key(&self, key: &str) -> Result<(), ToolsError>;

    /// Returns a view of this storage scoped to `namespace`.
    fn sub_storage(&self, namespace: &str) -> Arc<dyn PropertyStorage>;

    /// Appends `value` to the list stored under `key`, creating the list
    /// when the key is empty.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::Storage` if the key holds something other than
    /// a list, or if the write fails.
    fn push_to_list(&self, key: &str, value: Value) -> Result<(), ToolsError> {
        let mut list = match self.get(key) {
            None => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ToolsError::Storage(format!("key '{key}' does not hold a list")));
            }
        };
        list.push(value);
        self.set(key, Value::Array(list))
    }
}

/// Typed helpers over any [`PropertyStorage`].
pub trait StorageExt {
    /// Reads and deserializes the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::Storage` if the stored value has another shape.
    fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ToolsError>;

    /// Serializes and stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::Storage` if serialization or the write fails.
    fn set_as<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ToolsError>;
}

impl<S: PropertyStorage + ?Sized> StorageExt for S {
    fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ToolsError> {
        self.get(key)
            .map(|value| {
                serde_json::from_value(value).map_err(|e| {
                    ToolsError::Storage(format!("failed to decode key '{key}': {e}"))
                })
            })
            .transpose()
    }

    fn set_as<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ToolsError> {
        let value = serde_json::to_value(value)
            .map_err(|e| ToolsError::Storage(format!("failed to encode key '{key}': {e}")))?;
        self.set(key, value)
    }
}

/// Process-local storage. Sub-storages share the same map under a key prefix.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, Value>>>,
    prefix: String,
}

impl MemoryStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every key stored under this storage's namespace.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let Ok(entries) = self.entries.lock() else {
            return Vec::new();
        };
        let mut keys: Vec<String> = entries
            .keys()
            .filter_map(|key| self.strip_namespace(key))
            .map(str::to_owned)
            .collect();
        keys.sort();
        keys
    }

    fn full_key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_owned()
        } else {
            format!("{}{NAMESPACE_SEPARATOR}{key}", self.prefix)
        }
    }

    fn strip_namespace<'a>(&self, full_key: &'a str) -> Option<&'a str> {
        if self.prefix.is_empty() {
            return Some(full_key);
        }
        full_key
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix(NAMESPACE_SEPARATOR))
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Value>>, ToolsError> {
        self.entries
            .lock()
            .map_err(|_| ToolsError::Storage("memory storage lock poisoned".into()))
    }
}

impl PropertyStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<Value> {
        self.lock().ok()?.get(&self.full_key(key)).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), ToolsError> {
        self.lock()?.insert(self.full_key(key), value);
        Ok(())
    }

    fn drop_key(&self, key: &str) -> Result<(), ToolsError> {
        self.lock()?.remove(&self.full_key(key));
        Ok(())
    }

    fn sub_storage(&self, namespace: &str) -> Arc<dyn PropertyStorage> {
        Arc::new(Self {
            entries: Arc::clone(&self.entries),
            prefix: self.full_key(namespace),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sub_storage_is_isolated_from_parent_keys() {
        // Arrange
        let storage = MemoryStorage::new();
        let teams = storage.sub_storage("teams");

        // Act
        storage.set("teams", json!("root")).unwrap();
        teams.set("teams", json!("scoped")).unwrap();

        // Assert
        assert_eq!(storage.get("teams"), Some(json!("root")));
        assert_eq!(teams.get("teams"), Some(json!("scoped")));
        assert_eq!(storage.keys(), vec!["teams".to_owned(), "teams:teams".to_owned()]);
    }

    #[test]
    fn test_push_to_list_creates_and_extends_list() {
        let storage = MemoryStorage::new();

        storage.push_to_list("log", json!(1)).unwrap();
        storage.push_to_list("log", json!(2)).unwrap();

        assert_eq!(storage.get("log"), Some(json!([1, 2])));
    }

    #[test]
    fn test_push_to_list_rejects_non_list_value() {
        let storage = MemoryStorage::new();
        storage.set("log", json!({ "a": 1 })).unwrap();

        let result = storage.push_to_list("log", json!(3));

        match result.unwrap_err() {
            ToolsError::Storage(message) => assert!(message.contains("log")),
            other => panic!("expected Storage, got {other:?}"),
        }
    }

    #[test]
    fn test_drop_key_removes_value() {
        let storage = MemoryStorage::new();
        storage.set("k", json!(true)).unwrap();

        storage.drop_key("k").unwrap();

        assert_eq!(storage.get("k"), None);
    }

    #[test]
    fn test_typed_helpers_round_trip_through_dyn_storage() {
        let storage: Arc<dyn PropertyStorage> = Arc::new(MemoryStorage::new());

        storage.set_as("numbers", &vec![1_u32, 2, 3]).unwrap();
        let numbers: Option<Vec<u32>> = storage.get_as("numbers").unwrap();

        assert_eq!(numbers, Some(vec![1, 2, 3]));
        assert!(storage.get_as::<String>("numbers").is_err());
    }
}

//! Key/value document abstraction the paint layer reads and writes through.
//!
//! The collaborative document is owned by the embedding application; network
//! sync, persistence, and conflict resolution all happen there. This layer
//! only needs string entries under string keys, so the trait stays infallible
//! and object safe.

use std::collections::BTreeMap;

pub trait WorldDocument {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&mut self, key: &str, value: &str);
    fn delete(&mut self, key: &str);
    /// Keys starting with `prefix`, in unspecified order.
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory document backed by a `BTreeMap`. The reference implementation
/// for tests and single-process embedders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    entries: BTreeMap<String, String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WorldDocument for MemoryDocument {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect()
    }
}

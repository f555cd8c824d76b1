//! Keyed cache for per-parent collections.
//!
//! Maps a parent identifier (typically an event id) to a previously fetched
//! child collection. A present key is a hit even when its value is empty,
//! including the empty value a failed fetch leaves behind. That key stays
//! poisoned until [`KeyedCache::invalidate`] or [`KeyedCache::clear`]; the
//! stores expose both as the explicit retry path.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::RwLock;

/// Per-key memoization of fetched collections.
#[derive(Debug)]
pub struct KeyedCache<K, V> {
    entries: RwLock<HashMap<K, Vec<V>>>,
}

impl<K, V> Default for KeyedCache<K, V> {
    fn default() -> Self {
        Self { entries: RwLock::new(HashMap::new()) }
    }
}

impl<K, V> KeyedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached collection for `key`, if the key was ever stored.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<Vec<V>> {
        self.entries.read().get(key).cloned()
    }

    /// True when `key` has a stored collection (possibly empty).
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Stores a collection for `key`, replacing any previous one.
    pub fn insert(&self, key: K, values: Vec<V>) {
        self.entries.write().insert(key, values);
    }

    /// Drops one key so its next lookup refetches.
    pub fn invalidate(&self, key: &K) {
        self.entries.write().remove(key);
    }

    /// Drops every key.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of cached keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_is_a_hit() {
        let cache: KeyedCache<i64, &str> = KeyedCache::new();
        assert!(!cache.contains(&1));

        cache.insert(1, Vec::new());
        assert!(cache.contains(&1));
        assert_eq!(cache.get(&1), Some(Vec::new()));
    }

    #[test]
    fn test_insert_replaces() {
        let cache: KeyedCache<i64, &str> = KeyedCache::new();
        cache.insert(1, vec!["a"]);
        cache.insert(1, vec!["b", "c"]);
        assert_eq!(cache.get(&1), Some(vec!["b", "c"]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_single_key() {
        let cache: KeyedCache<i64, &str> = KeyedCache::new();
        cache.insert(1, vec!["a"]);
        cache.insert(2, vec!["b"]);

        cache.invalidate(&1);
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
    }

    #[test]
    fn test_clear_resets_everything() {
        let cache: KeyedCache<i64, &str> = KeyedCache::new();
        cache.insert(1, vec!["a"]);
        cache.insert(2, vec!["b"]);

        cache.clear();
        assert!(cache.is_empty());
    }
}

//! Cache of created assets keyed by their load parameters.

use std::collections::HashMap;
use std::hash::Hash;

/// Factory which creates each value at most once per key.
///
/// Failed creations are not cached, so they are retried on the next request.
///
#[derive(Debug)]
pub struct CachingFactory<K, V> {
    cache: HashMap<K, V>,
    hits: usize,
    misses: usize,
}

impl<K, V> CachingFactory<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Creates an empty factory.
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns cached value for the key or creates it with the loader.
    ///
    /// # Errors
    ///
    /// An error of the loader is returned as is.
    ///
    pub fn get_or_create<F, E>(&mut self, key: K, loader: F) -> Result<V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        if let Some(value) = self.cache.get(&key) {
            self.hits += 1;
            return Ok(value.clone());
        }
        self.misses += 1;
        let value = loader(&key)?;
        self.cache.insert(key, value.clone());
        Ok(value)
    }

    /// Returns `true` if value for the key was already created.
    pub fn contains(&self, key: &K) -> bool {
        self.cache.contains_key(key)
    }

    /// Count of cached values.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Count of requests served from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Count of requests which called the loader.
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Forgets all cached values.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<K, V> Default for CachingFactory<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_called_once() {
        let mut factory = CachingFactory::new();
        let mut calls = 0;

        for _ in 0..3 {
            let value: Result<_, ()> = factory.get_or_create("key", |key| {
                calls += 1;
                Ok(key.len())
            });
            assert_eq!(value, Ok(3));
        }
        assert_eq!(calls, 1);
        assert_eq!(factory.hits(), 2);
        assert_eq!(factory.misses(), 1);
        assert!(factory.contains(&"key"));
    }

    #[test]
    fn test_failure_not_cached() {
        let mut factory = CachingFactory::<u32, u32>::new();

        assert_eq!(factory.get_or_create(1, |_| Err("broken")), Err("broken"));
        assert!(factory.is_empty());
        assert_eq!(factory.get_or_create(1, |&key| Ok::<_, &str>(key * 2)), Ok(2));
        assert_eq!(factory.len(), 1);

        factory.clear();
        assert!(!factory.contains(&1));
    }
}

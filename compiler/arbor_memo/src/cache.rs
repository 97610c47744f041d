//! Keyed result cache.

use std::hash::Hash;

use arbor_pool::Clear;
use rustc_hash::FxHashMap;

/// Cache flavor used when a cache is created.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum CachePolicy {
    /// Grow without limit until cleared.
    #[default]
    Unbounded,
    /// Hold at most `capacity` entries; a full cache is emptied before the
    /// next insert.
    Bounded { capacity: usize },
    /// Never store anything; every lookup misses.
    Disabled,
}

/// Hit/miss counters of a [`MemoCache`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Memoization table from `K` to `V`.
#[derive(Clone, Debug)]
pub struct MemoCache<K, V> {
    entries: FxHashMap<K, V>,
    policy: CachePolicy,
    stats: CacheStats,
}

impl<K: Eq + Hash, V> MemoCache<K, V> {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            entries: FxHashMap::default(),
            policy,
            stats: CacheStats::default(),
        }
    }

    #[inline]
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Look up a cached result, counting the hit or miss.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let found = self.entries.get(key);
        if found.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        found
    }

    /// Store a result under the cache policy.
    pub fn insert(&mut self, key: K, value: V) {
        match self.policy {
            CachePolicy::Unbounded => {}
            CachePolicy::Bounded { capacity } => {
                if capacity == 0 {
                    return;
                }
                if self.entries.len() >= capacity && !self.entries.contains_key(&key) {
                    self.entries.clear();
                }
            }
            CachePolicy::Disabled => return,
        }
        self.entries.insert(key, value);
    }

    /// Return the cached result for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> V
    where
        V: Clone,
    {
        if let Some(value) = self.get(&key) {
            return value.clone();
        }
        let value = compute(&key);
        self.insert(key, value.clone());
        value
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl<K: Eq + Hash, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}

impl<K, V> Clear for MemoCache<K, V> {
    /// Drop all entries and reset the counters; the policy is kept.
    fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }
}

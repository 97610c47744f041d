//! Function wrapper backed by a [`MemoCache`].

use std::hash::Hash;

use arbor_pool::Clear;

use crate::{CachePolicy, MemoCache};

/// A pure function with a result cache in front of it.
pub struct Memoized<K, V, F> {
    cache: MemoCache<K, V>,
    function: F,
}

/// Wrap `function` so repeated calls with an equal key reuse the first result.
///
/// `function` must be pure: the cache assumes equal keys always produce equal
/// results.
pub fn memoize<K, V, F>(function: F, policy: CachePolicy) -> Memoized<K, V, F>
where
    K: Eq + Hash,
    V: Clone,
    F: Fn(&K) -> V,
{
    Memoized {
        cache: MemoCache::new(policy),
        function,
    }
}

impl<K, V, F> Memoized<K, V, F>
where
    K: Eq + Hash,
    V: Clone,
    F: Fn(&K) -> V,
{
    pub fn call(&mut self, key: K) -> V {
        let function = &self.function;
        self.cache.get_or_insert_with(key, |k| function(k))
    }

    #[inline]
    pub fn cache(&self) -> &MemoCache<K, V> {
        &self.cache
    }
}

impl<K, V, F> Clear for Memoized<K, V, F> {
    fn clear(&mut self) {
        self.cache.clear();
    }
}

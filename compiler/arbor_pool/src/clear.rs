//! The reset capability required of pooled instances.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::BuildHasher;

use smallvec::SmallVec;

/// Reset an instance to a reusable initial state.
///
/// Implementations should keep allocated capacity where that is the point of
/// pooling, and must drop any state that would leak between leases.
pub trait Clear {
    fn clear(&mut self);
}

impl<T> Clear for Vec<T> {
    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }
}

impl<T> Clear for VecDeque<T> {
    #[inline]
    fn clear(&mut self) {
        VecDeque::clear(self);
    }
}

impl Clear for String {
    #[inline]
    fn clear(&mut self) {
        String::clear(self);
    }
}

impl<K, V, S: BuildHasher> Clear for HashMap<K, V, S> {
    #[inline]
    fn clear(&mut self) {
        HashMap::clear(self);
    }
}

impl<T, S: BuildHasher> Clear for HashSet<T, S> {
    #[inline]
    fn clear(&mut self) {
        HashSet::clear(self);
    }
}

impl<A: smallvec::Array> Clear for SmallVec<A> {
    #[inline]
    fn clear(&mut self) {
        SmallVec::clear(self);
    }
}

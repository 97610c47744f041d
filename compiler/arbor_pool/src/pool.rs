//! Bounded pool and its lease handle.

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;

use crate::Clear;

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Default pool capacity: the available parallelism of the host, or 1.
pub fn default_capacity() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Bounded, thread-safe pool of reusable instances.
///
/// Idle instances sit behind a short-lived lock; leases never hold it.
pub struct ObjectPool<T: Clear> {
    idle: Mutex<Vec<T>>,
    capacity: usize,
    factory: Factory<T>,
}

impl<T: Clear> ObjectPool<T> {
    /// Create a pool that keeps at most `capacity` idle instances and builds
    /// new ones with `factory`.
    pub fn new(capacity: usize, factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            idle: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
            factory: Box::new(factory),
        }
    }

    /// Create a pool sized by [`default_capacity`].
    pub fn with_default_capacity(factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self::new(default_capacity(), factory)
    }

    /// Maximum number of idle instances retained.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of idle instances currently held.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    /// Lease an instance, reusing an idle one when available.
    pub fn get(&self) -> PooledObject<'_, T> {
        PooledObject {
            pool: self,
            item: Some(self.acquire_owned()),
        }
    }

    /// Take an instance out of the pool without a lease.
    ///
    /// Hand it back with [`release`](Self::release), or let it drop.
    pub fn acquire_owned(&self) -> T {
        let reused = self.idle.lock().pop();
        match reused {
            Some(item) => item,
            None => {
                tracing::trace!(capacity = self.capacity, "pool empty; allocating");
                (self.factory)()
            }
        }
    }

    /// Clear `item` and keep it for reuse, or drop it if the pool is full.
    pub fn release(&self, mut item: T) {
        item.clear();
        let mut idle = self.idle.lock();
        if idle.len() < self.capacity {
            idle.push(item);
        } else {
            drop(idle);
            tracing::trace!(capacity = self.capacity, "pool full; dropping instance");
        }
    }
}

impl<T: Clear> fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPool")
            .field("capacity", &self.capacity)
            .field("idle", &self.idle_count())
            .finish_non_exhaustive()
    }
}

/// Exclusive lease of a pooled instance.
///
/// Dereferences to the instance. Dropping the lease (including during a
/// panic unwind) clears the instance and returns it to its pool.
pub struct PooledObject<'p, T: Clear> {
    pool: &'p ObjectPool<T>,
    item: Option<T>,
}

impl<T: Clear> PooledObject<'_, T> {
    /// Return the instance now. Equivalent to dropping the lease.
    pub fn release(self) {
        drop(self);
    }

    /// Keep the instance for good; it will not go back to the pool.
    pub fn detach(mut self) -> T {
        match self.item.take() {
            Some(item) => item,
            None => unreachable!("lease already gave up its instance"),
        }
    }
}

impl<T: Clear> Deref for PooledObject<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match &self.item {
            Some(item) => item,
            None => unreachable!("lease already gave up its instance"),
        }
    }
}

impl<T: Clear> DerefMut for PooledObject<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.item {
            Some(item) => item,
            None => unreachable!("lease already gave up its instance"),
        }
    }
}

impl<T: Clear> Drop for PooledObject<'_, T> {
    fn drop(&mut self) {
        if let Some(item) = self.item.take() {
            self.pool.release(item);
        }
    }
}

impl<T: Clear + fmt::Debug> fmt::Debug for PooledObject<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PooledObject").field(&self.item).finish()
    }
}

#[cfg(test)]
mod tests;

//! Object pooling for transient, reusable state.
//!
//! Hashing visitors and token stacks are expensive to build but cheap to
//! reset. An [`ObjectPool`] keeps a bounded number of idle instances and
//! hands them out as [`PooledObject`] leases.
//!
//! # Guarantees
//!
//! - `get` never blocks and never fails: an empty pool allocates fresh.
//! - Capacity is advisory: instances returned to a full pool are dropped.
//! - Every instance is [`Clear`]ed before it becomes idle again.
//! - A lease returns its instance exactly once. The lease is move-only and
//!   gives its instance up through `Option::take`, so a second return is
//!   impossible.
//!
//! # Example
//!
//! ```
//! use arbor_pool::ObjectPool;
//!
//! let pool: ObjectPool<Vec<u32>> = ObjectPool::new(4, Vec::new);
//! {
//!     let mut scratch = pool.get();
//!     scratch.push(1);
//! } // cleared and returned here
//! assert_eq!(pool.idle_count(), 1);
//! assert!(pool.get().is_empty());
//! ```

mod clear;
mod pool;

pub use clear::Clear;
pub use pool::{default_capacity, ObjectPool, PooledObject};

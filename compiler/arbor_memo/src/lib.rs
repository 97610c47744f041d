//! Memoization for pure functions.
//!
//! [`MemoCache`] maps keys to previously computed results. Key equality is
//! whatever the key type's `Eq`/`Hash` say:
//!
//! - plain keys (ids, strings) give structural equality
//! - [`ByAddress`] keys give reference equality, so a cached lookup never
//!   re-enters a structural hash of the key itself
//!
//! [`CachePolicy`] selects the cache flavor, and [`memoize`] wraps a pure
//! function in a cache.
//!
//! Caches implement [`arbor_pool::Clear`] so an owner that is returned to a
//! pool starts its next lease with an empty cache.

mod cache;
mod key;
mod memoize;

pub use cache::{CachePolicy, CacheStats, MemoCache};
pub use key::ByAddress;
pub use memoize::{memoize, Memoized};

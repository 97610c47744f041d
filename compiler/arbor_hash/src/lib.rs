//! Arbor Hash - structural hash codes for expression trees
//!
//! Hash codes are computed by pooled visitors over a [`TreeArena`]:
//!
//! - **Structural**: the hash reflects node kinds, child order, declared
//!   types, member references and constants
//! - **Alpha-equivalent**: bound variables hash by de Bruijn position, so
//!   `x => x + 1` and `y => y + 1` collide while `x => y => x` and
//!   `x => y => y` do not
//! - **Memoized**: closed subtrees are cached per handle within one call
//! - **Stable on request**: [`StableHashHooks`] give results that survive
//!   process restarts and toolchain upgrades
//!
//! [`TreeArena`]: arbor_ir::TreeArena

mod combine;
mod cx;
mod expr;
mod hasher;
mod hooks;
mod marvin;
mod members;
mod scope;
mod types;

pub use combine::{combine, combine3, combine4, combine5, combine6, combine_all};
pub use hasher::{stable_hash_code, ExpressionHasher, HasherConfig, StableHashExt};
pub use hooks::{DefaultHashHooks, HashHooks, StableHashHooks, StableOptions};
pub use marvin::{marvin32, stable_str_hash, DEFAULT_SEED};

//! Public hashing facade.

use std::fmt;
use std::sync::OnceLock;

use arbor_ir::{ExprId, MemberId, TreeArena, TypeId};
use arbor_memo::CachePolicy;
use arbor_pool::{default_capacity, ObjectPool};

use crate::cx::HashCx;
use crate::expr::ExprHasher;
use crate::hooks::{DefaultHashHooks, HashHooks, StableHashHooks, StableOptions};

/// Construction options of an [`ExpressionHasher`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct HasherConfig {
    /// Idle visitors kept for reuse.
    pub pool_capacity: usize,
    /// Memo flavor of every pooled visitor.
    pub cache_policy: CachePolicy,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            pool_capacity: default_capacity(),
            cache_policy: CachePolicy::Unbounded,
        }
    }
}

/// Structural hash codes of expression trees.
///
/// Equal trees hash equally, including trees that differ only in the names
/// of bound variables. Free variables hash by name.
///
/// The hasher is `Sync`: concurrent callers each lease their own pooled
/// visitor, so a single computation never takes a lock.
///
/// # Example
///
/// ```
/// use arbor_hash::ExpressionHasher;
/// use arbor_ir::{BinaryOp, ConstValue, TreeArena};
///
/// let mut arena = TreeArena::new();
/// let int = arena.simple_type("System.Int32", None);
/// let lambda = |arena: &mut TreeArena, name: &str| {
///     let x = arena.parameter(name, int);
///     let one = arena.constant(ConstValue::Int(1), int);
///     let body = arena.binary(BinaryOp::Add, x, one);
///     arena.lambda(&[x], body, None)
/// };
/// let f = lambda(&mut arena, "x");
/// let g = lambda(&mut arena, "y");
///
/// let hasher = ExpressionHasher::new();
/// assert_eq!(hasher.hash_code(&arena, f), hasher.hash_code(&arena, g));
/// ```
pub struct ExpressionHasher<H: HashHooks = DefaultHashHooks> {
    hooks: H,
    visitors: ObjectPool<ExprHasher>,
}

impl ExpressionHasher {
    /// Hasher with process-local leaf hashing and the default configuration.
    pub fn new() -> Self {
        Self::with_hooks(DefaultHashHooks, HasherConfig::default())
    }
}

impl Default for ExpressionHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionHasher<StableHashHooks> {
    /// Hasher whose results are reproducible across processes.
    pub fn stable(options: StableOptions) -> Self {
        Self::with_hooks(StableHashHooks::new(options), HasherConfig::default())
    }
}

impl<H: HashHooks> ExpressionHasher<H> {
    pub fn with_hooks(hooks: H, config: HasherConfig) -> Self {
        let policy = config.cache_policy;
        Self {
            hooks,
            visitors: ObjectPool::new(config.pool_capacity, move || ExprHasher::new(policy)),
        }
    }

    #[inline]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Hash the expression rooted at `root`.
    ///
    /// # Panics
    ///
    /// Panics if `root`, or any handle reachable from it, was not allocated
    /// by `arena`.
    #[tracing::instrument(level = "trace", skip_all, fields(root = root.raw()))]
    pub fn hash_code(&self, arena: &TreeArena, root: ExprId) -> i32 {
        let cx = HashCx::new(arena, &self.hooks);
        let mut visitor = self.visitors.get();
        visitor.visit(&cx, root)
    }

    /// Hash a type reference on its own.
    #[tracing::instrument(level = "trace", skip_all, fields(ty = ty.raw()))]
    pub fn hash_type(&self, arena: &TreeArena, ty: TypeId) -> i32 {
        let cx = HashCx::new(arena, &self.hooks);
        self.visitors.get().hash_type(&cx, ty)
    }

    /// Hash a member reference on its own.
    #[tracing::instrument(level = "trace", skip_all, fields(member = member.raw()))]
    pub fn hash_member(&self, arena: &TreeArena, member: MemberId) -> i32 {
        let cx = HashCx::new(arena, &self.hooks);
        self.visitors.get().hash_member(&cx, member)
    }

    /// Idle visitors currently pooled.
    pub fn idle_visitors(&self) -> usize {
        self.visitors.idle_count()
    }

    #[cfg(test)]
    pub(crate) fn visitors(&self) -> &ObjectPool<ExprHasher> {
        &self.visitors
    }
}

impl<H: HashHooks + fmt::Debug> fmt::Debug for ExpressionHasher<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionHasher")
            .field("hooks", &self.hooks)
            .field("visitors", &self.visitors)
            .finish()
    }
}

/// Stable hash code of the tree rooted at `root`.
///
/// [`StableOptions::NONE`] and [`StableOptions::ALL`] share process-wide
/// hashers; other combinations build a transient one per call.
pub fn stable_hash_code(arena: &TreeArena, root: ExprId, options: StableOptions) -> i32 {
    static NONE: OnceLock<ExpressionHasher<StableHashHooks>> = OnceLock::new();
    static ALL: OnceLock<ExpressionHasher<StableHashHooks>> = OnceLock::new();

    let shared = if options == StableOptions::NONE {
        Some(&NONE)
    } else if options == StableOptions::ALL {
        Some(&ALL)
    } else {
        None
    };
    match shared {
        Some(cell) => cell
            .get_or_init(|| ExpressionHasher::stable(options))
            .hash_code(arena, root),
        None => ExpressionHasher::stable(options).hash_code(arena, root),
    }
}

/// Method-call sugar for [`stable_hash_code`].
pub trait StableHashExt {
    fn stable_hash_code(&self, root: ExprId, options: StableOptions) -> i32;
}

impl StableHashExt for TreeArena {
    fn stable_hash_code(&self, root: ExprId, options: StableOptions) -> i32 {
        stable_hash_code(self, root, options)
    }
}

#[cfg(test)]
mod tests;

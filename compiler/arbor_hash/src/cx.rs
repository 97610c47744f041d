use arbor_ir::TreeArena;

use crate::hooks::HashHooks;

/// Per-call inputs shared by every visitor of one hash computation.
///
/// Visitors are pooled and outlive any single tree, so the tree and hooks
/// are passed in rather than stored.
#[derive(Copy, Clone)]
pub(crate) struct HashCx<'a> {
    pub arena: &'a TreeArena,
    pub hooks: &'a dyn HashHooks,
}

impl<'a> HashCx<'a> {
    pub(crate) fn new(arena: &'a TreeArena, hooks: &'a dyn HashHooks) -> Self {
        Self { arena, hooks }
    }

    #[inline]
    pub(crate) fn str(&self, text: &str) -> i32 {
        self.hooks.hash_str(text)
    }

    #[inline]
    pub(crate) fn opt_str(&self, text: Option<&str>) -> i32 {
        text.map_or(0, |text| self.hooks.hash_str(text))
    }
}

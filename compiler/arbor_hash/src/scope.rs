//! Binding environments.
//!
//! A [`BindingStack`] is a stack of frames, each an ordered list of bound
//! symbols. The expression hasher binds `ExprId`s (lambda parameters, block
//! locals, catch variables); the type hasher binds `TypeId`s (generic method
//! type parameters). The symbol type keeps the two environments apart.
//!
//! Frames are recycled: popping only lowers the depth, and the next push
//! reuses the frame's storage.

use arbor_pool::Clear;
use smallvec::SmallVec;

type Frame<S> = SmallVec<[S; 4]>;

/// Stack of binding frames, innermost last.
#[derive(Debug)]
pub(crate) struct BindingStack<S> {
    frames: Vec<Frame<S>>,
    depth: usize,
}

impl<S: Copy + PartialEq> BindingStack<S> {
    pub(crate) fn new() -> Self {
        Self {
            frames: Vec::new(),
            depth: 0,
        }
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.depth == 0
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Open a frame binding `symbols` in order.
    pub(crate) fn push(&mut self, symbols: &[S]) {
        if self.depth == self.frames.len() {
            self.frames.push(Frame::new());
        }
        let frame = &mut self.frames[self.depth];
        frame.clear();
        frame.extend_from_slice(symbols);
        self.depth += 1;
    }

    /// Close the innermost frame.
    pub(crate) fn pop(&mut self) {
        debug_assert!(self.depth > 0, "pop on an empty binding stack");
        self.depth = self.depth.saturating_sub(1);
    }

    /// Resolve `symbol` to `(distance, index)`: the distance in frames from
    /// the innermost frame, and its position within that frame.
    ///
    /// The innermost frame that binds `symbol` wins.
    pub(crate) fn resolve(&self, symbol: S) -> Option<(usize, usize)> {
        self.frames[..self.depth]
            .iter()
            .rev()
            .enumerate()
            .find_map(|(distance, frame)| {
                frame
                    .iter()
                    .position(|&bound| bound == symbol)
                    .map(|index| (distance, index))
            })
    }
}

impl<S> Clear for BindingStack<S> {
    fn clear(&mut self) {
        self.depth = 0;
    }
}

/// Visitors that own a binding stack.
pub(crate) trait Binds {
    type Symbol: Copy + PartialEq;

    fn bindings(&mut self) -> &mut BindingStack<Self::Symbol>;
}

/// RAII frame: pushed on [`enter`](ScopeGuard::enter), popped on drop.
///
/// Dereferences to the visitor, so scope-dependent children are visited
/// through the guard.
pub(crate) struct ScopeGuard<'v, V: Binds> {
    visitor: &'v mut V,
}

impl<'v, V: Binds> ScopeGuard<'v, V> {
    pub(crate) fn enter(visitor: &'v mut V, symbols: &[V::Symbol]) -> Self {
        visitor.bindings().push(symbols);
        Self { visitor }
    }
}

impl<V: Binds> std::ops::Deref for ScopeGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.visitor
    }
}

impl<V: Binds> std::ops::DerefMut for ScopeGuard<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.visitor
    }
}

impl<V: Binds> Drop for ScopeGuard<'_, V> {
    fn drop(&mut self) {
        self.visitor.bindings().pop();
    }
}

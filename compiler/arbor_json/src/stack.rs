//! Growable token stack shared by the tree writer and reader.

use std::sync::OnceLock;
use std::vec::Drain;

use arbor_pool::{Clear, ObjectPool};

use crate::value::JsonExpr;

/// Array-backed stack with bulk slot reservation and bulk pop
/// ([`drain_above`](Self::drain_above)).
#[derive(Clone, Debug, Default)]
pub struct TokenStack<T> {
    items: Vec<T>,
}

impl<T> TokenStack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Append `n` default slots with one capacity check and return them
    /// for in-place initialization.
    pub fn push_slots(&mut self, n: usize) -> &mut [T]
    where
        T: Default,
    {
        let start = self.items.len();
        self.items.resize_with(start + n, T::default);
        &mut self.items[start..]
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Overwrite a live slot.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the live region.
    #[inline]
    pub fn set(&mut self, index: usize, item: T) {
        self.items[index] = item;
    }

    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Bulk pop: remove every entry above `index` in one truncation and
    /// yield them bottom first. Entries left unconsumed are dropped.
    pub fn drain_above(&mut self, index: usize) -> Drain<'_, T> {
        self.items.drain(index + 1..)
    }

    /// Live entries, bottom first.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Clear for TokenStack<T> {
    fn clear(&mut self) {
        self.items.clear();
    }
}

/// Entry of the writer and reader stacks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StackToken {
    /// Reserved slot not yet filled.
    #[default]
    Vacant,
    StartArray,
    StartObject,
    EndArray,
    EndObject,
    Name(Box<str>),
    Tree(JsonExpr),
}

impl StackToken {
    pub fn describe(&self) -> &'static str {
        match self {
            StackToken::Vacant => "an unfilled slot",
            StackToken::StartArray => "an open array",
            StackToken::StartObject => "an open object",
            StackToken::EndArray => "end of array",
            StackToken::EndObject => "end of object",
            StackToken::Name(_) => "a property name",
            StackToken::Tree(_) => "a value",
        }
    }
}

/// Pool of token stacks for writers and readers.
pub type TokenPool = ObjectPool<TokenStack<StackToken>>;

/// Process-wide pool used by `TreeWriter::new` and `TreeReader::new`.
pub fn default_pool() -> &'static TokenPool {
    static POOL: OnceLock<TokenPool> = OnceLock::new();
    POOL.get_or_init(|| TokenPool::with_default_capacity(TokenStack::new))
}

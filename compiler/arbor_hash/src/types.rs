//! Type reference hashing.

use arbor_ir::{TypeId, TypeRange, TypeSlim};
use arbor_memo::{CachePolicy, MemoCache};
use arbor_pool::Clear;
use arbor_stack::ensure_sufficient_stack;

use crate::combine::{combine, combine3, combine4, usize_tag};
use crate::cx::HashCx;
use crate::scope::{BindingStack, Binds};

/// Rank contribution of a single-dimensional vector.
const VECTOR_RANK: i32 = -1;

/// Hashes `TypeSlim` references.
///
/// Generic parameters bound by an enclosing generic method definition hash by
/// position; all others hash by name. Results are memoized per `TypeId`, but
/// only while no generic parameters are bound.
#[derive(Debug)]
pub(crate) struct TypeHasher {
    pub(crate) scopes: BindingStack<TypeId>,
    memo: MemoCache<TypeId, i32>,
}

impl TypeHasher {
    pub(crate) fn new(policy: CachePolicy) -> Self {
        Self {
            scopes: BindingStack::new(),
            memo: MemoCache::new(policy),
        }
    }

    pub(crate) fn visit(&mut self, cx: &HashCx<'_>, id: TypeId) -> i32 {
        if !self.scopes.is_empty() {
            return self.visit_uncached(cx, id);
        }
        if let Some(&hash) = self.memo.get(&id) {
            return hash;
        }
        let hash = self.visit_uncached(cx, id);
        self.memo.insert(id, hash);
        hash
    }

    #[inline]
    pub(crate) fn visit_opt(&mut self, cx: &HashCx<'_>, id: Option<TypeId>) -> i32 {
        id.map_or(0, |id| self.visit(cx, id))
    }

    /// Left fold of the listed types from `0`.
    pub(crate) fn visit_list(&mut self, cx: &HashCx<'_>, range: TypeRange) -> i32 {
        cx.arena
            .type_list(range)
            .iter()
            .fold(0, |acc, &id| combine(acc, self.visit(cx, id)))
    }

    fn visit_uncached(&mut self, cx: &HashCx<'_>, id: TypeId) -> i32 {
        ensure_sufficient_stack(|| self.visit_kind(cx, id))
    }

    fn visit_kind(&mut self, cx: &HashCx<'_>, id: TypeId) -> i32 {
        let ty = cx.arena.ty(id);
        let kind = ty.kind().tag();
        match ty {
            TypeSlim::Simple { name, assembly } | TypeSlim::GenericDefinition { name, assembly } => {
                let assembly = assembly.as_ref().map_or(0, |asm| cx.hooks.hash_assembly(asm));
                combine3(kind, cx.str(name), assembly)
            }
            TypeSlim::Generic {
                definition,
                arguments,
            } => {
                let definition = self.visit(cx, *definition);
                cx.arena
                    .type_list(*arguments)
                    .iter()
                    .fold(combine(kind, definition), |acc, &arg| {
                        combine(acc, self.visit(cx, arg))
                    })
            }
            TypeSlim::GenericParameter { name } => match self.scopes.resolve(id) {
                Some((depth, index)) => combine(usize_tag(depth), usize_tag(index)),
                None => combine(kind, cx.str(name)),
            },
            TypeSlim::Array { element, rank } => {
                let rank = rank.map_or(VECTOR_RANK, |rank| rank as i32);
                combine3(kind, self.visit(cx, *element), rank)
            }
            TypeSlim::Structural { kind: shape, properties } => {
                let seed = combine(kind, *shape as i32);
                cx.arena.properties(*properties).iter().fold(seed, |acc, prop| {
                    let ty = self.visit(cx, prop.ty);
                    let index = self.visit_list(cx, prop.index_params);
                    combine4(acc, cx.str(&prop.name), ty, index)
                })
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn stats(&self) -> arbor_memo::CacheStats {
        self.memo.stats()
    }
}

impl Binds for TypeHasher {
    type Symbol = TypeId;

    fn bindings(&mut self) -> &mut BindingStack<TypeId> {
        &mut self.scopes
    }
}

impl Clear for TypeHasher {
    fn clear(&mut self) {
        self.scopes.clear();
        self.memo.clear();
    }
}

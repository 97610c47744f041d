//! Member reference hashing.

use arbor_ir::{MemberId, MemberSlim, MethodKind};
use arbor_memo::{CachePolicy, MemoCache};
use arbor_pool::Clear;

use crate::combine::{combine3, combine4, combine5, combine6, usize_tag};
use crate::cx::HashCx;
use crate::scope::ScopeGuard;
use crate::types::TypeHasher;

/// Hashes `MemberSlim` references, delegating types to an owned
/// [`TypeHasher`].
///
/// Generic method definitions bind their type parameters while their
/// parameter and return types are hashed, so alpha-equivalent signatures
/// (`T M<T>(T)` vs `U M<U>(U)`) collide.
#[derive(Debug)]
pub(crate) struct MemberHasher {
    pub(crate) types: TypeHasher,
    memo: MemoCache<MemberId, i32>,
}

impl MemberHasher {
    pub(crate) fn new(policy: CachePolicy) -> Self {
        Self {
            types: TypeHasher::new(policy),
            memo: MemoCache::new(policy),
        }
    }

    pub(crate) fn visit(&mut self, cx: &HashCx<'_>, id: MemberId) -> i32 {
        if !self.types.scopes.is_empty() {
            return self.visit_kind(cx, id);
        }
        if let Some(&hash) = self.memo.get(&id) {
            return hash;
        }
        let hash = self.visit_kind(cx, id);
        self.memo.insert(id, hash);
        hash
    }

    #[inline]
    pub(crate) fn visit_opt(&mut self, cx: &HashCx<'_>, id: Option<MemberId>) -> i32 {
        id.map_or(0, |id| self.visit(cx, id))
    }

    fn visit_kind(&mut self, cx: &HashCx<'_>, id: MemberId) -> i32 {
        let member = cx.arena.member(id);
        let kind = member.kind() as i32;
        match member {
            MemberSlim::Field {
                declaring,
                name,
                field_type,
            } => {
                let declaring = self.types.visit(cx, *declaring);
                let field_type = self.types.visit(cx, *field_type);
                combine4(kind, declaring, cx.str(name), field_type)
            }
            MemberSlim::Property {
                declaring,
                name,
                property_type,
                index_params,
            } => {
                let declaring = self.types.visit(cx, *declaring);
                let property_type = self.types.visit(cx, *property_type);
                let index_params = self.types.visit_list(cx, *index_params);
                combine5(kind, declaring, cx.str(name), property_type, index_params)
            }
            MemberSlim::Constructor { declaring, params } => {
                let declaring = self.types.visit(cx, *declaring);
                combine3(kind, declaring, self.types.visit_list(cx, *params))
            }
            MemberSlim::SimpleMethod {
                declaring,
                name,
                params,
                return_type,
            } => {
                let declaring = self.types.visit(cx, *declaring);
                let params = self.types.visit_list(cx, *params);
                let return_type = self.types.visit(cx, *return_type);
                combine6(
                    kind,
                    MethodKind::Simple as i32,
                    declaring,
                    cx.str(name),
                    params,
                    return_type,
                )
            }
            MemberSlim::GenericDefinitionMethod {
                declaring,
                name,
                generic_params,
                params,
                return_type,
            } => {
                let declaring = self.types.visit(cx, *declaring);
                let bound = cx.arena.type_list(*generic_params);
                let signature = {
                    let mut scope = ScopeGuard::enter(&mut self.types, bound);
                    let params = scope.visit_list(cx, *params);
                    let return_type = scope.visit(cx, *return_type);
                    combine3(usize_tag(bound.len()), params, return_type)
                };
                combine5(
                    kind,
                    MethodKind::GenericDefinition as i32,
                    declaring,
                    cx.str(name),
                    signature,
                )
            }
            MemberSlim::GenericMethod {
                definition,
                arguments,
            } => {
                let definition = self.visit(cx, *definition);
                let arguments = self.types.visit_list(cx, *arguments);
                combine4(kind, MethodKind::Generic as i32, definition, arguments)
            }
        }
    }

    /// Combined hit/miss counters of the member and type caches.
    #[cfg(test)]
    pub(crate) fn stats(&self) -> arbor_memo::CacheStats {
        let types = self.types.stats();
        let members = self.memo.stats();
        arbor_memo::CacheStats {
            hits: types.hits + members.hits,
            misses: types.misses + members.misses,
        }
    }
}

impl Clear for MemberHasher {
    fn clear(&mut self) {
        self.types.clear();
        self.memo.clear();
    }
}

//! Expression hashing.
//!
//! One exhaustive `match` over [`ExprKind`]. Every node combines its
//! node-type tag first, then each significant child or scalar in a fixed
//! order, including the node's declared type where it carries one. Absent
//! optional children contribute `0`.
//!
//! Variables are hashed de Bruijn style: a `Parameter` bound by an enclosing
//! `Lambda`, `Block` or catch handler hashes as `combine(distance, index)`
//! into the binding stack, never by name, so alpha-equivalent trees collide.
//! Binding sites contribute only `combine(Parameter, type)` per variable.

use arbor_ir::{
    BindingRange, CatchBlock, ElementInitRange, ExprId, ExprKind, ExprRange, LabelId,
    MemberBinding, MemberId, NodeType, TypeId,
};
use arbor_memo::{CachePolicy, MemoCache};
use arbor_pool::Clear;
use arbor_stack::ensure_sufficient_stack;

use crate::combine::{combine, combine3, combine4, combine5, combine6, usize_tag};
use crate::cx::HashCx;
use crate::members::MemberHasher;
use crate::scope::{BindingStack, Binds, ScopeGuard};

/// Leading tag of a label target's hash.
const LABEL_TARGET_TAG: i32 = 0x4C42;

/// Pooled expression visitor.
///
/// Owns the member and type visitors so one lease covers a whole tree.
#[derive(Debug)]
pub(crate) struct ExprHasher {
    pub(crate) members: MemberHasher,
    scopes: BindingStack<ExprId>,
    memo: MemoCache<ExprId, i32>,
}

impl ExprHasher {
    pub(crate) fn new(policy: CachePolicy) -> Self {
        Self {
            members: MemberHasher::new(policy),
            scopes: BindingStack::new(),
            memo: MemoCache::new(policy),
        }
    }

    /// Hash `id`, going through the memo only when nothing is bound.
    ///
    /// A hash computed under open bindings depends on them, so it is
    /// neither looked up nor stored.
    pub(crate) fn visit(&mut self, cx: &HashCx<'_>, id: ExprId) -> i32 {
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
    fn visit_opt(&mut self, cx: &HashCx<'_>, id: Option<ExprId>) -> i32 {
        id.map_or(0, |id| self.visit(cx, id))
    }

    fn visit_list(&mut self, cx: &HashCx<'_>, range: ExprRange) -> i32 {
        cx.arena
            .expr_list(range)
            .iter()
            .fold(0, |acc, &id| combine(acc, self.visit(cx, id)))
    }

    fn visit_uncached(&mut self, cx: &HashCx<'_>, id: ExprId) -> i32 {
        ensure_sufficient_stack(|| self.visit_kind(cx, id))
    }

    #[inline]
    fn ty(&mut self, cx: &HashCx<'_>, id: TypeId) -> i32 {
        self.members.types.visit(cx, id)
    }

    #[inline]
    fn ty_opt(&mut self, cx: &HashCx<'_>, id: Option<TypeId>) -> i32 {
        self.members.types.visit_opt(cx, id)
    }

    fn visit_kind(&mut self, cx: &HashCx<'_>, id: ExprId) -> i32 {
        let expr = cx.arena.expr(id);
        let tag = expr.node_type().tag();
        match expr {
            ExprKind::Constant { value, ty } => {
                let ty = self.ty(cx, *ty);
                combine3(tag, ty, cx.hooks.hash_constant(value))
            }
            ExprKind::Default { ty } => combine(tag, self.ty(cx, *ty)),
            ExprKind::Parameter { name, ty } => match self.scopes.resolve(id) {
                Some((depth, index)) => combine(usize_tag(depth), usize_tag(index)),
                None => {
                    let ty = self.ty(cx, *ty);
                    combine3(tag, ty, cx.opt_str(name.as_deref()))
                }
            },
            ExprKind::Lambda {
                delegate_type,
                params,
                body,
            } => {
                let bound = cx.arena.expr_list(*params);
                let body = {
                    let mut scope = ScopeGuard::enter(&mut *self, bound);
                    scope.visit(cx, *body)
                };
                let declarations = self.declarations(cx, *params);
                let delegate_type = self.ty_opt(cx, *delegate_type);
                combine4(tag, body, declarations, delegate_type)
            }
            ExprKind::Invocation { target, args } => {
                let target = self.visit(cx, *target);
                combine3(tag, target, self.visit_list(cx, *args))
            }
            ExprKind::MethodCall {
                object,
                method,
                args,
            } => {
                let object = self.visit_opt(cx, *object);
                let method = self.members.visit(cx, *method);
                combine4(tag, object, method, self.visit_list(cx, *args))
            }
            ExprKind::New {
                ty,
                constructor,
                args,
                members,
            } => {
                let ty = self.ty_opt(cx, *ty);
                let constructor = self.members.visit_opt(cx, *constructor);
                let args = self.visit_list(cx, *args);
                let members = cx
                    .arena
                    .member_list(*members)
                    .iter()
                    .fold(0, |acc, &member| combine(acc, self.members.visit(cx, member)));
                combine5(tag, ty, constructor, args, members)
            }
            ExprKind::NewArrayInit {
                element_type,
                exprs: items,
            }
            | ExprKind::NewArrayBounds {
                element_type,
                bounds: items,
            } => {
                let element_type = self.ty(cx, *element_type);
                combine3(tag, element_type, self.visit_list(cx, *items))
            }
            ExprKind::MemberAccess { object, member } => {
                let object = self.visit_opt(cx, *object);
                combine3(tag, object, self.members.visit(cx, *member))
            }
            ExprKind::MemberInit { new_expr, bindings } => {
                let new_expr = self.visit(cx, *new_expr);
                combine3(tag, new_expr, self.member_bindings(cx, *bindings))
            }
            ExprKind::ListInit {
                new_expr,
                initializers,
            } => {
                let new_expr = self.visit(cx, *new_expr);
                combine3(tag, new_expr, self.element_inits(cx, *initializers))
            }
            ExprKind::Binary {
                left,
                right,
                lifted_to_null,
                method,
                conversion,
                ..
            } => {
                let left = self.visit(cx, *left);
                let right = self.visit(cx, *right);
                let method = self.members.visit_opt(cx, *method);
                let conversion = self.visit_opt(cx, *conversion);
                combine6(tag, left, right, i32::from(*lifted_to_null), method, conversion)
            }
            ExprKind::Unary {
                operand, ty, method, ..
            } => {
                let operand = self.visit_opt(cx, *operand);
                let ty = self.ty_opt(cx, *ty);
                combine4(tag, operand, ty, self.members.visit_opt(cx, *method))
            }
            ExprKind::TypeBinary {
                expr, type_operand, ..
            } => {
                let expr = self.visit(cx, *expr);
                combine3(tag, expr, self.ty(cx, *type_operand))
            }
            ExprKind::Conditional {
                test,
                if_true,
                if_false,
                ty,
            } => {
                let test = self.visit(cx, *test);
                let if_true = self.visit(cx, *if_true);
                let if_false = self.visit(cx, *if_false);
                combine5(tag, test, if_true, if_false, self.ty_opt(cx, *ty))
            }
            ExprKind::Block {
                variables,
                exprs,
                ty,
            } => {
                let declarations = self.declarations(cx, *variables);
                let exprs = if variables.is_empty() {
                    self.visit_list(cx, *exprs)
                } else {
                    let bound = cx.arena.expr_list(*variables);
                    let mut scope = ScopeGuard::enter(&mut *self, bound);
                    scope.visit_list(cx, *exprs)
                };
                combine4(tag, declarations, exprs, self.ty_opt(cx, *ty))
            }
            ExprKind::Loop {
                body,
                break_label,
                continue_label,
            } => {
                let body = self.visit(cx, *body);
                let break_label = self.label_opt(cx, *break_label);
                combine4(tag, body, break_label, self.label_opt(cx, *continue_label))
            }
            ExprKind::Goto {
                kind,
                target,
                value,
                ty,
            } => {
                let target = self.label(cx, *target);
                let value = self.visit_opt(cx, *value);
                combine5(tag, *kind as i32, target, value, self.ty_opt(cx, *ty))
            }
            ExprKind::Label {
                target,
                default_value,
            } => {
                let target = self.label(cx, *target);
                combine3(tag, target, self.visit_opt(cx, *default_value))
            }
            ExprKind::Switch {
                ty,
                switch_value,
                cases,
                default_body,
                comparison,
            } => {
                let ty = self.ty_opt(cx, *ty);
                let switch_value = self.visit(cx, *switch_value);
                let cases = cx.arena.switch_cases(*cases).iter().fold(0, |acc, case| {
                    let tests = self.visit_list(cx, case.test_values);
                    combine(acc, combine(tests, self.visit(cx, case.body)))
                });
                let default_body = self.visit_opt(cx, *default_body);
                let comparison = self.members.visit_opt(cx, *comparison);
                combine6(tag, ty, switch_value, cases, default_body, comparison)
            }
            ExprKind::Try {
                ty,
                body,
                handlers,
                finally,
                fault,
            } => {
                let ty = self.ty_opt(cx, *ty);
                let body = self.visit(cx, *body);
                let handlers = cx
                    .arena
                    .catch_blocks(*handlers)
                    .iter()
                    .fold(0, |acc, handler| combine(acc, self.catch_block(cx, handler)));
                let finally = self.visit_opt(cx, *finally);
                combine6(tag, ty, body, handlers, finally, self.visit_opt(cx, *fault))
            }
            ExprKind::Index {
                object,
                indexer,
                args,
            } => {
                let object = self.visit(cx, *object);
                let indexer = self.members.visit_opt(cx, *indexer);
                combine4(tag, object, indexer, self.visit_list(cx, *args))
            }
        }
    }

    /// Binding-site contribution: position and type, never the name.
    fn declaration(&mut self, cx: &HashCx<'_>, param: ExprId) -> i32 {
        match cx.arena.expr(param) {
            ExprKind::Parameter { ty, .. } => combine(NodeType::Parameter.tag(), self.ty(cx, *ty)),
            _ => self.visit(cx, param),
        }
    }

    fn declarations(&mut self, cx: &HashCx<'_>, params: ExprRange) -> i32 {
        cx.arena
            .expr_list(params)
            .iter()
            .fold(0, |acc, &param| combine(acc, self.declaration(cx, param)))
    }

    fn catch_block(&mut self, cx: &HashCx<'_>, handler: &CatchBlock) -> i32 {
        let test = self.ty(cx, handler.test);
        match handler.variable {
            Some(variable) => {
                let declaration = self.declaration(cx, variable);
                let mut scope = ScopeGuard::enter(&mut *self, &[variable]);
                let body = scope.visit(cx, handler.body);
                let filter = scope.visit_opt(cx, handler.filter);
                combine4(declaration, test, body, filter)
            }
            None => {
                let body = self.visit(cx, handler.body);
                combine4(0, test, body, self.visit_opt(cx, handler.filter))
            }
        }
    }

    fn member_bindings(&mut self, cx: &HashCx<'_>, range: BindingRange) -> i32 {
        cx.arena.bindings(range).iter().fold(0, |acc, binding| {
            let hash = match binding {
                MemberBinding::Assignment { member, expr } => {
                    let member = self.members.visit(cx, *member);
                    combine3(binding.tag(), member, self.visit(cx, *expr))
                }
                MemberBinding::Member { member, bindings } => {
                    let member = self.members.visit(cx, *member);
                    let nested = ensure_sufficient_stack(|| self.member_bindings(cx, *bindings));
                    combine3(binding.tag(), member, nested)
                }
                MemberBinding::List {
                    member,
                    initializers,
                } => {
                    let member = self.members.visit(cx, *member);
                    combine3(binding.tag(), member, self.element_inits(cx, *initializers))
                }
            };
            combine(acc, hash)
        })
    }

    fn element_inits(&mut self, cx: &HashCx<'_>, range: ElementInitRange) -> i32 {
        cx.arena.element_inits(range).iter().fold(0, |acc, init| {
            let add_method = self.members.visit(cx, init.add_method);
            combine(acc, combine(add_method, self.visit_list(cx, init.args)))
        })
    }

    fn label(&mut self, cx: &HashCx<'_>, id: LabelId) -> i32 {
        let label = cx.arena.label(id);
        let ty = self.ty_opt(cx, label.ty);
        combine3(LABEL_TARGET_TAG, ty, cx.opt_str(label.name.as_deref()))
    }

    #[inline]
    fn label_opt(&mut self, cx: &HashCx<'_>, id: Option<LabelId>) -> i32 {
        id.map_or(0, |id| self.label(cx, id))
    }

    /// Hash a type reference with this visitor's type cache.
    pub(crate) fn hash_type(&mut self, cx: &HashCx<'_>, id: TypeId) -> i32 {
        self.ty(cx, id)
    }

    /// Hash a member reference with this visitor's member cache.
    pub(crate) fn hash_member(&mut self, cx: &HashCx<'_>, id: MemberId) -> i32 {
        self.members.visit(cx, id)
    }

    /// Hit/miss counters of the expression cache.
    #[cfg(test)]
    pub(crate) fn memo_stats(&self) -> arbor_memo::CacheStats {
        self.memo.stats()
    }

    /// Hit/miss counters of the member and type caches.
    #[cfg(test)]
    pub(crate) fn member_stats(&self) -> arbor_memo::CacheStats {
        self.members.stats()
    }
}

impl Binds for ExprHasher {
    type Symbol = ExprId;

    fn bindings(&mut self) -> &mut BindingStack<ExprId> {
        &mut self.scopes
    }
}

impl Clear for ExprHasher {
    fn clear(&mut self) {
        self.members.clear();
        self.scopes.clear();
        self.memo.clear();
    }
}

//! Arena storage for expression trees.
//!
//! [`TreeArena`] owns every node, type, member and label of one tree (or of
//! several trees sharing storage) in flat tables indexed by handle. Lists
//! (arguments, parameters, generic arguments, ...) are contiguous runs in
//! per-kind list tables, addressed by range newtypes.
//!
//! Trees are immutable once built: consumers only ever read through `&self`.

use crate::constant::ConstValue;
use crate::expr::{CatchBlock, ElementInit, ExprKind, LabelTarget, MemberBinding, SwitchCase};
use crate::ids::{
    to_u32, BindingRange, CatchRange, ElementInitRange, ExprId, ExprRange, LabelId, MemberId,
    MemberRange, PropertyRange, SwitchCaseRange, TypeId, TypeRange,
};
use crate::members::MemberSlim;
use crate::node_type::{BinaryOp, UnaryOp};
use crate::types::{AssemblyRef, StructuralKind, StructuralProperty, TypeSlim};

/// Flat storage for expression trees and the types and members they mention.
///
/// # Index Spaces
///
/// - `exprs` / `types` / `members` / `labels`: indexed by the matching id
/// - `expr_lists`, `type_lists`, `member_lists`: flattened id lists
/// - `bindings`, `element_inits`, `switch_cases`, `catch_blocks`,
///   `properties`: flattened composite lists
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeArena {
    exprs: Vec<ExprKind>,
    types: Vec<TypeSlim>,
    members: Vec<MemberSlim>,
    labels: Vec<LabelTarget>,
    expr_lists: Vec<ExprId>,
    type_lists: Vec<TypeId>,
    member_lists: Vec<MemberId>,
    bindings: Vec<MemberBinding>,
    element_inits: Vec<ElementInit>,
    switch_cases: Vec<SwitchCase>,
    catch_blocks: Vec<CatchBlock>,
    properties: Vec<StructuralProperty>,
}

/// Append `items` to `table`, returning `(start, len)` of the new run.
fn push_run<T: Clone>(table: &mut Vec<T>, items: &[T], what: &str) -> (u32, u32) {
    let start = to_u32(table.len(), what);
    table.extend_from_slice(items);
    (start, to_u32(items.len(), what))
}

impl TreeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of expression nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    // Allocation

    pub fn push_expr(&mut self, kind: ExprKind) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expressions"));
        self.exprs.push(kind);
        id
    }

    pub fn push_type(&mut self, ty: TypeSlim) -> TypeId {
        let id = TypeId::new(to_u32(self.types.len(), "types"));
        self.types.push(ty);
        id
    }

    pub fn push_member(&mut self, member: MemberSlim) -> MemberId {
        let id = MemberId::new(to_u32(self.members.len(), "members"));
        self.members.push(member);
        id
    }

    pub fn push_label(&mut self, label: LabelTarget) -> LabelId {
        let id = LabelId::new(to_u32(self.labels.len(), "labels"));
        self.labels.push(label);
        id
    }

    pub fn push_expr_list(&mut self, ids: &[ExprId]) -> ExprRange {
        let (start, len) = push_run(&mut self.expr_lists, ids, "expression list entries");
        ExprRange::new(start, len)
    }

    pub fn push_type_list(&mut self, ids: &[TypeId]) -> TypeRange {
        let (start, len) = push_run(&mut self.type_lists, ids, "type list entries");
        TypeRange::new(start, len)
    }

    pub fn push_member_list(&mut self, ids: &[MemberId]) -> MemberRange {
        let (start, len) = push_run(&mut self.member_lists, ids, "member list entries");
        MemberRange::new(start, len)
    }

    /// Nested bindings must be pushed before the binding that contains them.
    pub fn push_bindings(&mut self, bindings: &[MemberBinding]) -> BindingRange {
        let (start, len) = push_run(&mut self.bindings, bindings, "member bindings");
        BindingRange::new(start, len)
    }

    pub fn push_element_inits(&mut self, inits: &[ElementInit]) -> ElementInitRange {
        let (start, len) = push_run(&mut self.element_inits, inits, "element initializers");
        ElementInitRange::new(start, len)
    }

    pub fn push_switch_cases(&mut self, cases: &[SwitchCase]) -> SwitchCaseRange {
        let (start, len) = push_run(&mut self.switch_cases, cases, "switch cases");
        SwitchCaseRange::new(start, len)
    }

    pub fn push_catch_blocks(&mut self, handlers: &[CatchBlock]) -> CatchRange {
        let (start, len) = push_run(&mut self.catch_blocks, handlers, "catch blocks");
        CatchRange::new(start, len)
    }

    pub fn push_properties(&mut self, properties: &[StructuralProperty]) -> PropertyRange {
        let (start, len) = push_run(&mut self.properties, properties, "structural properties");
        PropertyRange::new(start, len)
    }

    // Access

    /// # Panics
    ///
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn expr(&self, id: ExprId) -> &ExprKind {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn ty(&self, id: TypeId) -> &TypeSlim {
        &self.types[id.index()]
    }

    #[inline]
    pub fn member(&self, id: MemberId) -> &MemberSlim {
        &self.members[id.index()]
    }

    #[inline]
    pub fn label(&self, id: LabelId) -> &LabelTarget {
        &self.labels[id.index()]
    }

    #[inline]
    pub fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.bounds()]
    }

    #[inline]
    pub fn type_list(&self, range: TypeRange) -> &[TypeId] {
        &self.type_lists[range.bounds()]
    }

    #[inline]
    pub fn member_list(&self, range: MemberRange) -> &[MemberId] {
        &self.member_lists[range.bounds()]
    }

    #[inline]
    pub fn bindings(&self, range: BindingRange) -> &[MemberBinding] {
        &self.bindings[range.bounds()]
    }

    #[inline]
    pub fn element_inits(&self, range: ElementInitRange) -> &[ElementInit] {
        &self.element_inits[range.bounds()]
    }

    #[inline]
    pub fn switch_cases(&self, range: SwitchCaseRange) -> &[SwitchCase] {
        &self.switch_cases[range.bounds()]
    }

    #[inline]
    pub fn catch_blocks(&self, range: CatchRange) -> &[CatchBlock] {
        &self.catch_blocks[range.bounds()]
    }

    #[inline]
    pub fn properties(&self, range: PropertyRange) -> &[StructuralProperty] {
        &self.properties[range.bounds()]
    }

    // Builders for the common shapes

    pub fn simple_type(&mut self, name: &str, assembly: Option<&str>) -> TypeId {
        self.push_type(TypeSlim::Simple {
            name: name.into(),
            assembly: assembly.map(AssemblyRef::new),
        })
    }

    pub fn generic_definition(&mut self, name: &str, assembly: Option<&str>) -> TypeId {
        self.push_type(TypeSlim::GenericDefinition {
            name: name.into(),
            assembly: assembly.map(AssemblyRef::new),
        })
    }

    pub fn generic_type(&mut self, definition: TypeId, arguments: &[TypeId]) -> TypeId {
        let arguments = self.push_type_list(arguments);
        self.push_type(TypeSlim::Generic {
            definition,
            arguments,
        })
    }

    pub fn generic_parameter(&mut self, name: &str) -> TypeId {
        self.push_type(TypeSlim::GenericParameter { name: name.into() })
    }

    pub fn array_type(&mut self, element: TypeId, rank: Option<u32>) -> TypeId {
        self.push_type(TypeSlim::Array { element, rank })
    }

    /// Structural type from `(name, type)` pairs without index parameters.
    pub fn structural_type(&mut self, kind: StructuralKind, properties: &[(&str, TypeId)]) -> TypeId {
        let properties: Vec<StructuralProperty> = properties
            .iter()
            .map(|&(name, ty)| StructuralProperty {
                name: name.into(),
                ty,
                index_params: TypeRange::EMPTY,
            })
            .collect();
        let properties = self.push_properties(&properties);
        self.push_type(TypeSlim::Structural { kind, properties })
    }

    pub fn simple_method(
        &mut self,
        declaring: TypeId,
        name: &str,
        params: &[TypeId],
        return_type: TypeId,
    ) -> MemberId {
        let params = self.push_type_list(params);
        self.push_member(MemberSlim::SimpleMethod {
            declaring,
            name: name.into(),
            params,
            return_type,
        })
    }

    pub fn parameter(&mut self, name: &str, ty: TypeId) -> ExprId {
        self.push_expr(ExprKind::Parameter {
            name: Some(name.into()),
            ty,
        })
    }

    pub fn constant(&mut self, value: ConstValue, ty: TypeId) -> ExprId {
        self.push_expr(ExprKind::Constant { value, ty })
    }

    pub fn default_value(&mut self, ty: TypeId) -> ExprId {
        self.push_expr(ExprKind::Default { ty })
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.push_expr(ExprKind::Binary {
            op,
            left,
            right,
            lifted_to_null: false,
            method: None,
            conversion: None,
        })
    }

    pub fn unary(&mut self, op: UnaryOp, operand: ExprId, ty: Option<TypeId>) -> ExprId {
        self.push_expr(ExprKind::Unary {
            op,
            operand: Some(operand),
            ty,
            method: None,
        })
    }

    pub fn lambda(&mut self, params: &[ExprId], body: ExprId, delegate_type: Option<TypeId>) -> ExprId {
        let params = self.push_expr_list(params);
        self.push_expr(ExprKind::Lambda {
            delegate_type,
            params,
            body,
        })
    }

    pub fn call(&mut self, object: Option<ExprId>, method: MemberId, args: &[ExprId]) -> ExprId {
        let args = self.push_expr_list(args);
        self.push_expr(ExprKind::MethodCall {
            object,
            method,
            args,
        })
    }

    pub fn invoke(&mut self, target: ExprId, args: &[ExprId]) -> ExprId {
        let args = self.push_expr_list(args);
        self.push_expr(ExprKind::Invocation { target, args })
    }

    pub fn block(&mut self, variables: &[ExprId], exprs: &[ExprId], ty: Option<TypeId>) -> ExprId {
        let variables = self.push_expr_list(variables);
        let exprs = self.push_expr_list(exprs);
        self.push_expr(ExprKind::Block {
            variables,
            exprs,
            ty,
        })
    }

    pub fn conditional(&mut self, test: ExprId, if_true: ExprId, if_false: ExprId) -> ExprId {
        self.push_expr(ExprKind::Conditional {
            test,
            if_true,
            if_false,
            ty: None,
        })
    }
}

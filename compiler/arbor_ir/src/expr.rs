//! Expression node kinds.
//!
//! Children are referenced by handle. A `Parameter` node is both the binding
//! site (listed by a `Lambda`, `Block` or `CatchBlock`) and every reference
//! to it: references reuse the same [`ExprId`].

use crate::constant::ConstValue;
use crate::ids::{
    BindingRange, CatchRange, ElementInitRange, ExprId, ExprRange, LabelId, MemberId, MemberRange,
    SwitchCaseRange, TypeId,
};
use crate::node_type::{BinaryOp, GotoKind, NodeType, TypeBinaryOp, UnaryOp};

/// An expression node.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    Constant {
        value: ConstValue,
        ty: TypeId,
    },
    Default {
        ty: TypeId,
    },
    Parameter {
        name: Option<Box<str>>,
        ty: TypeId,
    },
    Lambda {
        delegate_type: Option<TypeId>,
        params: ExprRange,
        body: ExprId,
    },
    Invocation {
        target: ExprId,
        args: ExprRange,
    },
    MethodCall {
        object: Option<ExprId>,
        method: MemberId,
        args: ExprRange,
    },
    New {
        ty: Option<TypeId>,
        constructor: Option<MemberId>,
        args: ExprRange,
        members: MemberRange,
    },
    NewArrayInit {
        element_type: TypeId,
        exprs: ExprRange,
    },
    NewArrayBounds {
        element_type: TypeId,
        bounds: ExprRange,
    },
    MemberAccess {
        object: Option<ExprId>,
        member: MemberId,
    },
    MemberInit {
        new_expr: ExprId,
        bindings: BindingRange,
    },
    ListInit {
        new_expr: ExprId,
        initializers: ElementInitRange,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
        lifted_to_null: bool,
        method: Option<MemberId>,
        conversion: Option<ExprId>,
    },
    Unary {
        op: UnaryOp,
        /// `None` only for a rethrowing `Throw`.
        operand: Option<ExprId>,
        ty: Option<TypeId>,
        method: Option<MemberId>,
    },
    TypeBinary {
        op: TypeBinaryOp,
        expr: ExprId,
        type_operand: TypeId,
    },
    Conditional {
        test: ExprId,
        if_true: ExprId,
        if_false: ExprId,
        ty: Option<TypeId>,
    },
    Block {
        variables: ExprRange,
        exprs: ExprRange,
        ty: Option<TypeId>,
    },
    Loop {
        body: ExprId,
        break_label: Option<LabelId>,
        continue_label: Option<LabelId>,
    },
    Goto {
        kind: GotoKind,
        target: LabelId,
        value: Option<ExprId>,
        ty: Option<TypeId>,
    },
    Label {
        target: LabelId,
        default_value: Option<ExprId>,
    },
    Switch {
        ty: Option<TypeId>,
        switch_value: ExprId,
        cases: SwitchCaseRange,
        default_body: Option<ExprId>,
        comparison: Option<MemberId>,
    },
    Try {
        ty: Option<TypeId>,
        body: ExprId,
        handlers: CatchRange,
        finally: Option<ExprId>,
        fault: Option<ExprId>,
    },
    Index {
        object: ExprId,
        indexer: Option<MemberId>,
        args: ExprRange,
    },
}

impl ExprKind {
    /// Node-type discriminant of this node.
    pub fn node_type(&self) -> NodeType {
        match self {
            ExprKind::Constant { .. } => NodeType::Constant,
            ExprKind::Default { .. } => NodeType::Default,
            ExprKind::Parameter { .. } => NodeType::Parameter,
            ExprKind::Lambda { .. } => NodeType::Lambda,
            ExprKind::Invocation { .. } => NodeType::Invoke,
            ExprKind::MethodCall { .. } => NodeType::Call,
            ExprKind::New { .. } => NodeType::New,
            ExprKind::NewArrayInit { .. } => NodeType::NewArrayInit,
            ExprKind::NewArrayBounds { .. } => NodeType::NewArrayBounds,
            ExprKind::MemberAccess { .. } => NodeType::MemberAccess,
            ExprKind::MemberInit { .. } => NodeType::MemberInit,
            ExprKind::ListInit { .. } => NodeType::ListInit,
            ExprKind::Binary { op, .. } => op.node_type(),
            ExprKind::Unary { op, .. } => op.node_type(),
            ExprKind::TypeBinary { op, .. } => op.node_type(),
            ExprKind::Conditional { .. } => NodeType::Conditional,
            ExprKind::Block { .. } => NodeType::Block,
            ExprKind::Loop { .. } => NodeType::Loop,
            ExprKind::Goto { .. } => NodeType::Goto,
            ExprKind::Label { .. } => NodeType::Label,
            ExprKind::Switch { .. } => NodeType::Switch,
            ExprKind::Try { .. } => NodeType::Try,
            ExprKind::Index { .. } => NodeType::Index,
        }
    }
}

/// Jump destination shared by `Goto`, `Label` and `Loop` nodes.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelTarget {
    pub name: Option<Box<str>>,
    pub ty: Option<TypeId>,
}

/// Binding of a `MemberInit`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberBinding {
    /// `member = expr`
    Assignment { member: MemberId, expr: ExprId },
    /// `member = { nested bindings }`
    Member {
        member: MemberId,
        bindings: BindingRange,
    },
    /// `member = { element initializers }`
    List {
        member: MemberId,
        initializers: ElementInitRange,
    },
}

impl MemberBinding {
    /// Binding flavor tag contributed to hash codes.
    pub fn tag(&self) -> i32 {
        match self {
            MemberBinding::Assignment { .. } => 0,
            MemberBinding::Member { .. } => 1,
            MemberBinding::List { .. } => 2,
        }
    }
}

/// One `Add(...)` call of a collection initializer.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementInit {
    pub add_method: MemberId,
    pub args: ExprRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchCase {
    pub test_values: ExprRange,
    pub body: ExprId,
}

/// Catch handler of a `Try`. `variable`, when present, is a `Parameter`
/// node bound while the filter and body are evaluated.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatchBlock {
    pub test: TypeId,
    pub variable: Option<ExprId>,
    pub body: ExprId,
    pub filter: Option<ExprId>,
}

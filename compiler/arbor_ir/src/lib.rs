//! Arbor IR - portable expression trees
//!
//! This crate contains the data model consumed by the hashing engine:
//! - Expression nodes (`ExprKind`) with a closed set of node kinds
//! - Slim type references (`TypeSlim`) and member references (`MemberSlim`)
//! - Node-type tags (`NodeType`) and operator subsets
//! - Arena storage (`TreeArena`) with typed handles and list ranges
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: no `Box<Expr>`; children are `ExprId` handles
//! - **Identity is the handle**: a bound variable is the same `ExprId` at its
//!   binding site and at every reference
//! - **Names, not runtime handles**: types and members are described by
//!   name and assembly so trees can cross process boundaries
//!
//! Types that contain floats store them as `u64` bits for `Hash` compatibility.

mod arena;
mod constant;
mod expr;
mod ids;
mod members;
mod node_type;
mod types;

pub use arena::TreeArena;
pub use constant::ConstValue;
pub use expr::{CatchBlock, ElementInit, ExprKind, LabelTarget, MemberBinding, SwitchCase};
pub use ids::{
    BindingRange, CatchRange, ElementInitRange, ExprId, ExprRange, LabelId, MemberId, MemberRange,
    PropertyRange, SwitchCaseRange, TypeId, TypeRange,
};
pub use members::{MemberSlim, MemberSlimKind, MethodKind};
pub use node_type::{BinaryOp, GotoKind, NodeType, TypeBinaryOp, UnaryOp};
pub use types::{AssemblyRef, StructuralKind, StructuralProperty, TypeSlim, TypeSlimKind};

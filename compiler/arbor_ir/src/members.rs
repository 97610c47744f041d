//! Slim member references (fields, properties, constructors, methods).

use crate::ids::{MemberId, TypeId, TypeRange};

/// Member discriminant; the numeric value is the hash tag.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum MemberSlimKind {
    Field = 0,
    Property = 1,
    Constructor = 2,
    Method = 3,
}

/// Method flavor; the numeric value is a secondary hash tag for methods.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum MethodKind {
    Simple = 0,
    GenericDefinition = 1,
    Generic = 2,
}

/// A slim member reference.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberSlim {
    Field {
        declaring: TypeId,
        name: Box<str>,
        field_type: TypeId,
    },
    Property {
        declaring: TypeId,
        name: Box<str>,
        property_type: TypeId,
        index_params: TypeRange,
    },
    /// Constructors are unnamed.
    Constructor { declaring: TypeId, params: TypeRange },
    SimpleMethod {
        declaring: TypeId,
        name: Box<str>,
        params: TypeRange,
        return_type: TypeId,
    },
    /// Open generic method. `generic_params` are `GenericParameter` types
    /// that parameter and return types may mention.
    GenericDefinitionMethod {
        declaring: TypeId,
        name: Box<str>,
        generic_params: TypeRange,
        params: TypeRange,
        return_type: TypeId,
    },
    /// Closed generic method: a `GenericDefinitionMethod` applied to arguments.
    GenericMethod {
        definition: MemberId,
        arguments: TypeRange,
    },
}

impl MemberSlim {
    pub fn kind(&self) -> MemberSlimKind {
        match self {
            MemberSlim::Field { .. } => MemberSlimKind::Field,
            MemberSlim::Property { .. } => MemberSlimKind::Property,
            MemberSlim::Constructor { .. } => MemberSlimKind::Constructor,
            MemberSlim::SimpleMethod { .. }
            | MemberSlim::GenericDefinitionMethod { .. }
            | MemberSlim::GenericMethod { .. } => MemberSlimKind::Method,
        }
    }

    /// Method flavor, or `None` for non-methods.
    pub fn method_kind(&self) -> Option<MethodKind> {
        match self {
            MemberSlim::SimpleMethod { .. } => Some(MethodKind::Simple),
            MemberSlim::GenericDefinitionMethod { .. } => Some(MethodKind::GenericDefinition),
            MemberSlim::GenericMethod { .. } => Some(MethodKind::Generic),
            _ => None,
        }
    }
}

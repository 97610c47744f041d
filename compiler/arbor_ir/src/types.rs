//! Slim type references.
//!
//! A slim type is a name-based description of a type that can travel between
//! processes: no runtime type handles, only names, assemblies and structure.

use crate::ids::{PropertyRange, TypeId, TypeRange};

/// Reference to the assembly (package) that defines a type.
///
/// The full name may carry version, culture and key suffixes after the first
/// comma, e.g. `"Lib, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null"`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssemblyRef {
    full_name: Box<str>,
}

impl AssemblyRef {
    pub fn new(full_name: impl Into<Box<str>>) -> Self {
        Self {
            full_name: full_name.into(),
        }
    }

    #[inline]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The name up to the first comma, trimmed.
    pub fn simple_name(&self) -> &str {
        match self.full_name.split_once(',') {
            Some((simple, _)) => simple.trim(),
            None => self.full_name.trim(),
        }
    }
}

/// Kind discriminant of a [`TypeSlim`]; the numeric value is its hash tag.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum TypeSlimKind {
    Simple = 0,
    Array = 1,
    Structural = 2,
    GenericDefinition = 3,
    Generic = 4,
    GenericParameter = 5,
}

impl TypeSlimKind {
    #[inline]
    pub const fn tag(self) -> i32 {
        self as i32
    }
}

/// Flavor of a structural (record-shaped) type.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum StructuralKind {
    Default = 0,
    Anonymous = 1,
    Record = 2,
}

/// One property of a structural type, in declaration order.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructuralProperty {
    pub name: Box<str>,
    pub ty: TypeId,
    pub index_params: TypeRange,
}

/// A slim type reference.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeSlim {
    /// Closed, non-generic named type.
    Simple {
        name: Box<str>,
        assembly: Option<AssemblyRef>,
    },
    /// Open generic type definition such as `List`1`.
    GenericDefinition {
        name: Box<str>,
        assembly: Option<AssemblyRef>,
    },
    /// Constructed generic type: definition applied to arguments.
    Generic {
        definition: TypeId,
        arguments: TypeRange,
    },
    /// Type parameter of an enclosing generic construct.
    ///
    /// Inside a generic method definition it is resolved by position, never
    /// by name.
    GenericParameter { name: Box<str> },
    /// Array of `element`; `rank == None` is a single-dimensional vector.
    Array { element: TypeId, rank: Option<u32> },
    /// Record-shaped type described by its ordered properties.
    Structural {
        kind: StructuralKind,
        properties: PropertyRange,
    },
}

impl TypeSlim {
    pub fn kind(&self) -> TypeSlimKind {
        match self {
            TypeSlim::Simple { .. } => TypeSlimKind::Simple,
            TypeSlim::GenericDefinition { .. } => TypeSlimKind::GenericDefinition,
            TypeSlim::Generic { .. } => TypeSlimKind::Generic,
            TypeSlim::GenericParameter { .. } => TypeSlimKind::GenericParameter,
            TypeSlim::Array { .. } => TypeSlimKind::Array,
            TypeSlim::Structural { .. } => TypeSlimKind::Structural,
        }
    }
}

//! Index and range newtypes for [`TreeArena`](crate::TreeArena) storage.
//!
//! Every handle is a `u32` index into one of the arena's side tables. Handles
//! are arena-local: the same raw value means nothing in a different arena.
//! Node identity (for binding resolution and memoization) is handle identity.

use std::fmt;

/// Define a `u32` handle into one arena table.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a handle from a raw index.
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            /// Index into the owning table.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Raw `u32` value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

/// Define a contiguous `start..start + len` range into one arena list table.
macro_rules! define_range {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            pub start: u32,
            pub len: u32,
        }

        impl $name {
            /// Empty range.
            pub const EMPTY: Self = Self { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u32) -> Self {
                Self { start, len }
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }

            /// Slice bounds into the owning list table.
            #[inline]
            pub const fn bounds(&self) -> std::ops::Range<usize> {
                let start = self.start as usize;
                start..start + self.len as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    concat!(stringify!($name), "({}..{})"),
                    self.start,
                    self.start + self.len
                )
            }
        }
    };
}

define_id!(
    /// Handle of an expression node.
    ExprId
);
define_id!(
    /// Handle of a slim type reference.
    TypeId
);
define_id!(
    /// Handle of a slim member reference.
    MemberId
);
define_id!(
    /// Handle of a label target (jump destination of `Goto`/`Label`/`Loop`).
    LabelId
);

define_range!(
    /// Expression list: call arguments, block statements, lambda parameters, ...
    ExprRange
);
define_range!(
    /// Type list: generic arguments, parameter types, index parameter types.
    TypeRange
);
define_range!(
    /// Member list (the `members` of a `New` expression).
    MemberRange
);
define_range!(
    /// Member bindings of a `MemberInit` or nested member binding.
    BindingRange
);
define_range!(
    /// Element initializers of a `ListInit` or list binding.
    ElementInitRange
);
define_range!(
    /// Cases of a `Switch`.
    SwitchCaseRange
);
define_range!(
    /// Catch handlers of a `Try`.
    CatchRange
);
define_range!(
    /// Properties of a structural type.
    PropertyRange
);

/// Convert a table length into a `u32` handle value.
///
/// # Panics
///
/// Panics if the table has grown beyond `u32::MAX` entries.
#[inline]
pub(crate) fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("arena overflow: too many {what}"))
}

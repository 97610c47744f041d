//! Node-type discriminants.
//!
//! [`NodeType`] follows the conventional expression-type numbering so that
//! hash codes computed here line up with trees produced by other runtimes
//! that use the same numbering. [`BinaryOp`] and [`UnaryOp`] are the subsets
//! valid for `Binary` and `Unary` nodes.

/// Expression node discriminant. The numeric value is the hash tag.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum NodeType {
    Add = 0,
    AddChecked = 1,
    And = 2,
    AndAlso = 3,
    ArrayLength = 4,
    ArrayIndex = 5,
    Call = 6,
    Coalesce = 7,
    Conditional = 8,
    Constant = 9,
    Convert = 10,
    ConvertChecked = 11,
    Divide = 12,
    Equal = 13,
    ExclusiveOr = 14,
    GreaterThan = 15,
    GreaterThanOrEqual = 16,
    Invoke = 17,
    Lambda = 18,
    LeftShift = 19,
    LessThan = 20,
    LessThanOrEqual = 21,
    ListInit = 22,
    MemberAccess = 23,
    MemberInit = 24,
    Modulo = 25,
    Multiply = 26,
    MultiplyChecked = 27,
    Negate = 28,
    UnaryPlus = 29,
    NegateChecked = 30,
    New = 31,
    NewArrayInit = 32,
    NewArrayBounds = 33,
    Not = 34,
    NotEqual = 35,
    Or = 36,
    OrElse = 37,
    Parameter = 38,
    Power = 39,
    Quote = 40,
    RightShift = 41,
    Subtract = 42,
    SubtractChecked = 43,
    TypeAs = 44,
    TypeIs = 45,
    Assign = 46,
    Block = 47,
    Decrement = 49,
    Default = 51,
    Goto = 53,
    Increment = 54,
    Index = 55,
    Label = 56,
    Loop = 58,
    Switch = 59,
    Throw = 60,
    Try = 61,
    Unbox = 62,
    AddAssign = 63,
    AndAssign = 64,
    DivideAssign = 65,
    ExclusiveOrAssign = 66,
    LeftShiftAssign = 67,
    ModuloAssign = 68,
    MultiplyAssign = 69,
    OrAssign = 70,
    PowerAssign = 71,
    RightShiftAssign = 72,
    SubtractAssign = 73,
    AddAssignChecked = 74,
    MultiplyAssignChecked = 75,
    SubtractAssignChecked = 76,
    PreIncrementAssign = 77,
    PreDecrementAssign = 78,
    PostIncrementAssign = 79,
    PostDecrementAssign = 80,
    TypeEqual = 81,
    OnesComplement = 82,
    IsTrue = 83,
    IsFalse = 84,
}

impl NodeType {
    /// Tag contributed to hash codes.
    #[inline]
    pub const fn tag(self) -> i32 {
        self as i32
    }
}

/// Define an operator subset of [`NodeType`] with a lossless mapping back.
macro_rules! define_ops {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            /// Every operator in this subset.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// The node type this operator produces.
            #[inline]
            pub const fn node_type(self) -> NodeType {
                match self {
                    $($name::$variant => NodeType::$variant),*
                }
            }
        }

        impl From<$name> for NodeType {
            fn from(op: $name) -> NodeType {
                op.node_type()
            }
        }
    };
}

define_ops!(
    /// Operators of `Binary` nodes, including compound assignments.
    BinaryOp {
        Add,
        AddChecked,
        And,
        AndAlso,
        ArrayIndex,
        Coalesce,
        Divide,
        Equal,
        ExclusiveOr,
        GreaterThan,
        GreaterThanOrEqual,
        LeftShift,
        LessThan,
        LessThanOrEqual,
        Modulo,
        Multiply,
        MultiplyChecked,
        NotEqual,
        Or,
        OrElse,
        Power,
        RightShift,
        Subtract,
        SubtractChecked,
        Assign,
        AddAssign,
        AndAssign,
        DivideAssign,
        ExclusiveOrAssign,
        LeftShiftAssign,
        ModuloAssign,
        MultiplyAssign,
        OrAssign,
        PowerAssign,
        RightShiftAssign,
        SubtractAssign,
        AddAssignChecked,
        MultiplyAssignChecked,
        SubtractAssignChecked,
    }
);

define_ops!(
    /// Operators of `Unary` nodes.
    UnaryOp {
        ArrayLength,
        Convert,
        ConvertChecked,
        Negate,
        NegateChecked,
        Not,
        Quote,
        TypeAs,
        UnaryPlus,
        Decrement,
        Increment,
        Throw,
        Unbox,
        PreIncrementAssign,
        PreDecrementAssign,
        PostIncrementAssign,
        PostDecrementAssign,
        OnesComplement,
        IsTrue,
        IsFalse,
    }
);

define_ops!(
    /// Operators of `TypeBinary` nodes.
    TypeBinaryOp { TypeIs, TypeEqual }
);

/// Flavor of a `Goto` node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GotoKind {
    Goto = 0,
    Return = 1,
    Break = 2,
    Continue = 3,
}

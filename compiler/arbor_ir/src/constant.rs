//! Constant leaf values.

use std::fmt;

/// Value carried by a `Constant` node.
///
/// Floats are stored as their IEEE bit pattern so the value is `Eq + Hash`.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(u64),
    Char(char),
    Str(Box<str>),
}

impl ConstValue {
    /// Wrap a float as its bit pattern.
    #[inline]
    pub fn float(value: f64) -> Self {
        ConstValue::Float(value.to_bits())
    }

    /// Wrap a string.
    pub fn str(value: impl Into<Box<str>>) -> Self {
        ConstValue::Str(value.into())
    }

    /// Float value, if this is a float constant.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ConstValue::Float(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }
}

impl fmt::Debug for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Null => write!(f, "null"),
            ConstValue::Bool(b) => write!(f, "{b}"),
            ConstValue::Int(v) => write!(f, "{v}"),
            ConstValue::UInt(v) => write!(f, "{v}u"),
            ConstValue::Float(bits) => write!(f, "{:?}", f64::from_bits(*bits)),
            ConstValue::Char(c) => write!(f, "{c:?}"),
            ConstValue::Str(s) => write!(f, "{s:?}"),
        }
    }
}

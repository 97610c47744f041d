//! In-memory JSON trees.

use std::fmt::{self, Write as _};

/// A JSON value.
///
/// Numbers keep their source text so integers, floats and their exact
/// spelling survive a round trip. Object members keep document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JsonExpr {
    Null,
    Bool(bool),
    Number(Box<str>),
    String(Box<str>),
    Array(Vec<JsonExpr>),
    Object(Vec<(Box<str>, JsonExpr)>),
}

impl JsonExpr {
    pub fn number(text: impl Into<Box<str>>) -> Self {
        JsonExpr::Number(text.into())
    }

    pub fn string(text: impl Into<Box<str>>) -> Self {
        JsonExpr::String(text.into())
    }

    /// Member value of an object by name.
    pub fn get(&self, name: &str) -> Option<&JsonExpr> {
        match self {
            JsonExpr::Object(members) => members
                .iter()
                .find(|(key, _)| &**key == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self, JsonExpr::Array(_) | JsonExpr::Object(_))
    }
}

/// Write `text` as a quoted JSON string.
pub(crate) fn write_escaped(out: &mut impl fmt::Write, text: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '\u{8}' => out.write_str("\\b")?,
            '\u{c}' => out.write_str("\\f")?,
            c if u32::from(c) < 0x20 => write!(out, "\\u{:04x}", u32::from(c))?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

/// Compact JSON text.
impl fmt::Display for JsonExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonExpr::Null => f.write_str("null"),
            JsonExpr::Bool(b) => write!(f, "{b}"),
            JsonExpr::Number(text) => f.write_str(text),
            JsonExpr::String(text) => write_escaped(f, text),
            JsonExpr::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    arbor_stack::ensure_sufficient_stack(|| fmt::Display::fmt(item, f))?;
                }
                f.write_char(']')
            }
            JsonExpr::Object(members) => {
                f.write_char('{')?;
                for (i, (name, value)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_escaped(f, name)?;
                    f.write_char(':')?;
                    arbor_stack::ensure_sufficient_stack(|| fmt::Display::fmt(value, f))?;
                }
                f.write_char('}')
            }
        }
    }
}

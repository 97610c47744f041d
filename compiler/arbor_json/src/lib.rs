//! Arbor JSON - serialized expression trees as JSON
//!
//! Two directions over one pooled [`TokenStack`]:
//!
//! - [`TreeWriter`] turns structural protocol calls into a [`JsonExpr`]
//! - [`TreeReader`] walks a [`JsonExpr`] back out as [`JsonEvent`]s
//!
//! [`copy_events`] pipes one into the other. [`parse`] and
//! [`parse_document`] build trees from text; `Display` on [`JsonExpr`]
//! prints compact JSON.
//!
//! Protocol misuse (unbalanced containers, dangling property names, reading
//! a result that is not exactly one value) fails immediately with a
//! [`JsonError`]; nothing is repaired.

mod error;
mod event;
mod format;
mod lexer;
mod parser;
mod reader;
mod settings;
mod stack;
mod value;
mod writer;

pub use error::{JsonError, ParseError, ParseErrorKind};
pub use event::{JsonEvent, JsonWrite};
pub use format::DateTimeKind;
pub use parser::{parse, parse_document};
pub use reader::{copy_events, TreeReader};
pub use settings::{DateTimeZoneHandling, FloatFormatHandling, WriterSettings};
pub use stack::{default_pool, StackToken, TokenPool, TokenStack};
pub use value::JsonExpr;
pub use writer::TreeWriter;

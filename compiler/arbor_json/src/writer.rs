//! Tokens to tree.
//!
//! [`TreeWriter`] builds a [`JsonExpr`] from protocol calls on a pooled
//! [`TokenStack`]. Opening a container pushes a marker; every scalar pushes a
//! finished leaf. Closing a container scans back to its marker, folds the
//! entries above it into one array or object and overwrites the marker in
//! place, so a finished container looks like any other value to its parent.

use arbor_pool::PooledObject;
use chrono::NaiveDateTime;
use rustc_hash::FxHashSet;

use crate::error::JsonError;
use crate::event::JsonWrite;
use crate::format::{float_tree, format_date_time, DateTimeKind};
use crate::settings::WriterSettings;
use crate::stack::{default_pool, StackToken, TokenPool, TokenStack};
use crate::value::JsonExpr;

/// Builds a [`JsonExpr`] from the structural token protocol.
///
/// The stack is leased from a [`TokenPool`] and returned on
/// [`close`](Self::close) or drop. Every call after `close` fails with
/// [`JsonError::Disposed`].
#[derive(Debug)]
pub struct TreeWriter<'p> {
    stack: Option<PooledObject<'p, TokenStack<StackToken>>>,
    settings: WriterSettings,
}

impl TreeWriter<'static> {
    /// Writer with default settings on the process-wide pool.
    pub fn new() -> Self {
        Self::with_settings(WriterSettings::default())
    }

    pub fn with_settings(settings: WriterSettings) -> Self {
        Self::with_pool(default_pool(), settings)
    }
}

impl Default for TreeWriter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

fn reject(err: JsonError) -> JsonError {
    tracing::debug!(%err, "tree writer rejected a call");
    err
}

/// Index of the innermost open container, which must be `marker`.
fn open_container(
    stack: &TokenStack<StackToken>,
    marker: &StackToken,
    expected: &'static str,
) -> Result<usize, JsonError> {
    for (index, token) in stack.as_slice().iter().enumerate().rev() {
        match token {
            StackToken::StartArray | StackToken::StartObject if token == marker => return Ok(index),
            StackToken::StartArray | StackToken::StartObject => break,
            _ => {}
        }
    }
    Err(reject(JsonError::MismatchedEnd { expected }))
}

/// Entries of an object must be unique `(name, value)` pairs.
fn check_members(entries: &[StackToken]) -> Result<(), JsonError> {
    let mut seen = FxHashSet::default();
    for pair in entries.chunks(2) {
        match pair {
            [StackToken::Name(name), StackToken::Tree(_)] => {
                if !seen.insert(&**name) {
                    return Err(reject(JsonError::DuplicateProperty { name: name.clone() }));
                }
            }
            [StackToken::Name(name)] | [StackToken::Name(name), _] => {
                return Err(reject(JsonError::DanglingPropertyName { name: name.clone() }));
            }
            _ => return Err(reject(JsonError::MissingPropertyName)),
        }
    }
    Ok(())
}

impl<'p> TreeWriter<'p> {
    pub fn with_pool(pool: &'p TokenPool, settings: WriterSettings) -> Self {
        Self {
            stack: Some(pool.get()),
            settings,
        }
    }

    #[inline]
    pub fn settings(&self) -> WriterSettings {
        self.settings
    }

    /// Entries currently on the stack.
    pub fn depth(&self) -> usize {
        self.stack.as_deref().map_or(0, TokenStack::len)
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.stack.is_none()
    }

    fn stack(&mut self) -> Result<&mut TokenStack<StackToken>, JsonError> {
        self.stack.as_deref_mut().ok_or(JsonError::Disposed)
    }

    fn push(&mut self, token: StackToken) -> Result<(), JsonError> {
        self.stack()?.push(token);
        Ok(())
    }

    /// Write a finished subtree as one value.
    pub fn write_tree(&mut self, tree: JsonExpr) -> Result<(), JsonError> {
        self.push(StackToken::Tree(tree))
    }

    /// Take the finished document.
    ///
    /// The stack must hold exactly one finished value; the writer is empty
    /// afterwards and can build another document.
    pub fn result(&mut self) -> Result<JsonExpr, JsonError> {
        let stack = self.stack()?;
        let items = stack.len();
        if items != 1 {
            return Err(reject(JsonError::ResultUnavailable { items }));
        }
        match stack.pop() {
            Some(StackToken::Tree(tree)) => Ok(tree),
            Some(other) => {
                let found = other.describe();
                stack.push(other);
                Err(reject(JsonError::UnexpectedToken {
                    expected: "a finished value",
                    found,
                }))
            }
            None => Err(reject(JsonError::ResultUnavailable { items: 0 })),
        }
    }

    /// Take the finished document and close the writer.
    pub fn into_result(mut self) -> Result<JsonExpr, JsonError> {
        let result = self.result();
        self.close();
        result
    }

    /// Return the stack to its pool. Idempotent.
    pub fn close(&mut self) {
        self.stack = None;
    }
}

impl JsonWrite for TreeWriter<'_> {
    fn write_start_object(&mut self) -> Result<(), JsonError> {
        self.push(StackToken::StartObject)
    }

    fn write_end_object(&mut self) -> Result<(), JsonError> {
        let stack = self.stack()?;
        let start = open_container(stack, &StackToken::StartObject, "object")?;
        check_members(&stack.as_slice()[start + 1..])?;

        let mut members = Vec::with_capacity((stack.len() - start - 1) / 2);
        let mut entries = stack.drain_above(start);
        while let (Some(StackToken::Name(name)), Some(StackToken::Tree(value))) =
            (entries.next(), entries.next())
        {
            members.push((name, value));
        }
        drop(entries);
        stack.set(start, StackToken::Tree(JsonExpr::Object(members)));
        Ok(())
    }

    fn write_start_array(&mut self) -> Result<(), JsonError> {
        self.push(StackToken::StartArray)
    }

    fn write_end_array(&mut self) -> Result<(), JsonError> {
        let stack = self.stack()?;
        let start = open_container(stack, &StackToken::StartArray, "array")?;
        if let Some(StackToken::Name(name)) = stack.as_slice()[start + 1..]
            .iter()
            .find(|token| !matches!(token, StackToken::Tree(_)))
        {
            return Err(reject(JsonError::DanglingPropertyName { name: name.clone() }));
        }

        let items: Vec<JsonExpr> = stack
            .drain_above(start)
            .filter_map(|token| match token {
                StackToken::Tree(tree) => Some(tree),
                _ => None,
            })
            .collect();
        stack.set(start, StackToken::Tree(JsonExpr::Array(items)));
        Ok(())
    }

    fn write_property_name(&mut self, name: &str) -> Result<(), JsonError> {
        let stack = self.stack()?;
        if let Some(StackToken::Name(previous)) = stack.last() {
            return Err(reject(JsonError::DanglingPropertyName {
                name: previous.clone(),
            }));
        }
        stack.push(StackToken::Name(name.into()));
        Ok(())
    }

    fn write_null(&mut self) -> Result<(), JsonError> {
        self.write_tree(JsonExpr::Null)
    }

    fn write_bool(&mut self, value: bool) -> Result<(), JsonError> {
        self.write_tree(JsonExpr::Bool(value))
    }

    fn write_i64(&mut self, value: i64) -> Result<(), JsonError> {
        self.write_tree(JsonExpr::number(value.to_string()))
    }

    fn write_u64(&mut self, value: u64) -> Result<(), JsonError> {
        self.write_tree(JsonExpr::number(value.to_string()))
    }

    fn write_f64(&mut self, value: f64) -> Result<(), JsonError> {
        let tree = float_tree(value, || value.to_string(), self.settings.float_format)
            .map_err(reject)?;
        self.write_tree(tree)
    }

    /// Uses the shortest `f32` spelling rather than the widened `f64` one.
    fn write_f32(&mut self, value: f32) -> Result<(), JsonError> {
        let tree = float_tree(f64::from(value), || value.to_string(), self.settings.float_format)
            .map_err(reject)?;
        self.write_tree(tree)
    }

    fn write_str(&mut self, value: &str) -> Result<(), JsonError> {
        self.write_tree(JsonExpr::string(value))
    }

    fn write_raw_number(&mut self, text: &str) -> Result<(), JsonError> {
        self.write_tree(JsonExpr::number(text))
    }

    fn write_date_time(&mut self, value: NaiveDateTime, kind: DateTimeKind) -> Result<(), JsonError> {
        let text = format_date_time(value, kind, self.settings.date_time_zone).map_err(reject)?;
        self.write_tree(JsonExpr::string(text))
    }
}

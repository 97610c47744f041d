//! Tree to tokens.
//!
//! [`TreeReader`] walks a [`JsonExpr`] as a stream of [`JsonEvent`]s. The
//! stack is seeded with the root; each [`read`](TreeReader::read) pops one
//! entry and, for a container, pushes its end marker and children back in
//! reverse so they pop in document order.

use arbor_pool::PooledObject;

use crate::error::JsonError;
use crate::event::{JsonEvent, JsonWrite};
use crate::stack::{default_pool, StackToken, TokenPool, TokenStack};
use crate::value::JsonExpr;

/// Pull reader over a finished tree.
#[derive(Debug)]
pub struct TreeReader<'p> {
    stack: Option<PooledObject<'p, TokenStack<StackToken>>>,
    current: Option<JsonEvent>,
}

impl TreeReader<'static> {
    /// Reader on the process-wide pool.
    pub fn new(root: JsonExpr) -> Self {
        Self::with_pool(default_pool(), root)
    }
}

impl<'p> TreeReader<'p> {
    pub fn with_pool(pool: &'p TokenPool, root: JsonExpr) -> Self {
        let mut stack = pool.get();
        stack.push(StackToken::Tree(root));
        Self {
            stack: Some(stack),
            current: None,
        }
    }

    /// The event produced by the last successful [`read`](Self::read).
    #[inline]
    pub fn current(&self) -> Option<&JsonEvent> {
        self.current.as_ref()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.stack.is_none()
    }

    /// Advance one event. Returns `false` once the tree is exhausted.
    pub fn read(&mut self) -> Result<bool, JsonError> {
        let stack = self.stack.as_deref_mut().ok_or(JsonError::Disposed)?;
        let Some(token) = stack.pop() else {
            self.current = None;
            return Ok(false);
        };

        let event = match token {
            StackToken::Tree(JsonExpr::Array(items)) => {
                let n = items.len();
                let slots = stack.push_slots(n + 1);
                slots[0] = StackToken::EndArray;
                for (i, item) in items.into_iter().enumerate() {
                    slots[n - i] = StackToken::Tree(item);
                }
                JsonEvent::StartArray
            }
            StackToken::Tree(JsonExpr::Object(members)) => {
                let n = members.len();
                let slots = stack.push_slots(2 * n + 1);
                slots[0] = StackToken::EndObject;
                for (i, (name, value)) in members.into_iter().enumerate() {
                    slots[2 * (n - i)] = StackToken::Name(name);
                    slots[2 * (n - i) - 1] = StackToken::Tree(value);
                }
                JsonEvent::StartObject
            }
            StackToken::Tree(JsonExpr::Null) => JsonEvent::Null,
            StackToken::Tree(JsonExpr::Bool(value)) => JsonEvent::Bool(value),
            StackToken::Tree(JsonExpr::Number(text)) => JsonEvent::Number(text),
            StackToken::Tree(JsonExpr::String(text)) => JsonEvent::String(text),
            StackToken::Name(name) => JsonEvent::PropertyName(name),
            StackToken::EndArray => JsonEvent::EndArray,
            StackToken::EndObject => JsonEvent::EndObject,
            other @ (StackToken::Vacant | StackToken::StartArray | StackToken::StartObject) => {
                self.current = None;
                return Err(JsonError::UnexpectedToken {
                    expected: "a tree entry",
                    found: other.describe(),
                });
            }
        };
        self.current = Some(event);
        Ok(true)
    }

    /// Advance and borrow the new event.
    pub fn next_event(&mut self) -> Result<Option<&JsonEvent>, JsonError> {
        self.read()?;
        Ok(self.current.as_ref())
    }

    /// Release the stack to its pool. Idempotent.
    pub fn close(&mut self) {
        self.stack = None;
        self.current = None;
    }

    /// Advance to the next scalar, `None` for `null` or the end of the tree.
    fn next_scalar(&mut self) -> Result<Option<&JsonEvent>, JsonError> {
        match self.next_event()? {
            None | Some(JsonEvent::Null) => Ok(None),
            Some(
                event @ (JsonEvent::StartObject
                | JsonEvent::EndObject
                | JsonEvent::StartArray
                | JsonEvent::EndArray
                | JsonEvent::PropertyName(_)),
            ) => Err(JsonError::UnexpectedToken {
                expected: "a scalar value",
                found: event.describe(),
            }),
            Some(event) => Ok(Some(event)),
        }
    }

    /// Read the next value as an `f64`. Numeric strings are accepted.
    pub fn read_as_f64(&mut self) -> Result<Option<f64>, JsonError> {
        self.read_parsed("a 64-bit float")
    }

    /// Read the next value as an `i64`. Numeric strings are accepted.
    pub fn read_as_i64(&mut self) -> Result<Option<i64>, JsonError> {
        self.read_parsed("a 64-bit integer")
    }

    fn read_parsed<T: std::str::FromStr>(&mut self, target: &'static str) -> Result<Option<T>, JsonError> {
        match self.next_scalar()? {
            None => Ok(None),
            Some(JsonEvent::String(text)) if text.is_empty() => Ok(None),
            Some(JsonEvent::Number(text) | JsonEvent::String(text)) => {
                text.parse().map(Some).map_err(|_| JsonError::DataFormat {
                    text: text.clone(),
                    target,
                })
            }
            Some(event) => Err(JsonError::UnexpectedToken {
                expected: target,
                found: event.describe(),
            }),
        }
    }

    /// Read the next scalar as text. Numbers keep their exact spelling.
    pub fn read_as_string(&mut self) -> Result<Option<String>, JsonError> {
        Ok(self.next_scalar()?.map(|event| match event {
            JsonEvent::Bool(true) => "true".to_owned(),
            JsonEvent::Bool(false) => "false".to_owned(),
            JsonEvent::Number(text) | JsonEvent::String(text) => text.to_string(),
            _ => String::new(),
        }))
    }

    /// Read the next value as a `bool`. `"true"` and `"false"` strings are
    /// accepted.
    pub fn read_as_bool(&mut self) -> Result<Option<bool>, JsonError> {
        match self.next_scalar()? {
            None => Ok(None),
            Some(JsonEvent::Bool(value)) => Ok(Some(*value)),
            Some(JsonEvent::String(text)) => match &**text {
                "" => Ok(None),
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(JsonError::DataFormat {
                    text: text.clone(),
                    target: "a boolean",
                }),
            },
            Some(event) => Err(JsonError::UnexpectedToken {
                expected: "a boolean",
                found: event.describe(),
            }),
        }
    }
}

/// Pipe every remaining event of `reader` into `writer`.
pub fn copy_events(reader: &mut TreeReader<'_>, writer: &mut dyn JsonWrite) -> Result<(), JsonError> {
    while let Some(event) = reader.next_event()? {
        event.write_to(writer)?;
    }
    Ok(())
}

//! Structural document protocol.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use url::Url;
use uuid::Uuid;

use crate::error::JsonError;
use crate::format::{format_date_time_offset, format_time_span, DateTimeKind};

/// Sink for the structural token protocol.
///
/// Verbs with no expression tree meaning (comments, constructors,
/// `undefined`, raw bytes) are rejected by default.
pub trait JsonWrite {
    fn write_start_object(&mut self) -> Result<(), JsonError>;
    fn write_end_object(&mut self) -> Result<(), JsonError>;
    fn write_start_array(&mut self) -> Result<(), JsonError>;
    fn write_end_array(&mut self) -> Result<(), JsonError>;
    fn write_property_name(&mut self, name: &str) -> Result<(), JsonError>;

    fn write_null(&mut self) -> Result<(), JsonError>;
    fn write_bool(&mut self, value: bool) -> Result<(), JsonError>;
    fn write_i64(&mut self, value: i64) -> Result<(), JsonError>;
    fn write_u64(&mut self, value: u64) -> Result<(), JsonError>;
    fn write_f64(&mut self, value: f64) -> Result<(), JsonError>;
    fn write_str(&mut self, value: &str) -> Result<(), JsonError>;
    /// A number whose text is already valid JSON, written verbatim.
    fn write_raw_number(&mut self, text: &str) -> Result<(), JsonError>;
    fn write_date_time(&mut self, value: NaiveDateTime, kind: DateTimeKind) -> Result<(), JsonError>;

    fn write_f32(&mut self, value: f32) -> Result<(), JsonError> {
        self.write_f64(f64::from(value))
    }

    fn write_char(&mut self, value: char) -> Result<(), JsonError> {
        let mut buf = [0; 4];
        self.write_str(value.encode_utf8(&mut buf))
    }

    fn write_date_time_offset(&mut self, value: &DateTime<FixedOffset>) -> Result<(), JsonError> {
        self.write_str(&format_date_time_offset(value)?)
    }

    /// Written as `[-][d.]hh:mm:ss[.fffffff]`.
    fn write_time_span(&mut self, value: TimeDelta) -> Result<(), JsonError> {
        self.write_str(&format_time_span(value))
    }

    fn write_guid(&mut self, value: Uuid) -> Result<(), JsonError> {
        self.write_str(&value.hyphenated().to_string())
    }

    fn write_uri(&mut self, value: &Url) -> Result<(), JsonError> {
        self.write_str(value.as_str())
    }

    fn write_bytes(&mut self, _value: &[u8]) -> Result<(), JsonError> {
        Err(JsonError::Unsupported {
            operation: "writing raw bytes",
        })
    }

    fn write_comment(&mut self, _text: &str) -> Result<(), JsonError> {
        Err(JsonError::Unsupported {
            operation: "writing a comment",
        })
    }

    fn write_start_constructor(&mut self, _name: &str) -> Result<(), JsonError> {
        Err(JsonError::Unsupported {
            operation: "writing a constructor",
        })
    }

    fn write_undefined(&mut self) -> Result<(), JsonError> {
        Err(JsonError::Unsupported {
            operation: "writing `undefined`",
        })
    }
}

/// One step of a document walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JsonEvent {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    PropertyName(Box<str>),
    Null,
    Bool(bool),
    Number(Box<str>),
    String(Box<str>),
}

impl JsonEvent {
    /// Short description for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            JsonEvent::StartObject => "start of object",
            JsonEvent::EndObject => "end of object",
            JsonEvent::StartArray => "start of array",
            JsonEvent::EndArray => "end of array",
            JsonEvent::PropertyName(_) => "property name",
            JsonEvent::Null => "null",
            JsonEvent::Bool(_) => "boolean",
            JsonEvent::Number(_) => "number",
            JsonEvent::String(_) => "string",
        }
    }

    /// Replay this event into `writer`.
    pub fn write_to(&self, writer: &mut dyn JsonWrite) -> Result<(), JsonError> {
        match self {
            JsonEvent::StartObject => writer.write_start_object(),
            JsonEvent::EndObject => writer.write_end_object(),
            JsonEvent::StartArray => writer.write_start_array(),
            JsonEvent::EndArray => writer.write_end_array(),
            JsonEvent::PropertyName(name) => writer.write_property_name(name),
            JsonEvent::Null => writer.write_null(),
            JsonEvent::Bool(value) => writer.write_bool(*value),
            JsonEvent::Number(text) => writer.write_raw_number(text),
            JsonEvent::String(text) => writer.write_str(text),
        }
    }
}

//! Scalar text layouts: floats, date/times and time spans.
//!
//! Layouts are fixed and built by hand instead of through `chrono`'s
//! formatter so the output never changes with locale or crate version:
//!
//! - date/time: `yyyy-MM-ddTHH:mm:ss[.fffffff][Z|±HH:MM]`, fraction in
//!   100 ns ticks with trailing zeros trimmed
//! - time span: `[-][d.]hh:mm:ss[.fffffff]`, fraction untrimmed

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Offset, TimeDelta, TimeZone, Timelike};

use crate::error::JsonError;
use crate::settings::{DateTimeZoneHandling, FloatFormatHandling};
use crate::value::JsonExpr;

const TICKS_PER_SECOND: u128 = 10_000_000;
const NANOS_PER_TICK: u32 = 100;

/// Zone information carried by a date/time value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DateTimeKind {
    /// Wall-clock time with no zone.
    Unspecified,
    Utc,
    /// Local time at the given offset from UTC.
    Local(FixedOffset),
}

/// Leaf for a float: a number that always reads back as a float, or the
/// non-finite handling.
pub(crate) fn float_tree(
    value: f64,
    text: impl FnOnce() -> String,
    handling: FloatFormatHandling,
) -> Result<JsonExpr, JsonError> {
    if value.is_finite() {
        return Ok(JsonExpr::Number(ensure_decimal_point(text()).into()));
    }
    match handling {
        FloatFormatHandling::String => Ok(JsonExpr::string(non_finite_name(value))),
        FloatFormatHandling::DefaultValue => Ok(JsonExpr::number("0.0")),
        FloatFormatHandling::Symbol => Err(JsonError::Unsupported {
            operation: "symbolic NaN or Infinity",
        }),
    }
}

fn non_finite_name(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value.is_sign_positive() {
        "Infinity"
    } else {
        "-Infinity"
    }
}

/// Append `.0` unless the literal already has a fraction or exponent.
pub(crate) fn ensure_decimal_point(mut text: String) -> String {
    if !text.contains(['.', 'e', 'E']) {
        text.push_str(".0");
    }
    text
}

/// Format a date/time after normalizing it per `handling`.
pub(crate) fn format_date_time(
    value: NaiveDateTime,
    kind: DateTimeKind,
    handling: DateTimeZoneHandling,
) -> Result<String, JsonError> {
    let (wall, suffix) = match (handling, kind) {
        (DateTimeZoneHandling::Unspecified, _) => (value, Suffix::None),
        (DateTimeZoneHandling::RoundtripKind, DateTimeKind::Unspecified) => (value, Suffix::None),
        (
            DateTimeZoneHandling::Utc | DateTimeZoneHandling::RoundtripKind,
            DateTimeKind::Utc,
        )
        | (DateTimeZoneHandling::Utc, DateTimeKind::Unspecified) => (value, Suffix::Zulu),
        (DateTimeZoneHandling::Utc, DateTimeKind::Local(offset)) => {
            (shift(value, -offset_delta(offset))?, Suffix::Zulu)
        }
        (
            DateTimeZoneHandling::Local | DateTimeZoneHandling::RoundtripKind,
            DateTimeKind::Local(offset),
        ) => (value, Suffix::Offset(offset)),
        (DateTimeZoneHandling::Local, DateTimeKind::Utc) => {
            let offset = chrono::Local.offset_from_utc_datetime(&value).fix();
            (shift(value, offset_delta(offset))?, Suffix::Offset(offset))
        }
        (DateTimeZoneHandling::Local, DateTimeKind::Unspecified) => {
            let offset = chrono::Local
                .offset_from_local_datetime(&value)
                .earliest()
                .map_or_else(|| chrono::Utc.fix(), |offset| offset.fix());
            (value, Suffix::Offset(offset))
        }
    };

    let mut out = date_time_layout(wall);
    suffix.append_to(&mut out);
    Ok(out)
}

/// Format a date/time with its own offset; zone handling does not apply.
pub(crate) fn format_date_time_offset(value: &DateTime<FixedOffset>) -> Result<String, JsonError> {
    let offset = *value.offset();
    let mut out = date_time_layout(shift(value.naive_utc(), offset_delta(offset))?);
    Suffix::Offset(offset).append_to(&mut out);
    Ok(out)
}

/// Move a wall-clock value by a zone offset, failing past the calendar range.
fn shift(value: NaiveDateTime, delta: TimeDelta) -> Result<NaiveDateTime, JsonError> {
    value
        .checked_add_signed(delta)
        .ok_or_else(|| JsonError::DataFormat {
            text: value.to_string().into(),
            target: "a date/time within the calendar range",
        })
}

enum Suffix {
    None,
    Zulu,
    Offset(FixedOffset),
}

impl Suffix {
    fn append_to(&self, out: &mut String) {
        match self {
            Suffix::None => {}
            Suffix::Zulu => out.push('Z'),
            Suffix::Offset(offset) => {
                let seconds = offset.local_minus_utc();
                let sign = if seconds < 0 { '-' } else { '+' };
                let minutes = seconds.unsigned_abs() / 60;
                out.push_str(&format!("{sign}{:02}:{:02}", minutes / 60, minutes % 60));
            }
        }
    }
}

fn offset_delta(offset: FixedOffset) -> TimeDelta {
    TimeDelta::seconds(i64::from(offset.local_minus_utc()))
}

fn date_time_layout(value: NaiveDateTime) -> String {
    let mut out = format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        value.year(),
        value.month(),
        value.day(),
        value.hour(),
        value.minute(),
        value.second(),
    );
    // leap seconds carry nanos past 1e9
    let ticks = value.nanosecond() % 1_000_000_000 / NANOS_PER_TICK;
    if ticks != 0 {
        let digits = format!("{ticks:07}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// Format a time span as `[-][d.]hh:mm:ss[.fffffff]`.
pub(crate) fn format_time_span(span: TimeDelta) -> String {
    let ticks = i128::from(span.num_seconds()) * TICKS_PER_SECOND as i128
        + i128::from(span.subsec_nanos() / NANOS_PER_TICK as i32);
    let negative = ticks < 0;
    let ticks = ticks.unsigned_abs();

    let fraction = ticks % TICKS_PER_SECOND;
    let total_seconds = ticks / TICKS_PER_SECOND;
    let (days, rest) = (total_seconds / 86_400, total_seconds % 86_400);
    let (hours, minutes, seconds) = (rest / 3600, rest % 3600 / 60, rest % 60);

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&format!("{days}."));
    }
    out.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if fraction != 0 {
        out.push_str(&format!(".{fraction:07}"));
    }
    out
}

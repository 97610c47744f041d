//! Writer configuration.

/// What a writer emits for `NaN` and infinities.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum FloatFormatHandling {
    /// Quoted `"NaN"`, `"Infinity"` or `"-Infinity"`.
    #[default]
    String,
    /// Bare symbols are not valid JSON; always rejected.
    Symbol,
    /// The float default, `0.0`.
    DefaultValue,
}

/// How date/time values are normalized before formatting.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DateTimeZoneHandling {
    /// Convert to UTC and mark with `Z`.
    Utc,
    /// Convert to the local offset and print it.
    Local,
    /// Print the wall-clock time with no zone suffix.
    Unspecified,
    /// Keep whatever kind the value carries.
    #[default]
    RoundtripKind,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct WriterSettings {
    pub float_format: FloatFormatHandling,
    pub date_time_zone: DateTimeZoneHandling,
}

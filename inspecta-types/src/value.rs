//! The closed value domain of attributes and its canonical text rules.
//!
//! Canonical text is culture-invariant:
//! - integers as decimal digits
//! - doubles as shortest round-trip text with `NaN`, `Infinity`, `-Infinity`
//! - timestamps as ISO-8601 round-trip text, `Z`-suffixed for UTC instants

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use std::fmt;

use crate::{Error, Result};

/// Ticks (100 ns units) per second; the resolution of timestamp text.
const TICKS_PER_SECOND: u32 = 10_000_000;
const NANOS_PER_TICK: u32 = 100;

/// A native attribute payload before text normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttributeValue {
    /// No value.
    #[default]
    None,
    /// Alphanumeric value.
    Text(String),
    /// 16-bit integer value.
    ShortInteger(i16),
    /// 32-bit integer value.
    Integer(i32),
    /// Floating point value.
    Double(f64),
    /// Point in time.
    Timestamp(Timestamp),
}

/// The native domains an attribute value can be requested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueDomain {
    Text,
    ShortInteger,
    Integer,
    Double,
    Timestamp,
    /// Opaque identifiers. Attributes never coerce into this domain.
    Identifier,
}

/// A timestamp together with its kind.
///
/// Wire formats distinguish instants that are explicitly UTC from wall-clock
/// times without a designator. The latter are interpreted as UTC whenever an
/// instant is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    Utc(DateTime<Utc>),
    Unspecified(NaiveDateTime),
}

impl Timestamp {
    /// Returns the instant, treating an unspecified wall clock as UTC.
    #[must_use]
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            Self::Utc(dt) => *dt,
            Self::Unspecified(naive) => naive.and_utc(),
        }
    }

    /// Returns true if the timestamp carries an explicit UTC designator.
    #[must_use]
    pub const fn is_utc(&self) -> bool {
        matches!(self, Self::Utc(_))
    }

    /// Renders the ISO-8601 round-trip text of this timestamp.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        match self {
            Self::Utc(dt) => format!("{}Z", format_wall_clock(&dt.naive_utc())),
            Self::Unspecified(naive) => format_wall_clock(naive),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Utc(dt)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(naive: NaiveDateTime) -> Self {
        Self::Unspecified(naive)
    }
}

impl AttributeValue {
    /// Returns the native domain of this value, or `None` for the empty value.
    #[must_use]
    pub const fn domain(&self) -> Option<ValueDomain> {
        match self {
            Self::None => None,
            Self::Text(_) => Some(ValueDomain::Text),
            Self::ShortInteger(_) => Some(ValueDomain::ShortInteger),
            Self::Integer(_) => Some(ValueDomain::Integer),
            Self::Double(_) => Some(ValueDomain::Double),
            Self::Timestamp(_) => Some(ValueDomain::Timestamp),
        }
    }

    /// Returns true for the empty value.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Renders the canonical text of this value. `None` has no text.
    #[must_use]
    pub fn to_canonical_string(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Text(text) => Some(text.clone()),
            Self::ShortInteger(v) => Some(v.to_string()),
            Self::Integer(v) => Some(v.to_string()),
            Self::Double(v) => Some(format_double(*v)),
            Self::Timestamp(ts) => Some(ts.to_canonical_string()),
        }
    }
}

impl From<String> for AttributeValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<i16> for AttributeValue {
    fn from(v: i16) -> Self {
        Self::ShortInteger(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<Timestamp> for AttributeValue {
    fn from(ts: Timestamp) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Timestamp(Timestamp::Utc(dt))
    }
}

impl From<NaiveDateTime> for AttributeValue {
    fn from(naive: NaiveDateTime) -> Self {
        Self::Timestamp(Timestamp::Unspecified(naive))
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

impl TryFrom<serde_json::Value> for AttributeValue {
    type Error = Error;

    /// Converts a dynamically typed payload. Anything outside the closed value
    /// domain is rejected here rather than on first use.
    fn try_from(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(Self::None),
            Value::String(text) => Ok(Self::Text(text)),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    return i32::try_from(int)
                        .map(Self::Integer)
                        .map_err(|_| Error::InvalidValueType { kind: "integer out of range" });
                }
                if number.is_u64() {
                    return Err(Error::InvalidValueType { kind: "integer out of range" });
                }
                number
                    .as_f64()
                    .map(Self::Double)
                    .ok_or(Error::InvalidValueType { kind: "number" })
            }
            Value::Bool(_) => Err(Error::InvalidValueType { kind: "boolean" }),
            Value::Array(_) => Err(Error::InvalidValueType { kind: "array" }),
            Value::Object(_) => Err(Error::InvalidValueType { kind: "object" }),
        }
    }
}

// ── Canonical formatting ─────────────────────────────────────────

/// Formats a double as invariant shortest round-trip text.
///
/// Decimal exponents in `[-4, 15)` use plain notation, everything else uses
/// scientific notation with a signed, at least two digit exponent.
pub(crate) fn format_double(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_owned();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    let scientific = format!("{v:E}");
    let Some((mantissa, exponent)) = scientific.split_once('E') else {
        return v.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (-4..15).contains(&exponent) {
        v.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}E{sign}{:02}", exponent.unsigned_abs())
    }
}

fn format_wall_clock(naive: &NaiveDateTime) -> String {
    let mut text = naive.format("%Y-%m-%dT%H:%M:%S").to_string();
    let ticks = naive.nanosecond() % 1_000_000_000 / NANOS_PER_TICK;
    if ticks != 0 {
        debug_assert!(ticks < TICKS_PER_SECOND);
        let fraction = format!("{ticks:07}");
        text.push('.');
        text.push_str(fraction.trim_end_matches('0'));
    }
    text
}

// ── Canonical parsing ────────────────────────────────────────────

/// Parses a 32-bit integer. Fractional text such as `"1.0"` is rejected.
pub(crate) fn parse_int(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}

/// Parses a 16-bit integer. Fractional text such as `"1.0"` is rejected.
pub(crate) fn parse_short(text: &str) -> Option<i16> {
    text.trim().parse().ok()
}

/// Parses a double, accepting only the invariant special literals.
pub(crate) fn parse_double(text: &str) -> Option<f64> {
    let text = text.trim();
    match text {
        "NaN" => return Some(f64::NAN),
        "Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    // `f64::from_str` also accepts `inf` and `nan`; those are not canonical.
    let numeric = text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !numeric {
        return None;
    }
    text.parse().ok()
}

/// Parses ISO-8601 round-trip text into a UTC instant.
///
/// Offsets are converted, text without a designator is taken as UTC.
pub(crate) fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

//! Attributes: a key plus a value with one canonical text form.
//!
//! An attribute remembers the native payload it was built from (the raw
//! value) next to the canonical text derived from it. Identity is defined on
//! the canonical text, so `Attribute::new(k, 1.23)` and
//! `Attribute::from_text(k, "1.23")` are the same attribute.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::value::{parse_date, parse_double, parse_int, parse_short};
use crate::{AttributeKey, AttributeValue, Result, Timestamp, ValueDomain};

/// A keyed attribute value of an inspection plan entity or measurement.
#[derive(Debug, Clone)]
pub struct Attribute {
    key: AttributeKey,
    /// Canonical text; `None` iff the attribute holds no value.
    value: Option<String>,
    /// Native payload; `None` when built from text.
    raw: AttributeValue,
}

impl Attribute {
    /// Creates an attribute from a typed native value.
    #[must_use]
    pub fn new(key: impl Into<AttributeKey>, value: impl Into<AttributeValue>) -> Self {
        let raw = value.into();
        Self {
            key: key.into(),
            value: raw.to_canonical_string(),
            raw,
        }
    }

    /// Creates an attribute from already canonical text.
    ///
    /// The raw value of such an attribute is empty; typed access goes through
    /// the text.
    #[must_use]
    pub fn from_text(key: impl Into<AttributeKey>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(text.into()),
            raw: AttributeValue::None,
        }
    }

    /// Creates an attribute that holds no value.
    #[must_use]
    pub fn empty(key: impl Into<AttributeKey>) -> Self {
        Self {
            key: key.into(),
            value: None,
            raw: AttributeValue::None,
        }
    }

    /// Creates an attribute from a dynamically typed payload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidValueType`] if the payload is outside the
    /// attribute value domain (booleans, arrays, objects, integers that do not
    /// fit 32 bits).
    pub fn from_json(key: impl Into<AttributeKey>, value: serde_json::Value) -> Result<Self> {
        Ok(Self::new(key, AttributeValue::try_from(value)?))
    }

    /// Returns the attribute key.
    #[must_use]
    pub const fn key(&self) -> AttributeKey {
        self.key
    }

    /// Returns the canonical text of the value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the native payload the attribute was built from.
    #[must_use]
    pub const fn raw_value(&self) -> &AttributeValue {
        &self.raw
    }

    /// Returns true if the attribute holds no value. Empty text is a value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// Returns the canonical text.
    #[must_use]
    pub fn get_str(&self) -> Option<&str> {
        self.value()
    }

    /// Parses the canonical text as a 32-bit integer.
    #[must_use]
    pub fn get_int(&self) -> Option<i32> {
        self.value().and_then(parse_int)
    }

    /// Parses the canonical text as a double.
    #[must_use]
    pub fn get_double(&self) -> Option<f64> {
        self.value().and_then(parse_double)
    }

    /// Parses the canonical text as a timestamp normalized to UTC.
    #[must_use]
    pub fn get_date(&self) -> Option<DateTime<Utc>> {
        self.value().and_then(parse_date)
    }

    /// Returns the value in the requested native domain.
    ///
    /// A raw value already in `domain` is returned unchanged. Otherwise the
    /// canonical text is parsed into `domain`; failures and unsupported
    /// domains yield `None`.
    #[must_use]
    pub fn get_raw(&self, domain: ValueDomain) -> Option<AttributeValue> {
        if self.raw.domain() == Some(domain) {
            return Some(self.raw.clone());
        }

        match domain {
            ValueDomain::Text => self.value.clone().map(AttributeValue::Text),
            ValueDomain::ShortInteger => {
                self.value().and_then(parse_short).map(AttributeValue::ShortInteger)
            }
            ValueDomain::Integer => self.get_int().map(AttributeValue::Integer),
            ValueDomain::Double => self.get_double().map(AttributeValue::Double),
            ValueDomain::Timestamp => self
                .get_date()
                .map(|dt| AttributeValue::Timestamp(Timestamp::Utc(dt))),
            ValueDomain::Identifier => None,
        }
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        if self.key != other.key {
            return false;
        }
        // NaN never equals NaN, even though both render as "NaN".
        if let (AttributeValue::Double(x), AttributeValue::Double(y)) = (&self.raw, &other.raw) {
            if x.is_nan() && y.is_nan() {
                return false;
            }
        }
        self.value == other.value
    }
}

impl Hash for Attribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.value.hash(state);
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "K{}: {}", self.key, self.value().unwrap_or_default())
    }
}

#[derive(Serialize, Deserialize)]
struct AttributeRepr {
    key: AttributeKey,
    value: Option<String>,
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        AttributeRepr {
            key: self.key,
            value: self.value.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Attribute {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let repr = AttributeRepr::deserialize(deserializer)?;
        Ok(match repr.value {
            Some(text) => Self::from_text(repr.key, text),
            None => Self::empty(repr.key),
        })
    }
}

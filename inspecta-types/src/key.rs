//! Attribute keys and the shared schema constants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of an attribute within the inspection schema.
///
/// Keys are stable across renames of the attribute and are never reused for a
/// different schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeKey(u16);

impl AttributeKey {
    /// Creates a key from its numeric value.
    #[must_use]
    pub const fn new(key: u16) -> Self {
        Self(key)
    }

    /// Returns the numeric value of the key.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

impl From<u16> for AttributeKey {
    fn from(key: u16) -> Self {
        Self(key)
    }
}

impl From<AttributeKey> for u16 {
    fn from(key: AttributeKey) -> Self {
        key.0
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AttributeKey {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Well-known attribute keys of the shared inspection schema.
///
/// External collaborators rely on these numbers verbatim. Do not renumber.
pub mod well_known {
    use super::AttributeKey;

    /// Keys of measured values.
    pub mod value {
        use super::AttributeKey;

        pub const MEASURED_VALUE: AttributeKey = AttributeKey::new(1);
    }

    /// Keys of measurements.
    pub mod measurement {
        use super::AttributeKey;

        pub const TIME: AttributeKey = AttributeKey::new(4);
        pub const EVENTS: AttributeKey = AttributeKey::new(5);
        pub const BATCH_NUMBER: AttributeKey = AttributeKey::new(6);
        pub const NEST_NUMBER: AttributeKey = AttributeKey::new(7);
        pub const OPERATOR: AttributeKey = AttributeKey::new(8);
        pub const TEXT: AttributeKey = AttributeKey::new(9);
        pub const MACHINE: AttributeKey = AttributeKey::new(10);
    }

    /// Keys of parts.
    pub mod part {
        use super::AttributeKey;

        pub const NUMBER: AttributeKey = AttributeKey::new(1001);
        pub const DESCRIPTION: AttributeKey = AttributeKey::new(1002);
    }

    /// Keys of characteristics.
    pub mod characteristic {
        use super::AttributeKey;

        pub const NUMBER: AttributeKey = AttributeKey::new(2001);
        pub const DESCRIPTION: AttributeKey = AttributeKey::new(2002);
        pub const NOMINAL_VALUE: AttributeKey = AttributeKey::new(2101);
        pub const LOWER_TOLERANCE: AttributeKey = AttributeKey::new(2110);
        pub const UPPER_TOLERANCE: AttributeKey = AttributeKey::new(2111);
    }
}

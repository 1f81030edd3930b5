//! Records that carry attributes: measurements and inspection plan items.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

use crate::key::well_known;
use crate::{Attribute, AttributeKey, Timestamp};

/// Shared attribute access for every attribute-carrying record.
///
/// An item holds at most one attribute per key.
pub trait AttributeItem {
    /// The attributes of this item.
    fn attributes(&self) -> &[Attribute];

    /// Mutable access to the attributes of this item.
    fn attributes_mut(&mut self) -> &mut Vec<Attribute>;

    /// Returns the attribute with the given key.
    fn get_attribute(&self, key: AttributeKey) -> Option<&Attribute> {
        self.attributes().iter().find(|a| a.key() == key)
    }

    /// Returns the canonical text of the attribute with the given key.
    fn get_attribute_value(&self, key: AttributeKey) -> Option<&str> {
        self.get_attribute(key).and_then(Attribute::value)
    }

    /// Stores an attribute, replacing the one with the same key in place.
    fn set_attribute(&mut self, attribute: Attribute) {
        let attributes = self.attributes_mut();
        match attributes.iter().position(|a| a.key() == attribute.key()) {
            Some(index) => attributes[index] = attribute,
            None => attributes.push(attribute),
        }
    }

    /// Stores a text value; `None` removes the attribute.
    fn set_attribute_value(&mut self, key: AttributeKey, value: Option<String>) {
        match value {
            Some(text) => self.set_attribute(Attribute::from_text(key, text)),
            None => {
                self.remove_attribute(key);
            }
        }
    }

    /// Removes and returns the attribute with the given key.
    fn remove_attribute(&mut self, key: AttributeKey) -> Option<Attribute> {
        let attributes = self.attributes_mut();
        let index = attributes.iter().position(|a| a.key() == key)?;
        Some(attributes.remove(index))
    }
}

/// A measurement without its measured values.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleMeasurement {
    pub uuid: Uuid,
    pub part_uuid: Uuid,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub attributes: Vec<Attribute>,
}

impl SimpleMeasurement {
    /// Creates an empty measurement of the given part.
    #[must_use]
    pub fn new(part_uuid: Uuid) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::now_v7(),
            part_uuid,
            created: now,
            last_modified: now,
            attributes: Vec::new(),
        }
    }

    /// Smallest date the measurement database accepts.
    #[must_use]
    pub fn minimum_valid_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1753, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Reads the measurement time attribute.
    ///
    /// Text that is not a valid timestamp reads as no time.
    #[must_use]
    pub fn time(&self) -> Option<DateTime<Utc>> {
        let attribute = self.get_attribute(well_known::measurement::TIME)?;
        match attribute.value() {
            None | Some("") => None,
            Some(text) => {
                let time = attribute.get_date();
                if time.is_none() {
                    debug!(uuid = %self.uuid, value = text, "Ignoring unparsable measurement time");
                }
                time
            }
        }
    }

    /// Writes the measurement time attribute; `None` removes it.
    pub fn set_time(&mut self, time: Option<DateTime<Utc>>) {
        match time {
            Some(time) => self.set_attribute(Attribute::new(well_known::measurement::TIME, time)),
            None => {
                self.remove_attribute(well_known::measurement::TIME);
            }
        }
    }

    /// The measurement time, or the minimum database date.
    #[must_use]
    pub fn time_or_min_date(&self) -> DateTime<Utc> {
        self.time().unwrap_or_else(Self::minimum_valid_date)
    }

    /// The measurement time, or the creation date.
    #[must_use]
    pub fn time_or_creation_date(&self) -> DateTime<Utc> {
        self.time().unwrap_or(self.created)
    }
}

impl AttributeItem for SimpleMeasurement {
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attributes
    }
}

impl fmt::Display for SimpleMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = self
            .time()
            .map(|t| Timestamp::Utc(t).to_canonical_string())
            .unwrap_or_default();
        write!(f, "'{}' [{}]", time, self.uuid)
    }
}

/// A part or characteristic of an inspection plan.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionPlanItem {
    pub uuid: Uuid,
    /// Slash separated path from the plan root, e.g. `/Part/Characteristic`.
    pub path: String,
    pub comment: Option<String>,
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    pub attributes: Vec<Attribute>,
}

impl InspectionPlanItem {
    /// Creates an item at `path` with version 0.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::now_v7(),
            path: path.into(),
            comment: None,
            version: 0,
            timestamp: Utc::now(),
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute while building the item.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.set_attribute(attribute);
        self
    }
}

impl AttributeItem for InspectionPlanItem {
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attributes
    }
}

impl fmt::Display for InspectionPlanItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.version, self.path)
    }
}

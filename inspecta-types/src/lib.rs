//! Core attribute types for Inspecta.
//!
//! This crate defines the typed attribute value model shared by every
//! inspection-plan and measurement record:
//! - Attribute keys and the well-known schema keys
//! - A closed value domain (text, short, int, double, timestamp)
//! - Attributes with canonical text, value-semantics equality and hashing
//! - Attribute-carrying records (measurements, inspection plan items)
//!
//! Values arrive from heterogeneous wire formats. Every value has exactly one
//! culture-invariant canonical text form, which is what equality, hashing and
//! serialization operate on.

mod attribute;
mod item;
mod key;
mod value;

pub use attribute::Attribute;
pub use item::{AttributeItem, InspectionPlanItem, SimpleMeasurement};
pub use key::{AttributeKey, well_known};
pub use value::{AttributeValue, Timestamp, ValueDomain};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building attribute values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid attribute value type: {kind}")]
    InvalidValueType { kind: &'static str },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

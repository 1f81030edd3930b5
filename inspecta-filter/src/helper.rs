//! Mapping from filter domain enums to token vocabulary.
//!
//! Every function here is total: the attribute categories and compare
//! operations are closed enums, so there is no unknown value to reject.

use serde::{Deserialize, Serialize};

use crate::{FilterTree, TokenType};

/// An attribute category that can appear in a filter.
pub trait FilterAttribute: Copy {
    /// The attribute's name in the filter grammar.
    fn name(self) -> &'static str;
}

/// Timestamp attributes of raw data entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateTimeAttribute {
    Created,
    LastModified,
}

impl FilterAttribute for DateTimeAttribute {
    fn name(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::LastModified => "LastModified",
        }
    }
}

/// Integer attributes of raw data entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegerAttribute {
    Key,
    Size,
}

impl FilterAttribute for IntegerAttribute {
    fn name(self) -> &'static str {
        match self {
            Self::Key => "Key",
            Self::Size => "Size",
        }
    }
}

/// Text attributes of raw data entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringAttribute {
    FileName,
    MimeType,
    Md5,
}

impl FilterAttribute for StringAttribute {
    fn name(self) -> &'static str {
        match self {
            Self::FileName => "FileName",
            Self::MimeType => "MimeType",
            Self::Md5 => "MD5",
        }
    }
}

/// Scalar comparison of an attribute with a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOperation {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

/// Returns the canonical filter name of an attribute.
#[must_use]
pub fn attribute_name<A: FilterAttribute>(attribute: A) -> &'static str {
    attribute.name()
}

/// Returns the token a compare operation compiles to.
#[must_use]
pub const fn operator_token_type(operation: CompareOperation) -> TokenType {
    match operation {
        CompareOperation::Equal => TokenType::Equal,
        CompareOperation::NotEqual => TokenType::NotEqual,
        CompareOperation::Greater => TokenType::Greater,
        CompareOperation::GreaterOrEqual => TokenType::GreaterOrEqual,
        CompareOperation::Less => TokenType::Less,
        CompareOperation::LessOrEqual => TokenType::LessOrEqual,
    }
}

/// Builds a comparison node of `attribute_name` against `value`.
#[must_use]
pub fn make_comparison(operator: TokenType, attribute_name: &str, value: FilterTree) -> FilterTree {
    FilterTree::make_comparison(operator, attribute_name, value)
}

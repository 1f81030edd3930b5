//! Token vocabulary of filter trees.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator of a filter tree node.
///
/// The vocabulary is shared by every filter grammar; a given formatter may
/// render only part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    // Leaves
    Value,
    ValueList,
    Identifier,

    // Logical combinators
    And,
    Or,
    Not,

    // Comparisons
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    In,
    NotIn,
    Like,
}

impl TokenType {
    /// Returns true for tokens that combine child predicates.
    #[must_use]
    pub const fn is_logical(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Not)
    }

    /// Returns true for tokens that compare an identifier with a value.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::NotEqual
                | Self::Greater
                | Self::GreaterOrEqual
                | Self::Less
                | Self::LessOrEqual
                | Self::In
                | Self::NotIn
                | Self::Like
        )
    }

    /// Returns the variant name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Value => "Value",
            Self::ValueList => "ValueList",
            Self::Identifier => "Identifier",
            Self::And => "And",
            Self::Or => "Or",
            Self::Not => "Not",
            Self::Equal => "Equal",
            Self::NotEqual => "NotEqual",
            Self::Greater => "Greater",
            Self::GreaterOrEqual => "GreaterOrEqual",
            Self::Less => "Less",
            Self::LessOrEqual => "LessOrEqual",
            Self::In => "In",
            Self::NotIn => "NotIn",
            Self::Like => "Like",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token of a filter tree: a discriminator plus optional text.
///
/// Values and identifiers carry their text; an absent text on a value token
/// is the null literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    token_type: TokenType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl Token {
    /// Creates a token without text.
    #[must_use]
    pub const fn new(token_type: TokenType) -> Self {
        Self {
            token_type,
            value: None,
        }
    }

    /// Creates a token carrying text.
    #[must_use]
    pub fn with_value(token_type: TokenType, value: Option<String>) -> Self {
        Self { token_type, value }
    }

    /// Returns the discriminator.
    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        self.token_type
    }

    /// Returns the text carried by the token.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}({})", self.token_type, value),
            None => write!(f, "{}", self.token_type),
        }
    }
}

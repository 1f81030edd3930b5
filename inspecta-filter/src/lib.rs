//! Filter conditions for Inspecta search endpoints.
//!
//! Callers describe a query as a graph of [`FilterCondition`]s. Conditions
//! compile into an immutable, renderer-agnostic [`FilterTree`], and a
//! [`Formatter`] renders the tree into the filter text a search endpoint
//! accepts:
//!
//! ```text
//! FilterCondition ──build_filter_tree──▶ FilterTree ──Formatter::format──▶ String
//! ```
//!
//! Compilation is total. Rendering is partial: a formatter rejects tokens it
//! cannot express with [`FormatError::UnsupportedToken`] instead of dropping
//! or approximating them.

mod condition;
mod formatter;
pub mod helper;
mod token;
mod tree;

pub use condition::FilterCondition;
pub use formatter::{FilterStringFormatter, Formatter, FormatterConfig};
pub use helper::{CompareOperation, DateTimeAttribute, FilterAttribute, IntegerAttribute, StringAttribute};
pub use token::{Token, TokenType};
pub use tree::FilterTree;

/// Result type for formatter operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors raised while rendering a filter tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The formatter has no rendering for this token.
    #[error("token type '{}' is not supported by this formatter", .0.token_type())]
    UnsupportedToken(Token),

    /// A node does not have the shape its token requires.
    #[error("malformed '{token}' node: {reason}")]
    MalformedNode { token: Token, reason: String },

    /// The tree nests deeper than the configured limit.
    #[error("filter tree exceeds the maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },
}

impl FormatError {
    /// Returns the token the formatter failed on, if any.
    #[must_use]
    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::UnsupportedToken(token) | Self::MalformedNode { token, .. } => Some(token),
            Self::DepthExceeded { .. } => None,
        }
    }
}

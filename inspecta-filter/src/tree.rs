//! The compiled filter tree.

use crate::{Token, TokenType};

/// An immutable filter expression node.
///
/// Each node carries a [`Token`] and owns its children. The `make_*`
/// constructors build the shapes formatters expect:
///
/// | Token                      | Children                       |
/// |----------------------------|--------------------------------|
/// | `Value`, `Identifier`      | none                           |
/// | `ValueList`                | `Value` leaves                 |
/// | `And`, `Or`                | any number of predicates       |
/// | `Not`                      | one predicate                  |
/// | comparison                 | `Identifier`, `Value`/`ValueList` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTree {
    token: Token,
    children: Vec<FilterTree>,
}

impl FilterTree {
    /// Creates a node from its parts. Shape is checked when formatting.
    #[must_use]
    pub fn new(token: Token, children: Vec<FilterTree>) -> Self {
        Self { token, children }
    }

    /// Creates a literal leaf; `None` is the null literal.
    #[must_use]
    pub fn make_value(value: Option<String>) -> Self {
        Self::new(Token::with_value(TokenType::Value, value), Vec::new())
    }

    /// Creates a list of literals.
    #[must_use]
    pub fn make_value_list<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let children = values.into_iter().map(Self::make_value).collect();
        Self::new(Token::new(TokenType::ValueList), children)
    }

    /// Creates an identifier leaf naming an attribute.
    #[must_use]
    pub fn make_identifier(name: impl Into<String>) -> Self {
        Self::new(
            Token::with_value(TokenType::Identifier, Some(name.into())),
            Vec::new(),
        )
    }

    /// Creates a conjunction of the given predicates, in order.
    #[must_use]
    pub fn make_and(children: Vec<FilterTree>) -> Self {
        Self::new(Token::new(TokenType::And), children)
    }

    /// Creates a disjunction of the given predicates, in order.
    #[must_use]
    pub fn make_or(children: Vec<FilterTree>) -> Self {
        Self::new(Token::new(TokenType::Or), children)
    }

    /// Creates a negation of a predicate.
    #[must_use]
    pub fn make_not(child: FilterTree) -> Self {
        Self::new(Token::new(TokenType::Not), vec![child])
    }

    /// Creates a comparison of an attribute with a value node.
    #[must_use]
    pub fn make_comparison(operator: TokenType, attribute_name: &str, value: FilterTree) -> Self {
        Self::new(
            Token::new(operator),
            vec![Self::make_identifier(attribute_name), value],
        )
    }

    /// Returns the token of this node.
    #[must_use]
    pub const fn token(&self) -> &Token {
        &self.token
    }

    /// Returns the discriminator of this node.
    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        self.token.token_type()
    }

    /// Returns the children of this node.
    #[must_use]
    pub fn children(&self) -> &[FilterTree] {
        &self.children
    }

    /// Returns the number of nodes on the longest path from this node to a leaf.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }
}

//! Rendering of filter trees into filter text.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{FilterTree, FormatError, FormatResult, Token, TokenType};

/// Renders a filter tree into the text form of one filter grammar.
pub trait Formatter {
    /// Renders `tree`, or fails on the first node the grammar cannot express.
    fn format(&self, tree: &FilterTree) -> FormatResult<String>;
}

/// Configuration for [`FilterStringFormatter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// Maximum nesting depth, counted in nodes from the root to a leaf.
    ///
    /// Rendering recurses once per level, so this also bounds the stack use
    /// of a format call.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    32
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

/// Formatter for the query filter grammar of the raw data search endpoint.
///
/// ```text
/// (LastModified > '2015-03-09T19:12:00Z' and not (MimeType = 'text/plain'))
/// Key in ('1', '2')
/// ```
///
/// Literals are single-quoted with embedded quotes doubled, and the null
/// literal is `null`. `Like` has no rendering in this grammar.
#[derive(Debug, Clone, Default)]
pub struct FilterStringFormatter {
    config: FormatterConfig,
}

impl FilterStringFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    fn write_node(&self, node: &FilterTree, depth: usize, out: &mut String) -> FormatResult<()> {
        if depth > self.config.max_depth {
            return Err(FormatError::DepthExceeded {
                max_depth: self.config.max_depth,
            });
        }

        match node.token_type() {
            TokenType::And => self.write_junction(node, "and", "true", depth, out),
            TokenType::Or => self.write_junction(node, "or", "false", depth, out),
            TokenType::Not => self.write_not(node, depth, out),
            TokenType::Equal
            | TokenType::NotEqual
            | TokenType::Greater
            | TokenType::GreaterOrEqual
            | TokenType::Less
            | TokenType::LessOrEqual
            | TokenType::In
            | TokenType::NotIn => self.write_comparison(node, depth, out),
            TokenType::Value => {
                expect_leaf(node)?;
                write_literal(node.token(), out);
                Ok(())
            }
            TokenType::ValueList => self.write_value_list(node, depth, out),
            TokenType::Identifier => {
                expect_leaf(node)?;
                out.push_str(identifier(node)?);
                Ok(())
            }
            TokenType::Like => Err(FormatError::UnsupportedToken(node.token().clone())),
        }
    }

    fn write_junction(
        &self,
        node: &FilterTree,
        keyword: &str,
        neutral: &str,
        depth: usize,
        out: &mut String,
    ) -> FormatResult<()> {
        let children = node.children();
        if children.is_empty() {
            out.push_str(neutral);
            return Ok(());
        }

        out.push('(');
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                out.push(' ');
                out.push_str(keyword);
                out.push(' ');
            }
            self.write_node(child, depth + 1, out)?;
        }
        out.push(')');
        Ok(())
    }

    fn write_not(&self, node: &FilterTree, depth: usize, out: &mut String) -> FormatResult<()> {
        let [child] = node.children() else {
            return Err(malformed(node, "expected exactly one operand"));
        };

        out.push_str("not ");
        // Junctions already parenthesize themselves.
        let wrap = !matches!(child.token_type(), TokenType::And | TokenType::Or);
        if wrap {
            out.push('(');
        }
        self.write_node(child, depth + 1, out)?;
        if wrap {
            out.push(')');
        }
        Ok(())
    }

    fn write_comparison(&self, node: &FilterTree, depth: usize, out: &mut String) -> FormatResult<()> {
        let [name, operand] = node.children() else {
            return Err(malformed(node, "expected an identifier and an operand"));
        };
        if name.token_type() != TokenType::Identifier {
            return Err(malformed(node, "left operand is not an identifier"));
        }

        let token_type = node.token_type();
        let list_operand = matches!(token_type, TokenType::In | TokenType::NotIn);
        let expected = if list_operand {
            TokenType::ValueList
        } else {
            TokenType::Value
        };
        if operand.token_type() != expected {
            return Err(malformed(
                node,
                &format!("right operand must be a {expected}, found {}", operand.token_type()),
            ));
        }

        self.write_node(name, depth + 1, out)?;
        out.push(' ');
        out.push_str(operator_symbol(token_type).ok_or_else(|| unsupported(node))?);
        out.push(' ');
        self.write_node(operand, depth + 1, out)
    }

    fn write_value_list(&self, node: &FilterTree, depth: usize, out: &mut String) -> FormatResult<()> {
        if depth + 1 > self.config.max_depth && !node.children().is_empty() {
            return Err(FormatError::DepthExceeded {
                max_depth: self.config.max_depth,
            });
        }

        out.push('(');
        for (i, child) in node.children().iter().enumerate() {
            if child.token_type() != TokenType::Value {
                return Err(malformed(node, "list entries must be values"));
            }
            expect_leaf(child)?;
            if i > 0 {
                out.push_str(", ");
            }
            write_literal(child.token(), out);
        }
        out.push(')');
        Ok(())
    }
}

impl Formatter for FilterStringFormatter {
    fn format(&self, tree: &FilterTree) -> FormatResult<String> {
        let mut out = String::new();
        match self.write_node(tree, 1, &mut out) {
            Ok(()) => {
                trace!(filter = %out, "Rendered filter tree");
                Ok(out)
            }
            Err(e) => {
                debug!(error = %e, "Rejected filter tree");
                Err(e)
            }
        }
    }
}

fn operator_symbol(token_type: TokenType) -> Option<&'static str> {
    let symbol = match token_type {
        TokenType::Equal => "=",
        TokenType::NotEqual => "!=",
        TokenType::Greater => ">",
        TokenType::GreaterOrEqual => ">=",
        TokenType::Less => "<",
        TokenType::LessOrEqual => "<=",
        TokenType::In => "in",
        TokenType::NotIn => "notin",
        _ => return None,
    };
    Some(symbol)
}

fn write_literal(token: &Token, out: &mut String) {
    match token.value() {
        Some(text) => {
            out.push('\'');
            out.push_str(&text.replace('\'', "''"));
            out.push('\'');
        }
        None => out.push_str("null"),
    }
}

fn identifier(node: &FilterTree) -> FormatResult<&str> {
    match node.token().value() {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(malformed(node, "identifier has no name")),
    }
}

fn expect_leaf(node: &FilterTree) -> FormatResult<()> {
    if node.children().is_empty() {
        Ok(())
    } else {
        Err(malformed(node, "leaf token has children"))
    }
}

fn malformed(node: &FilterTree, reason: &str) -> FormatError {
    FormatError::MalformedNode {
        token: node.token().clone(),
        reason: reason.to_owned(),
    }
}

fn unsupported(node: &FilterTree) -> FormatError {
    FormatError::UnsupportedToken(node.token().clone())
}

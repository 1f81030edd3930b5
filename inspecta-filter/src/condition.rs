//! Typed filter conditions.

use std::ops::{BitAnd, BitOr, Not};

use inspecta_types::Timestamp;

use crate::helper::{self, CompareOperation, DateTimeAttribute, IntegerAttribute, StringAttribute};
use crate::{FilterTree, FormatResult, Formatter, TokenType};

/// A composable predicate over raw data entries.
///
/// Conditions are plain values; compiling one with
/// [`build_filter_tree`](Self::build_filter_tree) never fails. Comparison
/// literals are optional, and an absent literal compiles to the null value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCondition {
    /// All children hold. Empty means always true.
    And(Vec<FilterCondition>),
    /// At least one child holds. Empty means always false.
    Or(Vec<FilterCondition>),
    Not(Box<FilterCondition>),
    DateTimeCompare {
        attribute: DateTimeAttribute,
        operation: CompareOperation,
        value: Option<Timestamp>,
    },
    IntegerCompare {
        attribute: IntegerAttribute,
        operation: CompareOperation,
        value: Option<i64>,
    },
    StringCompare {
        attribute: StringAttribute,
        operation: CompareOperation,
        value: Option<String>,
    },
    IntegerIn {
        attribute: IntegerAttribute,
        values: Vec<i64>,
    },
    IntegerNotIn {
        attribute: IntegerAttribute,
        values: Vec<i64>,
    },
}

impl FilterCondition {
    #[must_use]
    pub fn and(children: impl IntoIterator<Item = FilterCondition>) -> Self {
        Self::And(children.into_iter().collect())
    }

    #[must_use]
    pub fn or(children: impl IntoIterator<Item = FilterCondition>) -> Self {
        Self::Or(children.into_iter().collect())
    }

    #[must_use]
    pub fn not(child: FilterCondition) -> Self {
        Self::Not(Box::new(child))
    }

    /// Compares a timestamp attribute. The literal keeps its UTC designator,
    /// or lack of one.
    #[must_use]
    pub fn date_time(
        attribute: DateTimeAttribute,
        operation: CompareOperation,
        value: Option<Timestamp>,
    ) -> Self {
        Self::DateTimeCompare {
            attribute,
            operation,
            value,
        }
    }

    #[must_use]
    pub fn integer(attribute: IntegerAttribute, operation: CompareOperation, value: Option<i64>) -> Self {
        Self::IntegerCompare {
            attribute,
            operation,
            value,
        }
    }

    #[must_use]
    pub fn string(
        attribute: StringAttribute,
        operation: CompareOperation,
        value: Option<String>,
    ) -> Self {
        Self::StringCompare {
            attribute,
            operation,
            value,
        }
    }

    #[must_use]
    pub fn integer_in(attribute: IntegerAttribute, values: impl IntoIterator<Item = i64>) -> Self {
        Self::IntegerIn {
            attribute,
            values: values.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn integer_not_in(attribute: IntegerAttribute, values: impl IntoIterator<Item = i64>) -> Self {
        Self::IntegerNotIn {
            attribute,
            values: values.into_iter().collect(),
        }
    }

    /// Compiles this condition into a fresh filter tree.
    ///
    /// Children keep their declared order. The result shares nothing with
    /// `self` or with trees from earlier calls.
    ///
    /// Compilation recurses once per nesting level, so its stack use grows
    /// with the nesting of the condition itself (as do `Clone`, `PartialEq`
    /// and `Drop`). Conditions nested thousands of levels deep are not
    /// supported; the formatter rejects anything deeper than
    /// [`FormatterConfig::max_depth`](crate::FormatterConfig::max_depth).
    #[must_use]
    pub fn build_filter_tree(&self) -> FilterTree {
        match self {
            Self::And(children) => {
                FilterTree::make_and(children.iter().map(Self::build_filter_tree).collect())
            }
            Self::Or(children) => {
                FilterTree::make_or(children.iter().map(Self::build_filter_tree).collect())
            }
            Self::Not(child) => FilterTree::make_not(child.build_filter_tree()),
            Self::DateTimeCompare {
                attribute,
                operation,
                value,
            } => compare(
                helper::attribute_name(*attribute),
                *operation,
                value.as_ref().map(Timestamp::to_canonical_string),
            ),
            Self::IntegerCompare {
                attribute,
                operation,
                value,
            } => compare(
                helper::attribute_name(*attribute),
                *operation,
                value.map(|v| v.to_string()),
            ),
            Self::StringCompare {
                attribute,
                operation,
                value,
            } => compare(helper::attribute_name(*attribute), *operation, value.clone()),
            Self::IntegerIn { attribute, values } => {
                membership(TokenType::In, helper::attribute_name(*attribute), values)
            }
            Self::IntegerNotIn { attribute, values } => {
                membership(TokenType::NotIn, helper::attribute_name(*attribute), values)
            }
        }
    }

    /// Compiles and renders this condition in one step.
    pub fn to_filter_string<F: Formatter + ?Sized>(&self, formatter: &F) -> FormatResult<String> {
        formatter.format(&self.build_filter_tree())
    }
}

fn compare(name: &str, operation: CompareOperation, literal: Option<String>) -> FilterTree {
    helper::make_comparison(
        helper::operator_token_type(operation),
        name,
        FilterTree::make_value(literal),
    )
}

fn membership(operator: TokenType, name: &str, values: &[i64]) -> FilterTree {
    let list = FilterTree::make_value_list(values.iter().map(|v| Some(v.to_string())));
    helper::make_comparison(operator, name, list)
}

/// `a & b` appends `b` when `a` is already a conjunction.
impl BitAnd for FilterCondition {
    type Output = FilterCondition;

    fn bitand(self, rhs: Self) -> Self::Output {
        match self {
            Self::And(mut children) => {
                children.push(rhs);
                Self::And(children)
            }
            lhs => Self::And(vec![lhs, rhs]),
        }
    }
}

/// `a | b` appends `b` when `a` is already a disjunction.
impl BitOr for FilterCondition {
    type Output = FilterCondition;

    fn bitor(self, rhs: Self) -> Self::Output {
        match self {
            Self::Or(mut children) => {
                children.push(rhs);
                Self::Or(children)
            }
            lhs => Self::Or(vec![lhs, rhs]),
        }
    }
}

impl Not for FilterCondition {
    type Output = FilterCondition;

    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}

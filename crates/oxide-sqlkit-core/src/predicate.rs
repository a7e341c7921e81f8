//! Composable WHERE predicates.
//!
//! A [`WhereGroup`] accumulates comparisons left to right. Nested groups are
//! opened with a closure that receives a fresh child group:
//!
//! ```rust
//! use oxide_sqlkit_core::expr::{bind, Literal};
//! use oxide_sqlkit_core::predicate::{BinaryOperator, WhereGroup};
//!
//! let mut group = WhereGroup::new();
//! group
//!     .and_where("name", BinaryOperator::NotEqual, Literal::Null)
//!     .and_where_group(|g| {
//!         g.and_where("name", BinaryOperator::Equal, bind("Milky Way"))
//!             .or_where("name", BinaryOperator::Equal, bind("Andromeda"));
//!     });
//! assert_eq!(group.len(), 2);
//! ```

use core::fmt;
use core::mem;

use crate::error::BuildResult;
use crate::expr::{Expr, IntoOperand};
use crate::query::{Position, SqlWriter};

/// Boolean combinator between the children of a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Combinator {
    /// AND
    #[default]
    And,
    /// OR
    Or,
}

impl Combinator {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
    /// `IS`
    Is,
    /// `IS NOT`
    IsNot,
}

impl BinaryOperator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A node of the predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `left op right`
    Comparison {
        /// Left operand, usually a column.
        left: Expr,
        /// Operator.
        op: BinaryOperator,
        /// Right operand.
        right: Expr,
    },
    /// Children joined by one combinator, in insertion order.
    Group {
        /// Combinator between direct children.
        combinator: Combinator,
        /// Child nodes.
        children: Vec<Predicate>,
    },
}

impl Predicate {
    /// Creates a comparison node.
    #[must_use]
    pub fn comparison(
        left: impl Into<Expr>,
        op: BinaryOperator,
        right: impl IntoOperand,
    ) -> Self {
        Self::Comparison {
            left: left.into(),
            op,
            right: right.into_operand(),
        }
    }

    pub(crate) fn render(&self, w: &mut SqlWriter<'_>) -> BuildResult<()> {
        match self {
            Self::Comparison { left, op, right } => {
                w.push_expr(left, Position::Operand)?;
                w.push(" ").push(op.as_sql()).push(" ");
                w.push_expr(right, Position::Operand)?;
            }
            Self::Group {
                combinator,
                children,
            } => {
                // A lone child needs no grouping.
                let wrap = children.len() > 1;
                if wrap {
                    w.push("(");
                }
                render_children(w, *combinator, children)?;
                if wrap {
                    w.push(")");
                }
            }
        }
        Ok(())
    }
}

fn render_children(
    w: &mut SqlWriter<'_>,
    combinator: Combinator,
    children: &[Predicate],
) -> BuildResult<()> {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            w.push(" ").push(combinator.as_sql()).push(" ");
        }
        child.render(w)?;
    }
    Ok(())
}

/// An accumulating predicate group.
///
/// All direct children share one combinator. Appending with the other
/// combinator once two or more children exist first folds the existing
/// children into a nested group, so `a AND b OR c` is kept as
/// `(a AND b) OR c`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereGroup {
    combinator: Combinator,
    children: Vec<Predicate>,
}

impl WhereGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `column op operand`, joined with AND.
    pub fn and_where(
        &mut self,
        column: impl Into<Expr>,
        op: BinaryOperator,
        operand: impl IntoOperand,
    ) -> &mut Self {
        self.push(Combinator::And, Predicate::comparison(column, op, operand));
        self
    }

    /// Appends `column op operand`, joined with OR.
    pub fn or_where(
        &mut self,
        column: impl Into<Expr>,
        op: BinaryOperator,
        operand: impl IntoOperand,
    ) -> &mut Self {
        self.push(Combinator::Or, Predicate::comparison(column, op, operand));
        self
    }

    /// Opens a nested group joined with AND. Empty groups are dropped.
    pub fn and_where_group<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.push_group(Combinator::And, build);
        self
    }

    /// Opens a nested group joined with OR. Empty groups are dropped.
    pub fn or_where_group<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.push_group(Combinator::Or, build);
        self
    }

    /// Appends an already-built predicate.
    pub fn push(&mut self, combinator: Combinator, predicate: Predicate) {
        if self.children.len() >= 2 && combinator != self.combinator {
            let folded = Predicate::Group {
                combinator: self.combinator,
                children: mem::take(&mut self.children),
            };
            self.children.push(folded);
        }
        if !self.children.is_empty() {
            self.combinator = combinator;
        }
        self.children.push(predicate);
    }

    fn push_group<F>(&mut self, combinator: Combinator, build: F)
    where
        F: FnOnce(&mut Self),
    {
        let mut child = Self::new();
        build(&mut child);
        if let Some(group) = child.into_predicate() {
            self.push(combinator, group);
        }
    }

    /// Returns the combinator between direct children.
    #[must_use]
    pub const fn combinator(&self) -> Combinator {
        self.combinator
    }

    /// Returns the direct children.
    #[must_use]
    pub fn children(&self) -> &[Predicate] {
        &self.children
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns true if nothing was appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Converts the group into a tree node, or `None` if empty.
    #[must_use]
    pub fn into_predicate(self) -> Option<Predicate> {
        if self.children.is_empty() {
            None
        } else {
            Some(Predicate::Group {
                combinator: self.combinator,
                children: self.children,
            })
        }
    }

    /// Writes the children without surrounding parentheses (the body of a
    /// WHERE clause).
    pub(crate) fn render_clause(&self, w: &mut SqlWriter<'_>) -> BuildResult<()> {
        render_children(w, self.combinator, &self.children)
    }
}

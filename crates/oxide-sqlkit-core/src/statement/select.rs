//! SELECT.

use futures::future;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};

use crate::connection::Connection;
use crate::database::Database;
use crate::error::{BuildError, BuildResult, Error, Result};
use crate::expr::{Expr, IntoOperand};
use crate::predicate::{BinaryOperator, WhereGroup};
use crate::query::{Position, Query, SqlWriter};

use super::{BuildState, Latch};

const STATEMENT: &str = "SELECT";

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl Direction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Builder for `SELECT`.
///
/// Clauses are rendered in a fixed order regardless of call order:
/// `SELECT [DISTINCT] ... FROM ... WHERE ... GROUP BY ... ORDER BY ... LIMIT ... OFFSET ...`.
#[derive(Debug)]
pub struct Select<'a, C> {
    db: &'a Database<C>,
    latch: Latch,
    distinct: bool,
    columns: Vec<Expr>,
    from: Vec<String>,
    predicates: WhereGroup,
    group_by: Vec<Expr>,
    order_by: Vec<(Expr, Direction)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl<'a, C: Connection> Select<'a, C> {
    pub(crate) fn new(db: &'a Database<C>) -> Self {
        Self {
            db,
            latch: Latch::new(STATEMENT),
            distinct: false,
            columns: Vec::new(),
            from: Vec::new(),
            predicates: WhereGroup::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Adds `DISTINCT`.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        if self.latch.touch() {
            self.distinct = true;
        }
        self
    }

    /// Appends a select-list item. `"*"` selects everything.
    #[must_use]
    pub fn column(mut self, expr: impl Into<Expr>) -> Self {
        if self.latch.touch() {
            self.columns.push(expr.into());
        }
        self
    }

    /// Appends several select-list items.
    #[must_use]
    pub fn columns<I, E>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        if self.latch.touch() {
            self.columns.extend(exprs.into_iter().map(Into::into));
        }
        self
    }

    /// Appends a table to the FROM list.
    #[must_use]
    pub fn from(mut self, table: impl Into<String>) -> Self {
        if self.latch.touch() {
            self.from.push(table.into());
        }
        self
    }

    /// Appends `column op operand` to WHERE, joined with AND.
    #[must_use]
    pub fn and_where(
        mut self,
        column: impl Into<Expr>,
        op: BinaryOperator,
        operand: impl IntoOperand,
    ) -> Self {
        if self.latch.touch() {
            self.predicates.and_where(column, op, operand);
        }
        self
    }

    /// Appends `column op operand` to WHERE, joined with OR.
    #[must_use]
    pub fn or_where(
        mut self,
        column: impl Into<Expr>,
        op: BinaryOperator,
        operand: impl IntoOperand,
    ) -> Self {
        if self.latch.touch() {
            self.predicates.or_where(column, op, operand);
        }
        self
    }

    /// Appends a parenthesized group to WHERE, joined with AND.
    #[must_use]
    pub fn and_where_group<F>(mut self, build: F) -> Self
    where
        F: FnOnce(&mut WhereGroup),
    {
        if self.latch.touch() {
            self.predicates.and_where_group(build);
        }
        self
    }

    /// Appends a parenthesized group to WHERE, joined with OR.
    #[must_use]
    pub fn or_where_group<F>(mut self, build: F) -> Self
    where
        F: FnOnce(&mut WhereGroup),
    {
        if self.latch.touch() {
            self.predicates.or_where_group(build);
        }
        self
    }

    /// Appends a GROUP BY expression.
    #[must_use]
    pub fn group_by(mut self, expr: impl Into<Expr>) -> Self {
        if self.latch.touch() {
            self.group_by.push(expr.into());
        }
        self
    }

    /// Appends an ORDER BY expression.
    #[must_use]
    pub fn order_by(mut self, expr: impl Into<Expr>, direction: Direction) -> Self {
        if self.latch.touch() {
            self.order_by.push((expr.into(), direction));
        }
        self
    }

    /// Sets LIMIT.
    #[must_use]
    pub fn limit(mut self, n: u64) -> Self {
        if self.latch.touch() {
            self.limit = Some(n);
        }
        self
    }

    /// Sets OFFSET. Requires a LIMIT.
    #[must_use]
    pub fn offset(mut self, n: u64) -> Self {
        if self.latch.touch() {
            self.offset = Some(n);
        }
        self
    }

    /// Returns the builder state.
    #[must_use]
    pub const fn state(&self) -> BuildState {
        self.latch.state()
    }

    /// Renders without consuming the builder. Fails once the builder was
    /// rendered.
    pub fn to_query(&self) -> BuildResult<Query> {
        self.latch.preview()?;
        self.build()
    }

    /// Renders the statement. A builder renders once.
    pub fn render(&mut self) -> BuildResult<Query> {
        self.latch.begin_render()?;
        self.build()
    }

    /// Executes the query and discards any rows.
    pub async fn run(mut self) -> Result<(), C::Error> {
        let query = self.render()?;
        self.db.execute(query).await
    }

    /// Executes the query and streams rows as they arrive. A build error is
    /// yielded as the only item.
    pub fn fetch(mut self) -> BoxStream<'a, Result<C::Row, C::Error>> {
        match self.render() {
            Ok(query) => self.db.fetch(query),
            Err(err) => stream::once(future::ready(Err(Error::Build(err)))).boxed(),
        }
    }

    /// Executes the query and collects every row.
    pub async fn all(self) -> Result<Vec<C::Row>, C::Error> {
        self.fetch().try_collect().await
    }

    /// Executes the query and returns the first row, if any.
    pub async fn first(self) -> Result<Option<C::Row>, C::Error> {
        let mut rows = self.fetch();
        rows.try_next().await
    }

    fn build(&self) -> BuildResult<Query> {
        if self.columns.is_empty() {
            return Err(BuildError::NoColumns {
                statement: STATEMENT,
            });
        }
        if self.offset.is_some() && self.limit.is_none() {
            return Err(BuildError::MissingClause {
                statement: STATEMENT,
                clause: "LIMIT",
            });
        }

        let mut w = SqlWriter::new(self.db.dialect());
        w.push("SELECT ");
        if self.distinct {
            w.push("DISTINCT ");
        }
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            w.push_expr(column, Position::SelectItem)?;
        }

        if !self.from.is_empty() {
            w.push(" FROM ");
            w.push_identifier_list(&self.from)?;
        }

        if !self.predicates.is_empty() {
            w.push(" WHERE ");
            self.predicates.render_clause(&mut w)?;
        }

        if !self.group_by.is_empty() {
            w.push(" GROUP BY ");
            for (i, expr) in self.group_by.iter().enumerate() {
                if i > 0 {
                    w.push(", ");
                }
                w.push_expr(expr, Position::Operand)?;
            }
        }

        if !self.order_by.is_empty() {
            w.push(" ORDER BY ");
            for (i, (expr, direction)) in self.order_by.iter().enumerate() {
                if i > 0 {
                    w.push(", ");
                }
                w.push_expr(expr, Position::Operand)?;
                w.push(" ").push(direction.as_sql());
            }
        }

        if let Some(limit) = self.limit {
            w.push(" LIMIT ").push(&limit.to_string());
        }
        if let Some(offset) = self.offset {
            w.push(" OFFSET ").push(&offset.to_string());
        }

        Ok(w.finish())
    }
}

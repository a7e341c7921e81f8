//! INSERT.

use crate::connection::Connection;
use crate::database::Database;
use crate::error::{BuildError, BuildResult, Result};
use crate::expr::{Expr, IntoOperand};
use crate::query::{Position, Query, SqlWriter};

use super::{BuildState, Latch};

const STATEMENT: &str = "INSERT";

/// Builder for a multi-row `INSERT INTO "t" (...) VALUES (...), (...)`.
///
/// Each [`values`](Self::values) call appends a row. Row arity is checked
/// against the column list when the statement is rendered.
#[derive(Debug)]
pub struct Insert<'a, C> {
    db: &'a Database<C>,
    latch: Latch,
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Expr>>,
}

impl<'a, C: Connection> Insert<'a, C> {
    pub(crate) fn new(db: &'a Database<C>, table: String) -> Self {
        Self {
            db,
            latch: Latch::new(STATEMENT),
            table,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Appends target columns.
    #[must_use]
    pub fn columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.latch.touch() {
            self.columns.extend(names.into_iter().map(Into::into));
        }
        self
    }

    /// Appends one row of values.
    #[must_use]
    pub fn values<I, E>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoOperand,
    {
        if self.latch.touch() {
            self.rows
                .push(row.into_iter().map(IntoOperand::into_operand).collect());
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

    /// Renders and executes the statement.
    pub async fn run(mut self) -> Result<(), C::Error> {
        let query = self.render()?;
        self.db.execute(query).await
    }

    fn build(&self) -> BuildResult<Query> {
        if self.columns.is_empty() {
            return Err(BuildError::NoColumns {
                statement: STATEMENT,
            });
        }
        if self.rows.is_empty() {
            return Err(BuildError::MissingClause {
                statement: STATEMENT,
                clause: "VALUES",
            });
        }
        for (row, values) in self.rows.iter().enumerate() {
            if values.len() != self.columns.len() {
                return Err(BuildError::ArityMismatch {
                    row,
                    expected: self.columns.len(),
                    found: values.len(),
                });
            }
        }

        let mut w = SqlWriter::new(self.db.dialect());
        w.push("INSERT INTO ").push_identifier(&self.table)?.push(" (");
        w.push_identifier_list(&self.columns)?.push(") VALUES ");
        for (i, values) in self.rows.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            w.push("(");
            for (j, value) in values.iter().enumerate() {
                if j > 0 {
                    w.push(", ");
                }
                w.push_expr(value, Position::InsertValue)?;
            }
            w.push(")");
        }
        Ok(w.finish())
    }
}

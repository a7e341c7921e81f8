//! Statement builders.
//!
//! Builders are obtained from a [`Database`](crate::Database) and chained by
//! value. Misuse is recorded on the builder and reported once, when the
//! statement is rendered.

mod alter_table;
mod column;
mod create_index;
mod create_table;
mod drop_table;
mod insert;
mod select;

pub use alter_table::{AlterOperation, AlterTable};
pub use column::{ColumnConstraint, ColumnDefinition, ForeignKey, ForeignKeyAction};
pub use create_index::CreateIndex;
pub use create_table::CreateTable;
pub use drop_table::DropTable;
pub use insert::Insert;
pub use select::{Direction, Select};

use crate::error::{BuildError, BuildResult};

/// Lifecycle of a statement builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildState {
    /// Clauses may still be added.
    #[default]
    Building,
    /// The statement was rendered; the builder is spent.
    Rendered,
}

/// Build state plus the first recorded misuse.
#[derive(Debug, Clone)]
pub(crate) struct Latch {
    statement: &'static str,
    state: BuildState,
    error: Option<BuildError>,
}

impl Latch {
    pub(crate) const fn new(statement: &'static str) -> Self {
        Self {
            statement,
            state: BuildState::Building,
            error: None,
        }
    }

    pub(crate) const fn state(&self) -> BuildState {
        self.state
    }

    /// Records `err` unless an earlier error is already latched.
    pub(crate) fn fail(&mut self, err: BuildError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Records a misuse if `result` is an error.
    pub(crate) fn check<T>(&mut self, result: BuildResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    /// Called by every clause method. Returns false if the builder is spent.
    pub(crate) fn touch(&mut self) -> bool {
        if self.state == BuildState::Rendered {
            self.fail(BuildError::AlreadyRendered {
                statement: self.statement,
            });
            return false;
        }
        true
    }

    /// Fails with the latched error, if any, without changing state.
    pub(crate) fn ensure_valid(&self) -> BuildResult<()> {
        match self.error {
            Some(ref err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Checks that a non-consuming render is still allowed.
    pub(crate) fn preview(&self) -> BuildResult<()> {
        if self.state == BuildState::Rendered {
            return Err(BuildError::AlreadyRendered {
                statement: self.statement,
            });
        }
        self.ensure_valid()
    }

    /// Moves to [`BuildState::Rendered`]. Rendering twice is an error.
    pub(crate) fn begin_render(&mut self) -> BuildResult<()> {
        if self.state == BuildState::Rendered {
            return Err(BuildError::AlreadyRendered {
                statement: self.statement,
            });
        }
        self.state = BuildState::Rendered;
        self.ensure_valid()
    }
}

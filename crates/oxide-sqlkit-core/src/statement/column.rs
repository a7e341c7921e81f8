//! Column definitions shared by CREATE TABLE and ALTER TABLE.

use crate::dialect::{resolve_type, Dialect};
use crate::error::BuildResult;
use crate::expr::Literal;
use crate::query::{Position, SqlWriter};
use crate::types::DataType;

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyAction {
    /// No action.
    NoAction,
    /// Restrict deletion/update.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// A column-level `REFERENCES` clause.
///
/// Only checked syntactically; the referenced table is not looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referenced table.
    pub table: String,
    /// Referenced column.
    pub column: String,
    /// Action on delete.
    pub on_delete: Option<ForeignKeyAction>,
    /// Action on update.
    pub on_update: Option<ForeignKeyAction>,
}

impl ForeignKey {
    /// References `table(column)`.
    #[must_use]
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            on_delete: None,
            on_update: None,
        }
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub const fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the ON UPDATE action.
    #[must_use]
    pub const fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }
}

/// A column constraint. Rendered in the order given.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraint {
    /// PRIMARY KEY
    PrimaryKey,
    /// NOT NULL
    NotNull,
    /// UNIQUE
    Unique,
    /// DEFAULT literal
    Default(Literal),
    /// REFERENCES table (column)
    References(ForeignKey),
}

impl ColumnConstraint {
    /// Creates a `DEFAULT` constraint.
    #[must_use]
    pub fn default_value(literal: impl Into<Literal>) -> Self {
        Self::Default(literal.into())
    }

    /// Creates a `REFERENCES table (column)` constraint.
    #[must_use]
    pub fn references(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::References(ForeignKey::new(table, column))
    }
}

impl From<ForeignKey> for ColumnConstraint {
    fn from(fk: ForeignKey) -> Self {
        Self::References(fk)
    }
}

/// A column: name, type and ordered constraints.
///
/// ```rust
/// use oxide_sqlkit_core::statement::ColumnDefinition;
/// use oxide_sqlkit_core::types::DataType;
///
/// let id = ColumnDefinition::new("galaxyID", DataType::Bigint)
///     .not_null()
///     .references("galaxies", "id");
/// assert_eq!(id.constraints.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Dialect-neutral type.
    pub data_type: DataType,
    /// Constraints in rendering order.
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    /// Creates a column with no constraints.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            constraints: Vec::new(),
        }
    }

    /// Appends a constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Appends several constraints.
    #[must_use]
    pub fn constraints<I>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = ColumnConstraint>,
    {
        self.constraints.extend(constraints);
        self
    }

    /// Marks the column as primary key.
    #[must_use]
    pub fn primary_key(self) -> Self {
        self.constraint(ColumnConstraint::PrimaryKey)
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub fn not_null(self) -> Self {
        self.constraint(ColumnConstraint::NotNull)
    }

    /// Marks the column as UNIQUE.
    #[must_use]
    pub fn unique(self) -> Self {
        self.constraint(ColumnConstraint::Unique)
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(self, literal: impl Into<Literal>) -> Self {
        self.constraint(ColumnConstraint::default_value(literal))
    }

    /// Adds a foreign key reference.
    #[must_use]
    pub fn references(self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.constraint(ColumnConstraint::references(table, column))
    }

    /// Checks everything that does not depend on surrounding SQL.
    pub(crate) fn validate(&self, dialect: &dyn Dialect) -> BuildResult<()> {
        let mut w = SqlWriter::new(dialect);
        self.render(&mut w)
    }

    pub(crate) fn render(&self, w: &mut SqlWriter<'_>) -> BuildResult<()> {
        let type_name = resolve_type(w.dialect(), &self.data_type)?;
        w.push_identifier(&self.name)?.push(" ").push(&type_name);

        for constraint in &self.constraints {
            match constraint {
                ColumnConstraint::PrimaryKey => {
                    w.push(" PRIMARY KEY");
                }
                ColumnConstraint::NotNull => {
                    w.push(" NOT NULL");
                }
                ColumnConstraint::Unique => {
                    w.push(" UNIQUE");
                }
                ColumnConstraint::Default(literal) => {
                    w.push(" DEFAULT ");
                    w.push_literal(literal, Position::ColumnDefault)?;
                }
                ColumnConstraint::References(fk) => {
                    w.push(" REFERENCES ");
                    w.push_identifier(&fk.table)?.push(" (");
                    w.push_identifier(&fk.column)?.push(")");
                    if let Some(action) = fk.on_delete {
                        w.push(" ON DELETE ").push(action.as_sql());
                    }
                    if let Some(action) = fk.on_update {
                        w.push(" ON UPDATE ").push(action.as_sql());
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MySqlDialect, PostgresDialect, SqliteDialect};
    use crate::error::BuildError;

    fn render(dialect: &dyn Dialect, column: &ColumnDefinition) -> BuildResult<String> {
        let mut w = SqlWriter::new(dialect);
        column.render(&mut w)?;
        Ok(w.finish().sql)
    }

    #[test]
    fn test_primary_key_column() {
        let id = ColumnDefinition::new("id", DataType::Bigint).primary_key();
        assert_eq!(
            render(&PostgresDialect::new(), &id).unwrap(),
            "\"id\" BIGINT PRIMARY KEY"
        );
        assert_eq!(
            render(&SqliteDialect::new(), &id).unwrap(),
            "\"id\" INTEGER PRIMARY KEY"
        );
        assert_eq!(
            render(&MySqlDialect::new(), &id).unwrap(),
            "`id` BIGINT PRIMARY KEY"
        );
    }

    #[test]
    fn test_default_is_a_literal() {
        let name = ColumnDefinition::new("name", DataType::Text)
            .default_value(Literal::string("Unamed Planet"));
        assert_eq!(
            render(&PostgresDialect::new(), &name).unwrap(),
            "\"name\" TEXT DEFAULT 'Unamed Planet'"
        );
    }

    #[test]
    fn test_references_with_actions() {
        let galaxy = ColumnDefinition::new("galaxyID", DataType::Bigint).constraint(
            ForeignKey::new("galaxies", "id")
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::SetNull)
                .into(),
        );
        assert_eq!(
            render(&PostgresDialect::new(), &galaxy).unwrap(),
            "\"galaxyID\" BIGINT REFERENCES \"galaxies\" (\"id\") ON DELETE CASCADE ON UPDATE SET NULL"
        );
    }

    #[test]
    fn test_constraints_keep_order() {
        let col = ColumnDefinition::new("code", DataType::Varchar(16))
            .unique()
            .not_null();
        assert_eq!(
            render(&PostgresDialect::new(), &col).unwrap(),
            "\"code\" VARCHAR(16) UNIQUE NOT NULL"
        );
    }

    #[test]
    fn test_default_marker_rejected_as_column_default() {
        let col = ColumnDefinition::new("id", DataType::Int).default_value(Literal::Default);
        assert_eq!(
            col.validate(&PostgresDialect::new()),
            Err(BuildError::MisplacedDefault)
        );
        let col = ColumnDefinition::new("id", DataType::Int).default_value(Literal::All);
        assert_eq!(
            col.validate(&PostgresDialect::new()),
            Err(BuildError::MisplacedWildcard)
        );
    }

    #[test]
    fn test_unsupported_type() {
        let col = ColumnDefinition::new("uid", DataType::Uuid);
        assert_eq!(
            col.validate(&MySqlDialect::new()),
            Err(BuildError::UnsupportedType {
                dialect: "mysql",
                data_type: String::from("UUID"),
            })
        );
    }
}

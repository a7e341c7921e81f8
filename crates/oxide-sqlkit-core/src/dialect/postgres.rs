//! PostgreSQL dialect.

use super::{AlterTableSyntax, Dialect, ModifyColumnSyntax, Placeholder};
use crate::types::DataType;

/// PostgreSQL dialect: `$n` placeholders, batched ALTER TABLE.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn placeholder_style(&self) -> Placeholder {
        Placeholder::Dollar
    }

    fn type_name(&self, data_type: &DataType) -> Option<String> {
        let name = match data_type {
            DataType::Smallint => "SMALLINT",
            DataType::Int => "INTEGER",
            DataType::Bigint => "BIGINT",
            DataType::Real => "REAL",
            DataType::Double => "DOUBLE PRECISION",
            DataType::Text => "TEXT",
            DataType::Varchar(n) => return Some(format!("VARCHAR({n})")),
            DataType::Blob => "BYTEA",
            DataType::Boolean => "BOOLEAN",
            DataType::Date => "DATE",
            DataType::Timestamp => "TIMESTAMP",
            DataType::Uuid => "UUID",
            DataType::Json => "JSONB",
            DataType::Custom(name) => return Some(name.clone()),
        };
        Some(String::from(name))
    }

    fn alter_table_syntax(&self) -> AlterTableSyntax {
        AlterTableSyntax {
            add_column: true,
            drop_column: true,
            modify_column: Some(ModifyColumnSyntax {
                clause: "ALTER COLUMN",
                type_keyword: Some("SET DATA TYPE"),
            }),
            allows_batch: true,
        }
    }

    fn supports_drop_cascade(&self) -> bool {
        true
    }
}

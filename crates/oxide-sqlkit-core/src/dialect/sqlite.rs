//! SQLite dialect.

use super::{AlterTableSyntax, Dialect};
use crate::types::DataType;

/// SQLite dialect.
///
/// SQLite has no `DEFAULT` keyword inside a `VALUES` list, so the default
/// marker renders as `NULL` (which lets an `INTEGER PRIMARY KEY` pick the next
/// rowid). `ALTER TABLE` takes one change per statement and cannot change a
/// column's type.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn literal_default(&self) -> &'static str {
        "NULL"
    }

    fn type_name(&self, data_type: &DataType) -> Option<String> {
        // SQLite has dynamic typing with type affinity
        let name = match data_type {
            DataType::Smallint | DataType::Int | DataType::Bigint | DataType::Boolean => {
                "INTEGER"
            }
            DataType::Real | DataType::Double => "REAL",
            DataType::Text | DataType::Varchar(_) | DataType::Date | DataType::Timestamp => "TEXT",
            DataType::Blob => "BLOB",
            DataType::Uuid | DataType::Json => return None,
            DataType::Custom(name) => return Some(name.clone()),
        };
        Some(String::from(name))
    }

    fn alter_table_syntax(&self) -> AlterTableSyntax {
        // DROP COLUMN needs SQLite 3.35.0+
        AlterTableSyntax {
            add_column: true,
            drop_column: true,
            modify_column: None,
            allows_batch: false,
        }
    }
}

//! # oxide-sqlkit-core
//!
//! A dialect-portable SQL statement builder.
//!
//! This crate provides:
//! - Dialect descriptors for PostgreSQL, MySQL and SQLite, with capability
//!   flags callers can branch on
//! - Statement builders for CREATE/ALTER/DROP TABLE, CREATE INDEX, INSERT
//!   and SELECT
//! - A thin execution façade over a pluggable [`Connection`]
//!
//! ## Building statements
//!
//! Builders come from a [`Database`] and render to SQL plus an ordered list of
//! bound values:
//!
//! ```rust
//! use oxide_sqlkit_core::dialect::PostgresDialect;
//! use oxide_sqlkit_core::expr::{bind, Literal};
//! use oxide_sqlkit_core::predicate::BinaryOperator;
//! use oxide_sqlkit_core::{Database, DryRun};
//!
//! let db = Database::new(PostgresDialect::new(), DryRun::new());
//! let query = db
//!     .select()
//!     .column("*")
//!     .from("galaxies")
//!     .and_where("name", BinaryOperator::NotEqual, Literal::Null)
//!     .and_where_group(|g| {
//!         g.and_where("name", BinaryOperator::Equal, bind("Milky Way"))
//!             .or_where("name", BinaryOperator::Equal, bind("Andromeda"));
//!     })
//!     .to_query()
//!     .unwrap();
//!
//! assert_eq!(
//!     query.sql,
//!     r#"SELECT * FROM "galaxies" WHERE "name" != NULL AND ("name" = $1 OR "name" = $2)"#
//! );
//! assert_eq!(query.binds.len(), 2);
//! ```
//!
//! ## Dialect capabilities
//!
//! Not every database can apply several column changes in one `ALTER TABLE`.
//! Check the dialect and pick the single-statement or split form:
//!
//! ```rust
//! use oxide_sqlkit_core::dialect::SqliteDialect;
//! use oxide_sqlkit_core::types::DataType;
//! use oxide_sqlkit_core::{Database, DryRun};
//!
//! let db = Database::new(SqliteDialect::new(), DryRun::new());
//! let alter = db
//!     .alter_table("planets")
//!     .column("very_extra", DataType::Bigint, [])
//!     .column("extra_extra", DataType::Text, []);
//!
//! if db.dialect().supports_batch_alter() {
//!     assert_eq!(alter.to_query().unwrap().sql.matches("ADD COLUMN").count(), 2);
//! } else {
//!     assert_eq!(alter.to_queries().unwrap().len(), 2);
//! }
//! ```

pub mod connection;
pub mod database;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod predicate;
pub mod query;
pub mod statement;
pub mod types;
pub mod value;

pub use connection::{Connection, DryRun};
pub use database::Database;
pub use dialect::Dialect;
pub use error::{BuildError, BuildResult, Error, Result};
pub use expr::{bind, col, func, ColumnRef, Expr, IntoOperand, Literal};
pub use predicate::{BinaryOperator, Combinator, WhereGroup};
pub use query::Query;
pub use statement::{BuildState, ColumnConstraint, ColumnDefinition, Direction};
pub use types::DataType;
pub use value::{IntoValue, Value};

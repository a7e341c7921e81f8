//! # oxide-sqlkit-sqlite
//!
//! Runs `oxide-sqlkit-core` statements against SQLite through `sqlx`.
//!
//! # How SQLite differs from other dialects
//!
//! - **[Type affinity]**: declared column types are hints. `BIGINT`,
//!   `INT` and `BOOLEAN` all map to `INTEGER`; `UUID` and `JSON` are
//!   rejected at build time.
//! - **Default marker**: there is no `DEFAULT` keyword in a `VALUES`
//!   list. The marker renders as `NULL`, which makes an
//!   `INTEGER PRIMARY KEY` column take the next rowid.
//! - **Limited [ALTER TABLE]**: one change per statement and no type
//!   changes. Use `AlterTable::run_split` for several changes.
//! - **In-memory databases** live as long as their connection, so
//!   [`SqliteConnection::connect`] keeps a single connection open for
//!   `:memory:` URLs.
//!
//! [Type affinity]: https://www.sqlite.org/datatype3.html
//! [ALTER TABLE]: https://www.sqlite.org/lang_altertable.html
//!
//! ## Example
//!
//! ```rust,no_run
//! use oxide_sqlkit_core::dialect::SqliteDialect;
//! use oxide_sqlkit_core::statement::ColumnConstraint;
//! use oxide_sqlkit_core::{DataType, Database};
//! use oxide_sqlkit_sqlite::SqliteConnection;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let conn = SqliteConnection::connect("sqlite::memory:").await?;
//! let db = Database::new(SqliteDialect::new(), conn);
//! db.create_table("galaxies")
//!     .column("id", DataType::Bigint, [ColumnConstraint::PrimaryKey])
//!     .column("name", DataType::Text, [])
//!     .run()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod connection;

pub use connection::{bind_value, SqliteConnection};
pub use sqlx::sqlite::SqliteRow;

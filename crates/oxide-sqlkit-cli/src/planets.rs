//! The planets workload.
//!
//! Creates a two-table schema, seeds it, runs a handful of queries and then
//! changes the schema. Works against any connection; the batched schema
//! changes only run when the dialect can batch them.

use oxide_sqlkit_core::statement::ColumnConstraint;
use oxide_sqlkit_core::{
    bind, func, BinaryOperator, Connection, DataType, Database, Direction, Literal, Result,
};
use tracing::info;

/// Runs every phase in order.
pub async fn run<C: Connection>(db: &Database<C>) -> Result<(), C::Error> {
    create_schema(db).await?;
    seed_tables(db).await?;
    alter_schema(db).await
}

async fn create_schema<C: Connection>(db: &Database<C>) -> Result<(), C::Error> {
    info!("Creating schema");
    db.drop_table("planets").if_exists().run().await?;
    db.drop_table("galaxies").if_exists().run().await?;
    db.create_table("galaxies")
        .column("id", DataType::Bigint, [ColumnConstraint::PrimaryKey])
        .column("name", DataType::Text, [])
        .run()
        .await?;
    db.create_table("planets")
        .if_not_exists()
        .column("id", DataType::Bigint, [ColumnConstraint::PrimaryKey])
        .column(
            "galaxyID",
            DataType::Bigint,
            [ColumnConstraint::references("galaxies", "id")],
        )
        .run()
        .await?;
    db.alter_table("planets")
        .column(
            "name",
            DataType::Text,
            [ColumnConstraint::default_value(Literal::string("Unamed Planet"))],
        )
        .run()
        .await?;
    db.create_index("test_index")
        .on("planets")
        .column("id")
        .unique()
        .run()
        .await
}

async fn seed_tables<C: Connection>(db: &Database<C>) -> Result<(), C::Error> {
    info!("Seeding tables");
    db.insert_into("galaxies")
        .columns(["id", "name"])
        .values([Literal::Default.into(), bind("Milky Way")])
        .values([Literal::Default.into(), bind("Andromeda")])
        .run()
        .await?;

    let rows = db
        .select()
        .column("*")
        .from("galaxies")
        .and_where("name", BinaryOperator::NotEqual, Literal::Null)
        .and_where_group(|g| {
            g.and_where("name", BinaryOperator::Equal, bind("Milky Way"))
                .or_where("name", BinaryOperator::Equal, bind("Andromeda"));
        })
        .all()
        .await?;
    info!(rows = rows.len(), "Galaxies compared against NULL");

    let rows = db
        .select()
        .column("*")
        .from("galaxies")
        .and_where("name", BinaryOperator::Equal, bind("Milky Way"))
        .group_by("id")
        .order_by("name", Direction::Desc)
        .all()
        .await?;
    info!(rows = rows.len(), "Galaxies named Milky Way");

    db.insert_into("planets")
        .columns(["id", "name"])
        .values([Literal::Default.into(), bind("Earth")])
        .run()
        .await?;
    db.insert_into("planets")
        .columns(["id", "name"])
        .values([Literal::Default.into(), bind("Mercury")])
        .values([Literal::Default.into(), bind("Venus")])
        .values([Literal::Default.into(), bind("Mars")])
        .values([Literal::Default.into(), bind("Jpuiter")])
        .values([Literal::Default.into(), bind("Pluto")])
        .run()
        .await?;

    db.select()
        .column(func("count", ["name"]))
        .from("planets")
        .and_where("galaxyID", BinaryOperator::Equal, bind(5))
        .run()
        .await?;
    db.select()
        .column(func("count", [Literal::All]))
        .from("planets")
        .and_where("galaxyID", BinaryOperator::Equal, bind(5))
        .run()
        .await
}

async fn alter_schema<C: Connection>(db: &Database<C>) -> Result<(), C::Error> {
    info!("Altering schema");
    db.alter_table("planets")
        .column("extra", DataType::Int, [])
        .run()
        .await?;

    if !db.dialect().alter_table_syntax().allows_batch {
        info!(
            dialect = db.dialect().name(),
            "Skipping batched ALTER TABLE, dialect applies one change per statement"
        );
        return Ok(());
    }

    db.alter_table("planets")
        .column("very_extra", DataType::Bigint, [])
        .column("extra_extra", DataType::Text, [])
        .run()
        .await?;
    db.alter_table("planets")
        .drop_column("extra_extra")
        .modify_column("extra", DataType::Text)
        .column("hi", DataType::Text, [])
        .run()
        .await
}

mod common;

use catalog_core::{
    models::ProductData,
    ports::{Application, ProductFailure, ProductRepository as _},
};
use catalog_sqlite::{Db, config::SqliteConfig, types::ProductId};
use common::{TestApp, product};
use rstest::rstest;
use std::time::Duration;

#[tokio::test]
async fn create_assigns_id_and_timestamps() -> anyhow::Result<()> {
    let app = TestApp::open().await?;
    let db = app.database();
    let as_of = app.now();

    let created = db
        .create_product(product("Mouse - Testing", 400.0), as_of)
        .await?;

    assert_eq!(created.data.name, "Mouse - Testing");
    assert_eq!(created.data.price, 400.0);
    assert!(created.data.availability);
    assert_eq!(created.created_at, as_of);
    assert_eq!(created.updated_at, as_of);

    let fetched = db.get_product(created.id).await?.unwrap();
    assert_eq!(fetched, created);

    Ok(())
}

#[tokio::test]
async fn ids_are_unique_and_increasing() -> anyhow::Result<()> {
    let app = TestApp::open().await?;
    let db = app.database();

    let first = db.create_product(product("Teclado", 50.0), app.now()).await?;
    let second = db.create_product(product("Monitor", 300.0), app.now()).await?;

    assert!(second.id > first.id);
    Ok(())
}

#[tokio::test]
async fn query_lists_newest_first() -> anyhow::Result<()> {
    let app = TestApp::open().await?;
    let db = app.database();

    assert!(db.query_products().await?.is_empty());

    let mut ids = Vec::new();
    for (name, price) in [("Teclado", 50.0), ("Monitor", 300.0), ("Audifonos", 80.5)] {
        ids.push(db.create_product(product(name, price), app.now()).await?.id);
    }

    let listed = db.query_products().await?;
    let listed_ids = listed.iter().map(|p| p.id).collect::<Vec<_>>();
    ids.reverse();
    assert_eq!(listed_ids, ids);
    assert_eq!(listed[0].data.name, "Audifonos");

    Ok(())
}

#[tokio::test]
async fn update_overwrites_every_field() -> anyhow::Result<()> {
    let app = TestApp::open().await?;
    let db = app.database();

    let created_at = app.now();
    let created = db.create_product(product("Monitor", 300.0), created_at).await?;

    let later: catalog_sqlite::types::DateTime =
        (time::OffsetDateTime::from(created_at) + Duration::from_secs(60)).into();
    let data = ProductData::new("Monitor curvo", 450.0, false)?;
    let updated = db
        .update_product(created.id, data.clone(), later)
        .await?
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.data, data);
    assert_eq!(updated.created_at, created_at);
    assert_eq!(updated.updated_at, later);

    Ok(())
}

#[tokio::test]
async fn toggle_flips_and_restores_availability() -> anyhow::Result<()> {
    let app = TestApp::open().await?;
    let db = app.database();

    let created = db.create_product(product("Mouse", 20.0), app.now()).await?;

    let once = db.toggle_availability(created.id, app.now()).await?.unwrap();
    assert!(!once.data.availability);

    let twice = db.toggle_availability(created.id, app.now()).await?.unwrap();
    assert!(twice.data.availability);
    assert_eq!(twice.data.name, created.data.name);

    Ok(())
}

#[tokio::test]
async fn delete_removes_the_row() -> anyhow::Result<()> {
    let app = TestApp::open().await?;
    let db = app.database();

    let created = db.create_product(product("Mouse", 20.0), app.now()).await?;

    let deleted = db.delete_product(created.id).await?.unwrap();
    assert_eq!(deleted, created);

    assert_eq!(
        db.get_product(created.id).await?,
        Err(ProductFailure::DoesNotExist)
    );
    assert_eq!(
        db.delete_product(created.id).await?,
        Err(ProductFailure::DoesNotExist)
    );
    assert!(db.query_products().await?.is_empty());

    Ok(())
}

#[rstest]
#[case::get("get")]
#[case::update("update")]
#[case::toggle("toggle")]
#[case::delete("delete")]
#[tokio::test]
async fn missing_product_is_reported_without_side_effects(
    #[case] operation: &str,
) -> anyhow::Result<()> {
    let app = TestApp::open().await?;
    let db = app.database();
    let existing = db.create_product(product("Monitor", 300.0), app.now()).await?;
    let missing = ProductId(2000);

    let outcome = match operation {
        "get" => db.get_product(missing).await?,
        "update" => {
            db.update_product(missing, product("Otro", 10.0), app.now())
                .await?
        }
        "toggle" => db.toggle_availability(missing, app.now()).await?,
        "delete" => db.delete_product(missing).await?,
        _ => unreachable!(),
    };
    assert_eq!(outcome, Err(ProductFailure::DoesNotExist));

    let listed = db.query_products().await?;
    assert_eq!(listed, vec![existing.summary()]);

    Ok(())
}

#[tokio::test]
async fn store_rejects_invalid_rows() -> anyhow::Result<()> {
    let app = TestApp::open().await?;
    let db = app.database();

    // Bypass the constructor to check the table constraints themselves.
    let bad_price = ProductData {
        name: "Gratis".to_string(),
        price: 0.0,
        availability: true,
    };
    assert!(db.create_product(bad_price, app.now()).await.is_err());

    let empty_name = ProductData {
        name: String::new(),
        price: 1.0,
        availability: true,
    };
    assert!(db.create_product(empty_name, app.now()).await.is_err());

    Ok(())
}

#[tokio::test]
async fn file_database_persists_across_opens() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = SqliteConfig {
        database_path: Some(dir.path().join("catalog.db")),
        create_if_missing: true,
    };

    let id = {
        let db = Db::open(&config).await?;
        let app = TestApp(db);
        let created = app
            .database()
            .create_product(product("Monitor", 300.0), app.now())
            .await?;
        app.0.writer.close().await;
        app.0.reader.close().await;
        created.id
    };

    let db = Db::open(&config).await?;
    assert!(db.get_product(id).await?.is_ok());

    Ok(())
}

#[tokio::test]
async fn open_fails_when_file_is_missing_and_creation_disabled() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = SqliteConfig {
        database_path: Some(dir.path().join("missing.db")),
        create_if_missing: false,
    };

    assert!(Db::open(&config).await.is_err());
    Ok(())
}

#[tokio::test]
async fn in_memory_database_is_pinned_by_the_writer() -> anyhow::Result<()> {
    let app = TestApp::open().await?;
    let db = app.database();
    db.create_product(product("Monitor", 300.0), app.now())
        .await?;

    let options = db.writer.options();
    assert_eq!(options.get_min_connections(), 1);
    assert_eq!(options.get_idle_timeout(), None);
    assert_eq!(options.get_max_lifetime(), None);

    // dropping every reader connection must not take the data with it
    db.reader.close().await;
    let (count,): (i64,) = sqlx::query_as("select count(*) from product")
        .fetch_one(&db.writer)
        .await?;
    assert_eq!(count, 1);

    Ok(())
}

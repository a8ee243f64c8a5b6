//! The concrete application: the SQLite store behind the product routes.

use catalog_core::ports::Application;
use catalog_sqlite::{Db, config::SqliteConfig, types::DateTime};
use tracing::{Level, event};

/// The catalog application served by this binary.
#[derive(Clone)]
pub struct CatalogApp {
    /// Database connection for persistent storage
    pub db: Db,
}

impl Application for CatalogApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }
}

/// Open the store, logging the outcome either way.
pub async fn connect(config: &SqliteConfig) -> Result<Db, catalog_sqlite::Error> {
    match Db::open(config).await {
        Ok(db) => {
            event!(Level::INFO, "conectado a la base de datos");
            Ok(db)
        }
        Err(err) => {
            event!(
                Level::ERROR,
                err = err.to_string(),
                "hubo un error al conectar a la base de datos"
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{models::ProductData, ports::ProductRepository as _};

    #[tokio::test]
    async fn connects_to_an_in_memory_store() {
        let app = CatalogApp {
            db: connect(&SqliteConfig::default()).await.unwrap(),
        };
        let data = ProductData::new("Silla", 80.0, true).unwrap();
        let record = app
            .database()
            .create_product(data.clone(), app.now())
            .await
            .unwrap();
        assert_eq!(record.data, data);
        assert_eq!(record.created_at, record.updated_at);
    }

    #[tokio::test]
    async fn refuses_a_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = SqliteConfig {
            database_path: Some(dir.path().join("absent.db")),
            create_if_missing: false,
        };
        assert!(connect(&config).await.is_err());
    }
}

use catalog_core::ports::Application;
use catalog_sqlite::{Db, config::SqliteConfig, types::DateTime};

#[derive(Clone)]
pub struct TestApp(pub Db);

impl TestApp {
    pub async fn open() -> Self {
        Self(Db::open(&SqliteConfig::default()).await.unwrap())
    }
}

impl Application for TestApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.0
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }
}

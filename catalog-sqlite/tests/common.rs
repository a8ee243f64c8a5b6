use catalog_core::{models::ProductData, ports::Application};
use catalog_sqlite::{Db, config::SqliteConfig, types::DateTime};

pub struct TestApp(pub Db);

impl TestApp {
    pub async fn open() -> anyhow::Result<Self> {
        Ok(Self(Db::open(&SqliteConfig::default()).await?))
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

pub fn product(name: &str, price: f64) -> ProductData {
    ProductData::new(name, price, true).unwrap()
}

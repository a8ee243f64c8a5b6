//! Repository trait implementations for the SQLite database.

use crate::{
    Db,
    types::{DateTime, ProductId},
};
use catalog_core::ports::Repository;

mod product;

impl Repository for Db {
    type Error = sqlx::Error;
    type DateTime = DateTime;
    type ProductId = ProductId;
}

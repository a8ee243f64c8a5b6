//! Type definitions for the SQLite implementation.
//!
//! The public types are the concrete identifier and timestamp representations
//! this backend plugs into the `catalog-core` ports. The crate-private row type
//! maps query results onto the core models.

use catalog_core::models::{ProductData, ProductRecord, ProductSummary};

mod datetime;
pub use datetime::DateTime;

/// Store-assigned identifier of a product.
///
/// A transparent wrapper around the SQLite `integer primary key`.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ProductId(pub i64);

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ProductId> for i64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A full row of the `product` table.
#[derive(sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub availability: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<ProductRow> for ProductRecord<ProductId, DateTime> {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            data: ProductData {
                name: row.name,
                price: row.price,
                availability: row.availability,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// The listing projection of the `product` table.
#[derive(sqlx::FromRow)]
pub(crate) struct SummaryRow {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

impl From<SummaryRow> for ProductSummary<ProductId> {
    fn from(row: SummaryRow) -> Self {
        Self {
            id: row.id,
            data: ProductData {
                name: row.name,
                price: row.price,
                availability: row.availability,
            },
        }
    }
}

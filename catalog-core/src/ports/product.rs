use crate::models::{ProductData, ProductRecord, ProductSummary};
use std::future::Future;
use thiserror::Error;

/// Shorthand for the record type produced by a given repository.
pub type Record<R> =
    ProductRecord<<R as super::Repository>::ProductId, <R as super::Repository>::DateTime>;

/// The domain-level failure of an operation that targets a single product.
///
/// This is kept separate from the repository's own error type: a missing
/// product is an expected outcome, a store failure is not.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProductFailure {
    /// No product has the requested id
    #[error("product does not exist")]
    DoesNotExist,
}

/// Repository interface for product storage.
///
/// Operations that target a product by id return
/// `Ok(Err(ProductFailure::DoesNotExist))` when the product is missing, and
/// `Err(_)` only when the store itself fails. The existence check and the
/// mutation are expected to take effect together, so a missing product is
/// never partially modified.
pub trait ProductRepository: super::Repository {
    /// Get the product with the given id.
    fn get_product(
        &self,
        product_id: Self::ProductId,
    ) -> impl Future<Output = Result<Result<Record<Self>, ProductFailure>, Self::Error>> + Send;

    /// List every product, most recently created (highest id) first.
    fn query_products(
        &self,
    ) -> impl Future<Output = Result<Vec<ProductSummary<Self::ProductId>>, Self::Error>> + Send;

    /// Insert a new product. The store assigns the id; both timestamps are set to `as_of`.
    fn create_product(
        &self,
        data: ProductData,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Record<Self>, Self::Error>> + Send;

    /// Overwrite every mutable field of an existing product.
    fn update_product(
        &self,
        product_id: Self::ProductId,
        data: ProductData,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Result<Record<Self>, ProductFailure>, Self::Error>> + Send;

    /// Negate the availability flag of an existing product.
    fn toggle_availability(
        &self,
        product_id: Self::ProductId,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Result<Record<Self>, ProductFailure>, Self::Error>> + Send;

    /// Remove a product, returning the record as it was before deletion.
    fn delete_product(
        &self,
        product_id: Self::ProductId,
    ) -> impl Future<Output = Result<Result<Record<Self>, ProductFailure>, Self::Error>> + Send;
}

use super::{ProductRepository, Repository};

/// Everything the HTTP layer needs from the hosting application.
///
/// Keeping this as a trait lets the same routes run against a real store in
/// production and a throwaway one in tests, and lets tests pin the clock.
pub trait Application {
    /// The store backing the product operations
    type Repository: ProductRepository;

    /// Get a handle to the store.
    fn database(&self) -> &Self::Repository;

    /// The timestamp to record for a mutation happening now.
    fn now(&self) -> <Self::Repository as Repository>::DateTime;
}

mod application;
mod product;

pub use application::Application;
pub use product::{ProductFailure, ProductRepository, Record};

/// The base trait shared by every repository.
///
/// It fixes the error type of the backing store along with the concrete
/// representations an implementation uses for identifiers and timestamps.
pub trait Repository: Sized {
    /// The error type for store and connectivity failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// The timestamp representation
    type DateTime: Clone + Send + Sync;

    /// The product identifier representation
    type ProductId: Clone + Send + Sync;
}

mod product;

pub use product::{ProductData, ProductRecord, ProductSummary, ValidationError};

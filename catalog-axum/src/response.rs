//! Response envelopes shared by every endpoint.

use schemars::JsonSchema;
use serde::Serialize;

use crate::validation::FieldError;

/// Successful payload: `{"data": ...}`.
#[derive(Serialize, JsonSchema)]
pub struct Data<T> {
    /// The requested or affected resource
    pub data: T,
}

impl<T> From<T> for Data<T> {
    fn from(data: T) -> Self {
        Self { data }
    }
}

/// A single failure: `{"error": "..."}`.
#[derive(Serialize, JsonSchema)]
pub struct ErrorBody {
    /// A fixed, human-readable message
    pub error: String,
}

/// Validation failures: `{"errors": [...]}`.
#[derive(Serialize, JsonSchema)]
pub struct ErrorsBody {
    /// One entry per failed check, in rule order
    pub errors: Vec<FieldError>,
}

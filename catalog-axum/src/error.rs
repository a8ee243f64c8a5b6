//! Errors a handler can answer with once validation has passed.

use aide::OperationOutput;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog_core::ports::ProductFailure;
use thiserror::Error;
use tracing::{Level, event};

use crate::response::ErrorBody;

/// Body of every 404 answered by the product endpoints.
pub const NOT_FOUND: &str = "Producto no encontrado";

/// Body of every 500 answered by the product endpoints.
pub const INTERNAL: &str = "Error interno del servidor";

/// A handler failure, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The targeted product does not exist
    #[error("{}", NOT_FOUND)]
    NotFound,
    /// The store failed; the cause has already been logged
    #[error("{}", INTERNAL)]
    Internal,
}

impl ApiError {
    /// Log a store failure and hide its details from the client.
    pub fn store<E: std::fmt::Display>(operation: &'static str) -> impl FnOnce(E) -> Self {
        move |err| {
            event!(Level::ERROR, operation, err = err.to_string());
            Self::Internal
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProductFailure> for ApiError {
    fn from(failure: ProductFailure) -> Self {
        match failure {
            ProductFailure::DoesNotExist => Self::NotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl OperationOutput for ApiError {
    type Inner = ErrorBody;
}

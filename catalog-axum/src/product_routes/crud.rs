use super::input::{CreateProduct, ProductPath, UpdateProduct};
use crate::{ApiApplication, ProductId, error::ApiError, response::Data, validation::Validated};

use axum::{Json, extract::State, http::StatusCode};
use catalog_core::{
    models::ProductSummary,
    ports::{ProductRepository as _, Record},
};
use tracing::{Level, event};

/// Message returned once a product has been removed.
pub(crate) const DELETED: &str = "Producto Eliminado";

/// List every product.
///
/// # Returns
///
/// - `200 OK`: All products, highest id first, without timestamps
/// - `500 Internal Server Error`: Database query failed
pub(crate) async fn list_products<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Data<Vec<ProductSummary<ProductId<T>>>>>, ApiError> {
    let products = app
        .database()
        .query_products()
        .await
        .map_err(ApiError::store("list products"))?;
    Ok(Json(products.into()))
}

/// Retrieve a single product.
///
/// # Returns
///
/// - `200 OK`: The product
/// - `400 Bad Request`: The id is not an integer
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database query failed
pub(crate) async fn get_product<T: ApiApplication>(
    State(app): State<T>,
    Validated(ProductPath { id }): Validated<ProductPath<ProductId<T>>>,
) -> Result<Json<Data<Record<T::Repository>>>, ApiError> {
    let record = app
        .database()
        .get_product(id)
        .await
        .map_err(ApiError::store("get product"))??;
    Ok(Json(record.into()))
}

/// Create a new product.
///
/// The store assigns the id. `availability` defaults to `true`.
///
/// # Returns
///
/// - `201 Created`: The stored product
/// - `400 Bad Request`: The body failed validation
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn create_product<T: ApiApplication>(
    State(app): State<T>,
    Validated(CreateProduct { data }): Validated<CreateProduct>,
) -> Result<(StatusCode, Json<Data<Record<T::Repository>>>), ApiError> {
    let record = app
        .database()
        .create_product(data, app.now())
        .await
        .map_err(ApiError::store("create product"))?;

    event!(Level::INFO, product_id = %record.id, "created product");
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Overwrite every field of an existing product.
///
/// # Returns
///
/// - `200 OK`: The updated product
/// - `400 Bad Request`: The id or body failed validation
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn update_product<T: ApiApplication>(
    State(app): State<T>,
    Validated(UpdateProduct { id, data }): Validated<UpdateProduct<ProductId<T>>>,
) -> Result<Json<Data<Record<T::Repository>>>, ApiError> {
    let record = app
        .database()
        .update_product(id, data, app.now())
        .await
        .map_err(ApiError::store("update product"))??;

    event!(Level::INFO, product_id = %record.id, "updated product");
    Ok(Json(record.into()))
}

/// Flip a product's availability. Any request body is ignored.
///
/// # Returns
///
/// - `200 OK`: The updated product
/// - `400 Bad Request`: The id is not an integer
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn toggle_availability<T: ApiApplication>(
    State(app): State<T>,
    Validated(ProductPath { id }): Validated<ProductPath<ProductId<T>>>,
) -> Result<Json<Data<Record<T::Repository>>>, ApiError> {
    let record = app
        .database()
        .toggle_availability(id, app.now())
        .await
        .map_err(ApiError::store("toggle availability"))??;

    event!(
        Level::INFO,
        product_id = %record.id,
        availability = record.data.availability,
        "toggled product availability"
    );
    Ok(Json(record.into()))
}

/// Remove a product.
///
/// # Returns
///
/// - `200 OK`: A confirmation message
/// - `400 Bad Request`: The id is not an integer
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn delete_product<T: ApiApplication>(
    State(app): State<T>,
    Validated(ProductPath { id }): Validated<ProductPath<ProductId<T>>>,
) -> Result<Json<Data<String>>, ApiError> {
    let record = app
        .database()
        .delete_product(id)
        .await
        .map_err(ApiError::store("delete product"))??;

    event!(Level::INFO, product_id = %record.id, "deleted product");
    Ok(Json(DELETED.to_string().into()))
}

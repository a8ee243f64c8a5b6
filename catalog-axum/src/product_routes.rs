//! REST API endpoints for product operations.
//!
//! Every route validates its path parameter and body with the [`Validated`]
//! extractor before touching the store, so a handler only ever sees
//! well-formed domain values. Responses are wrapped in a `{"data": ...}`
//! envelope.
//!
//! [`Validated`]: crate::validation::Validated

use crate::ApiApplication;
use aide::{
    axum::{ApiRouter, routing::get_with},
    transform::TransformOperation,
};

mod crud;
mod input;

fn tagged<'a>(op: TransformOperation<'a>, summary: &str) -> TransformOperation<'a> {
    op.tag("products").summary(summary)
}

/// Creates a router with product-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route(
            "/",
            get_with(crud::list_products::<T>, |op| {
                tagged(op, "List every product, newest first")
            })
            .post_with(crud::create_product::<T>, |op| {
                tagged(op, "Create a product")
            }),
        )
        .api_route(
            "/{id}",
            get_with(crud::get_product::<T>, |op| tagged(op, "Get a product"))
                .put_with(crud::update_product::<T>, |op| {
                    tagged(op, "Replace a product's fields")
                })
                .patch_with(crud::toggle_availability::<T>, |op| {
                    tagged(op, "Toggle a product's availability")
                })
                .delete_with(crud::delete_product::<T>, |op| {
                    tagged(op, "Delete a product")
                }),
        )
}

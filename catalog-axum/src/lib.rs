#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod product_routes;

use aide::{
    axum::{ApiRouter, routing::get_with},
    openapi::OpenApi,
};
use axum::{
    Extension, Json,
    http::{HeaderValue, Method, header},
};
use catalog_core::ports::{Application, Repository};
use schemars::JsonSchema;
use serde::Serialize;
use std::{fmt::Display, str::FromStr, sync::Arc};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Level, event};

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

pub mod error;
pub mod response;
pub mod validation;

/// The product id type of an application's store.
pub(crate) type ProductId<T> = <<T as Application>::Repository as Repository>::ProductId;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// All documented routes, before the OpenAPI document is finalised.
fn api_router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route(
            "/health",
            get_with(health_check, |op| op.tag("health").summary("Health check")),
        )
        .nest("/api/products", product_routes::router())
        .nest_api_service("/docs", docs_routes())
}

/// The cross-origin policy: only `allowed_origin`, if any, may call the API.
fn cors_layer(config: &AxumConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    match config.allowed_origin.clone() {
        Some(allowed) => layer.allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _| origin.as_bytes() == allowed.as_bytes(),
        )),
        None => layer,
    }
}

/// Construct a full API router with the given state and config
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> axum::Router {
    let mut api = OpenApi::default();
    api_router()
        .finish_api_with(&mut api, api_docs)
        .layer(Extension(Arc::new(api))) // shared by every request to /docs/api.json
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Generate the OpenAPI document of the API without serving it.
pub fn openapi<T: ApiApplication>() -> OpenApi {
    let mut api = OpenApi::default();
    let _ = api_router::<T>().finish_api_with(&mut api, api_docs);
    api
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    let address = listener.local_addr()?;
    event!(Level::INFO, %address, "listening for requests");

    let service = router(app, config);
    axum::serve(listener, service).await
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Repository: Send
                        + Sync
                        + 'static
                        + Repository<
            DateTime: Serialize + JsonSchema + Send + Sync + 'static,
            ProductId: Display + FromStr + Serialize + JsonSchema + Send + Sync + 'static,
        >,
    >
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<
            Repository: Send
                            + Sync
                            + 'static
                            + Repository<
                DateTime: Serialize + JsonSchema + Send + Sync + 'static,
                ProductId: Display + FromStr + Serialize + JsonSchema + Send + Sync + 'static,
            >,
        >
{
}

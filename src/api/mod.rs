pub mod dto;
pub mod errors;
pub mod handlers;

use axum::{routing::get, Router};
use sqlx::SqlitePool;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use handlers::ApiDoc;

pub fn router(pool: SqlitePool, static_dir: &str) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route("/api/data", get(handlers::get_data))
        .with_state(pool)
        .split_for_parts();

    // The dashboard may be hosted on another origin during development; the
    // API is read-only, so cross-origin access stays wide open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
        // Anything that is not an API route is looked up in the asset
        // directory; `/` resolves to its index.html.
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
}

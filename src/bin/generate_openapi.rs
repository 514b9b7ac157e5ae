//! Prints the OpenAPI document for the front-end build.
//!
//! Usage: cargo run --bin generate_openapi > openapi.json

use enviro_station::api::handlers::ApiDoc;
use utoipa::OpenApi;

fn main() {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .expect("Failed to serialise OpenAPI spec");
    println!("{json}");
}

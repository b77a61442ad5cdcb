//! # OpenAPI Specification Assembly
//!
//! Collects the utoipa-documented routes into one OpenAPI document served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SPA Bed Utilization Dashboard",
        version = "0.1.0",
        description = "Shelter bed utilization across Los Angeles County Service Planning Areas: page layout and reactive chart updates.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::dashboard::get_layout,
        crate::routes::dashboard::update,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::layout::PageLayout,
        crate::layout::Dropdown,
        crate::layout::DropdownOption,
        crate::layout::GraphSlot,
        crate::routes::dashboard::UpdateRequest,
    )),
    tags(
        (name = "dashboard", description = "Layout and reactive update"),
    )
)]
pub struct ApiDoc;

/// Serves the document at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

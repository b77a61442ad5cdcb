//! # Dashboard Routes
//!
//! | Method | Path          | Handler           |
//! |--------|---------------|-------------------|
//! | GET    | `/`           | [`page`]          |
//! | GET    | `/v1/layout`  | [`get_layout`]    |
//! | POST   | `/v1/update`  | [`update`]        |
//!
//! The page shell draws itself from `/v1/layout`, then posts the dropdown
//! value to `/v1/update` whenever it changes and redraws all four charts from
//! the response.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use spa_charts::DashboardUpdate;
use spa_core::Selection;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::layout::PageLayout;
use crate::middleware::metrics::DASHBOARD_UPDATES_TOTAL;
use crate::state::AppState;

const PAGE_SHELL: &str = include_str!("../../assets/index.html");

// -- Request DTOs -------------------------------------------------------------

/// Body of `POST /v1/update`: the current dropdown value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateRequest {
    /// Region names, or `"ALL"` for every region. Empty means no filter.
    /// Entries are taken as-is; names that match no region select nothing.
    #[serde(default)]
    pub selection: Vec<String>,
}

// -- Router -------------------------------------------------------------------

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(page))
        .route("/v1/layout", get(get_layout))
        .route("/v1/update", post(update))
}

// -- Handlers -----------------------------------------------------------------

/// GET / — The page shell.
async fn page() -> Html<&'static str> {
    Html(PAGE_SHELL)
}

/// GET /v1/layout — Static page structure.
#[utoipa::path(
    get,
    path = "/v1/layout",
    responses(
        (status = 200, description = "Page layout", body = PageLayout),
    ),
    tag = "dashboard"
)]
pub(crate) async fn get_layout(State(state): State<AppState>) -> Json<PageLayout> {
    Json(state.layout.as_ref().clone())
}

/// POST /v1/update — Redraw every chart for a selection.
#[utoipa::path(
    post,
    path = "/v1/update",
    request_body = UpdateRequest,
    responses(
        (status = 200, description = "Map, region bar, housing type bar and bed count bar figures, then the normalized selection"),
        (status = 400, description = "Body is not a JSON update request", body = crate::error::ErrorBody),
    ),
    tag = "dashboard"
)]
pub(crate) async fn update(
    State(state): State<AppState>,
    body: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<DashboardUpdate>, AppError> {
    let Json(req) = body?;
    let selection = Selection::from(req.selection);
    let update = state.dashboard.update(&selection);
    metrics::counter!(DASHBOARD_UPDATES_TOTAL).increment(1);
    Ok(Json(update))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_unknown_entries_deserialize_verbatim() {
        let req: UpdateRequest =
            serde_json::from_str(r#"{"selection": ["  ", "Nowhere", "ALL"]}"#).unwrap();
        assert_eq!(req.selection, vec!["  ", "Nowhere", "ALL"]);
    }

    #[test]
    fn missing_selection_defaults_to_empty() {
        let req: UpdateRequest = serde_json::from_str("{}").unwrap();
        assert!(req.selection.is_empty());
    }

    #[test]
    fn page_shell_references_layout_and_update() {
        assert!(PAGE_SHELL.contains("/v1/layout"));
        assert!(PAGE_SHELL.contains("/v1/update"));
    }
}

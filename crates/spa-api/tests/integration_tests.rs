//! # Integration Tests for spa-api
//!
//! Drives the full router in-process: health probes, the page shell, the
//! layout, the reactive update (sentinel expansion, empty selection, error
//! bodies), metrics and the OpenAPI document.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use geojson::{Geometry, Value};
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::json;
use tower::ServiceExt;

use spa_api::state::AppState;
use spa_charts::Dashboard;
use spa_core::{BedRecord, EmptySelectionPolicy, RegionBoundary, RegionColorMap, RegionName};
use spa_data::Dataset;

const AV: &str = "Antelope Valley";
const METRO: &str = "Metro Los Angeles";

fn boundary(code: &str, region: Option<&str>) -> RegionBoundary {
    RegionBoundary {
        code: code.to_string(),
        region: region.map(RegionName::new),
        geometry: Geometry::new(Value::Point(vec![-118.24, 34.05])),
    }
}

fn dashboard() -> Dashboard {
    let dataset = Dataset::new(
        vec![
            BedRecord::new(AV, "Emergency Shelter", 100, 80, 80.0),
            BedRecord::new(AV, "Transitional Housing", 100, 90, 90.0),
            BedRecord::new(METRO, "Emergency Shelter", 100, 70, 70.0),
        ],
        vec![boundary("1", Some(AV)), boundary("4", Some(METRO))],
    );
    Dashboard::new(dataset, RegionColorMap::los_angeles())
}

/// Helper: build the test app without a metrics recorder.
fn test_app() -> axum::Router {
    spa_api::app(AppState::new(dashboard()))
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn post_update(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/update")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Page & Layout ------------------------------------------------------------

#[tokio::test]
async fn test_page_shell_is_html() {
    let response = test_app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let body = body_string(response).await;
    assert!(body.contains("Plotly.react"));
}

#[tokio::test]
async fn test_layout_lists_sentinel_then_regions() {
    let response = test_app().oneshot(get("/v1/layout")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let layout = body_json(response).await;

    assert_eq!(layout["title"], "2024 Point-In-Time (PIT) Bed Utilization Rate Analysis");
    assert_eq!(layout["subtitle"], "Los Angeles Homeless Services Authority (LAHSA)");
    assert_eq!(layout["dropdown"]["id"], "slicer-dropdown");
    assert_eq!(
        layout["dropdown"]["options"],
        json!([
            {"label": "Select All", "value": "ALL"},
            {"label": AV, "value": AV},
            {"label": METRO, "value": METRO},
        ])
    );
    assert_eq!(layout["dropdown"]["value"], json!([AV, METRO]));
    assert_eq!(layout["loading_indicator_id"], "loading-icon");
    assert_eq!(layout["rows"][0][0]["id"], "map-graph");
    assert_eq!(layout["rows"][0][0]["display_mode_bar"], true);
    assert_eq!(layout["rows"][1][1]["id"], "bed-count-bar");
}

// -- Reactive Update ----------------------------------------------------------

#[tokio::test]
async fn test_update_single_region() {
    let response = test_app()
        .oneshot(post_update(&json!({"selection": [AV]}).to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let update = body_json(response).await;

    let bars = update["region_bar"]["data"].as_array().unwrap();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0]["type"], "bar");
    assert_eq!(bars[0]["y"], json!([85.0]));
    assert_eq!(update["region_bar"]["layout"]["yaxis"]["range"], json!([60.0, 105.0]));
    assert_eq!(update["selection"], json!([AV]));

    let bed_counts = update["bed_count_bar"]["data"].as_array().unwrap();
    assert_eq!(bed_counts[0]["name"], "Utilized Beds");
    assert_eq!(bed_counts[0]["y"], json!([170.0]));
    assert_eq!(bed_counts[1]["name"], "Empty Beds");
    assert_eq!(bed_counts[1]["y"], json!([30.0]));
}

#[tokio::test]
async fn test_update_sentinel_is_normalized() {
    let response = test_app()
        .oneshot(post_update(r#"{"selection": ["ALL"]}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;

    let keys = [
        "\"map\"",
        "\"region_bar\"",
        "\"housing_type_bar\"",
        "\"bed_count_bar\"",
        "\"selection\"",
    ];
    let order: Vec<usize> = keys
        .iter()
        .map(|key| body.find(key).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));

    let update: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(update["selection"], json!([AV, METRO]));
    let names: Vec<&str> = update["region_bar"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec![AV, METRO]);
    assert_eq!(update["map"]["data"][0]["type"], "choroplethmapbox");
}

#[tokio::test]
async fn test_update_empty_selection_uses_full_dataset() {
    let app = test_app();
    let empty = app
        .clone()
        .oneshot(post_update(r#"{"selection": []}"#))
        .await
        .unwrap();
    let all = app.oneshot(post_update(r#"{"selection": ["ALL"]}"#)).await.unwrap();

    let empty = body_json(empty).await;
    let all = body_json(all).await;
    assert_eq!(empty["region_bar"], all["region_bar"]);
    assert_eq!(empty["bed_count_bar"], all["bed_count_bar"]);
    assert_eq!(empty["selection"], json!([]));
}

#[tokio::test]
async fn test_update_empty_selection_with_no_regions_policy() {
    let dashboard = dashboard().with_empty_selection(EmptySelectionPolicy::NoRegions);
    let app = spa_api::app(AppState::new(dashboard));
    let response = app.oneshot(post_update(r#"{"selection": []}"#)).await.unwrap();
    let update = body_json(response).await;
    assert_eq!(update["region_bar"]["data"], json!([]));
    assert_eq!(update["map"]["data"], json!([]));
}

#[tokio::test]
async fn test_update_is_idempotent() {
    let app = test_app();
    let body = json!({"selection": [METRO]}).to_string();
    let first = body_string(app.clone().oneshot(post_update(&body)).await.unwrap()).await;
    let second = body_string(app.oneshot(post_update(&body)).await.unwrap()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_update_malformed_json_is_bad_request() {
    let response = test_app().oneshot(post_update("{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["details"]["rejection"], "syntax");
}

#[tokio::test]
async fn test_update_blank_entry_is_echoed_with_empty_charts() {
    let response = test_app()
        .oneshot(post_update(r#"{"selection": ["  "]}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let update = body_json(response).await;
    assert_eq!(update["selection"], json!(["  "]));
    assert_eq!(update["map"]["data"], json!([]));
    assert_eq!(update["region_bar"]["data"], json!([]));
    assert_eq!(update["housing_type_bar"]["data"], json!([]));
    assert_eq!(update["bed_count_bar"]["data"], json!([]));
}

#[tokio::test]
async fn test_update_wrong_shape_is_bad_request_with_details() {
    let response = test_app()
        .oneshot(post_update(r#"{"selection": "Metro Los Angeles"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["details"]["rejection"], "data");
}

// -- Metrics & OpenAPI --------------------------------------------------------

#[tokio::test]
async fn test_metrics_without_recorder_is_not_found() {
    let response = test_app().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_metrics_with_recorder_renders_text() {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let app = spa_api::app(AppState::new(dashboard()).with_metrics(handle));
    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn test_openapi_document() {
    let response = test_app().oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"]["/v1/update"]["post"].is_object());
    assert!(doc["paths"]["/v1/layout"]["get"].is_object());
}

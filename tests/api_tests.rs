// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP API tests: routes, status codes, and response bodies.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use trailbook::models::{Coordinates, HikeId};

mod common;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn ridge_trail_json() -> Value {
    json!({
        "name": "Ridge Trail",
        "location": "Blue Mountains",
        "date": "2024-03-01",
        "parking": "Yes",
        "length": "5.2",
        "difficulty": "Moderate"
    })
}

async fn create(app: &Router, body: Value) -> String {
    let (status, json) = send(app, "POST", "/api/hikes", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = common::create_test_app().await;

    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_create_then_list() {
    let (app, _state) = common::create_test_app().await;

    let id = create(&app, ridge_trail_json()).await;

    let (status, json) = send(&app, "GET", "/api/hikes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["total"], 1);

    let hike = &json["hikes"][0];
    assert_eq!(hike["id"], id.as_str());
    assert_eq!(hike["name"], "Ridge Trail");
    assert_eq!(hike["length"], 5.2);
    assert_eq!(hike["date"], "2024-03-01");
    assert_eq!(hike["route_type"], "");
    assert_eq!(hike["photos"], json!([]));
    assert_eq!(hike["locationCoords"], Value::Null);
    assert_eq!(hike["is_completed"], false);
    assert!(hike["created_at"].as_str().is_some());
}

#[tokio::test]
async fn test_get_hike_and_missing_hike() {
    let (app, _state) = common::create_test_app().await;
    let id = create(&app, ridge_trail_json()).await;

    let (status, json) = send(&app, "GET", &format!("/api/hikes/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hike"]["location"], "Blue Mountains");

    let (status, json) = send(&app, "GET", "/api/hikes/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "success": false, "error": "Hike not found" }));

    let (status, _) = send(&app, "GET", "/api/hikes/987654", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_accepts_legacy_flag_and_coords() {
    let (app, _state) = common::create_test_app().await;

    let mut body = ridge_trail_json();
    body["is_completed"] = json!(1);
    body["completed_date"] = json!("2024-03-02T08:00:00Z");
    body["locationCoords"] = json!({ "latitude": -33.7, "longitude": 150.3 });
    body["route_type"] = json!("Out & Back");
    let id = create(&app, body).await;

    let (_, json) = send(&app, "GET", &format!("/api/hikes/{id}"), None).await;
    let hike = &json["hike"];
    assert_eq!(hike["is_completed"], true);
    assert_eq!(hike["completed_date"], "2024-03-02");
    assert_eq!(hike["route_type"], "Out & Back");
    assert_eq!(hike["locationCoords"]["latitude"], -33.7);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let (app, _state) = common::create_test_app().await;

    let mut body = ridge_trail_json();
    body["name"] = json!("  ");
    let (status, json) = send(&app, "POST", "/api/hikes", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("name"));

    let mut body = ridge_trail_json();
    body["length"] = json!("five");
    let (status, json) = send(&app, "POST", "/api/hikes", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    let mut body = ridge_trail_json();
    body["difficulty"] = json!("Extreme");
    let (status, _) = send(&app, "POST", "/api/hikes", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = ridge_trail_json();
    body["locationCoords"] = json!({ "latitude": 95.0, "longitude": 0.0 });
    let (status, json) = send(&app, "POST", "/api/hikes", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("latitude"));

    let (_, json) = send(&app, "GET", "/api/hikes", None).await;
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, _state) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/hikes")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"name\": "))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_update_merges_and_ignores_identity() {
    let (app, _state) = common::create_test_app().await;

    let mut body = ridge_trail_json();
    body["photos"] = json!(["file:///a.jpg"]);
    let id = create(&app, body).await;
    let (_, before) = send(&app, "GET", &format!("/api/hikes/{id}"), None).await;

    let patch = json!({
        "id": "42",
        "created_at": "1999-01-01T00:00:00Z",
        "name": "Ridge Loop",
        "is_completed": true,
        "completed_date": "2024-06-05"
    });
    let (status, json) = send(&app, "PUT", &format!("/api/hikes/{id}"), Some(patch)).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json, json!({ "success": true }));

    let (_, after) = send(&app, "GET", &format!("/api/hikes/{id}"), None).await;
    assert_eq!(after["hike"]["id"], id.as_str());
    assert_eq!(after["hike"]["created_at"], before["hike"]["created_at"]);
    assert_eq!(after["hike"]["name"], "Ridge Loop");
    assert_eq!(after["hike"]["photos"], json!(["file:///a.jpg"]));
    assert_eq!(after["hike"]["completed_date"], "2024-06-05");
}

#[tokio::test]
async fn test_update_missing_hike() {
    let (app, _state) = common::create_test_app().await;

    let (status, json) = send(
        &app,
        "PUT",
        "/api/hikes/31337",
        Some(json!({ "name": "Nothing" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Hike not found");
}

#[tokio::test]
async fn test_delete_and_clear() {
    let (app, _state) = common::create_test_app().await;

    let first = create(&app, ridge_trail_json()).await;
    create(&app, ridge_trail_json()).await;
    create(&app, ridge_trail_json()).await;

    let (status, _) = send(&app, "DELETE", &format!("/api/hikes/{first}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", &format!("/api/hikes/{first}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(&app, "DELETE", "/api/hikes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], 2);

    let (_, json) = send(&app, "GET", "/api/hikes", None).await;
    assert_eq!(json["hikes"], json!([]));
}

#[tokio::test]
async fn test_search_query() {
    let (app, _state) = common::create_test_app().await;

    create(&app, ridge_trail_json()).await;
    let mut coastal = ridge_trail_json();
    coastal["name"] = json!("Coastal Walk");
    coastal["location"] = json!("Royal National Park");
    coastal["notes"] = json!("Whales spotted");
    create(&app, coastal).await;

    let (status, json) = send(&app, "GET", "/api/hikes?q=WHALES", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);
    assert_eq!(json["hikes"].as_array().unwrap().len(), 1);
    assert_eq!(json["hikes"][0]["name"], "Coastal Walk");

    let (_, json) = send(&app, "GET", "/api/hikes?q=moderate", None).await;
    assert_eq!(json["hikes"].as_array().unwrap().len(), 2);

    let long_query = "a".repeat(101);
    let (status, _) = send(&app, "GET", &format!("/api/hikes?q={long_query}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_map_and_geojson() {
    let (app, state) = common::create_test_app().await;

    let mut located = common::ridge_trail();
    located.location_coords = Some(Coordinates {
        latitude: -33.7,
        longitude: 150.3,
    });
    let id: HikeId = state.hikes.create_hike(located).await.unwrap();
    state
        .hikes
        .create_hike(common::hike_on("Unmapped", "2024-02-02"))
        .await
        .unwrap();

    let (status, json) = send(&app, "GET", "/api/map", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hikes"].as_array().unwrap().len(), 1);
    assert_eq!(json["region"]["latitude"], -33.7);
    assert_eq!(json["region"]["latitudeDelta"], 0.01);

    let (_, json) = send(&app, "GET", &format!("/api/map?focus={id}"), None).await;
    assert_eq!(json["region"]["longitude"], 150.3);

    // Unknown focus falls back to fitting all markers
    let (status, _) = send(&app, "GET", "/api/map?focus=nope", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, "GET", "/api/map/geojson", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "FeatureCollection");
    assert_eq!(json["features"].as_array().unwrap().len(), 1);
    assert_eq!(
        json["features"][0]["geometry"]["coordinates"],
        json!([150.3, -33.7])
    );
}

#[tokio::test]
async fn test_map_empty_region_is_null() {
    let (app, _state) = common::create_test_app().await;

    let (status, json) = send(&app, "GET", "/api/map", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["region"], Value::Null);
    assert_eq!(json["hikes"], json!([]));
}

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::office::router::office_router;

#[tokio::test]
async fn property_create_returns_201_envelope() {
    let app = office_router(service());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/properties",
            Value::Object(property_payload()),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Property created successfully"));
    assert_eq!(body["data"]["title"], json!("Sea Point Apartment"));
    assert_eq!(body["data"]["type"], json!("Apartment"));
}

#[tokio::test]
async fn property_create_maps_validation_to_422() {
    let app = office_router(service());

    let response = app
        .oneshot(json_request("POST", "/api/properties", json!({})))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Validation failed"));
    assert_eq!(
        body["errors"]["title"],
        json!(["The title field is required."])
    );
}

#[tokio::test]
async fn missing_property_maps_to_404() {
    let app = office_router(service());

    let response = app
        .oneshot(empty_request("DELETE", "/api/properties/99"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Property not found"));
}

#[tokio::test]
async fn property_delete_names_the_record() {
    let office = service();
    let property = office
        .create_property(&property_payload())
        .expect("creates");
    let app = office_router(office);

    let response = app
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/properties/{}", property.id),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(
        body["message"],
        json!("Property 'Sea Point Apartment' has been deleted successfully")
    );
}

#[tokio::test]
async fn unimplemented_show_and_update_answer_empty_200() {
    for (method, uri) in [
        ("GET", "/api/properties/1"),
        ("GET", "/api/residents/1"),
        ("PUT", "/api/residents/1"),
    ] {
        let app = office_router(service());
        let response = app
            .oneshot(empty_request(method, uri))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK, "{method} {uri}");
        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("read body");
        assert!(body.is_empty(), "{method} {uri} must have no body");
    }
}

#[tokio::test]
async fn resident_list_includes_full_name_and_property() {
    let (office, property, _) = seeded();
    let app = office_router(office);

    let response = app
        .oneshot(empty_request("GET", "/api/residents"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let first = &body["data"][0];
    assert_eq!(first["full_name"], json!("Thandi Nkosi"));
    assert_eq!(first["property"]["id"], json!(property.id));
}

#[tokio::test]
async fn maintenance_list_honors_query_filters() {
    let (office, property, resident) = seeded();
    let pending = seeded_request(&office, property.id, resident.resident.id);
    let assigned = seeded_request(&office, property.id, resident.resident.id);
    office
        .update_request(assigned.request.id, &as_map(json!({ "status": "assigned" })))
        .expect("transition");
    let app = office_router(office);

    let response = app
        .oneshot(empty_request(
            "GET",
            "/api/maintenance-requests?status=pending&priority=high",
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let data = body["data"].as_array().expect("data is array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], json!(pending.request.id));
    assert_eq!(data[0]["status"], json!("pending"));
}

#[tokio::test]
async fn maintenance_update_rejects_unknown_status_with_422() {
    let (office, property, resident) = seeded();
    let view = seeded_request(&office, property.id, resident.resident.id);
    let app = office_router(office);

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/maintenance-requests/{}", view.request.id),
            json!({ "status": "finished" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert_eq!(body["errors"]["status"], json!(["The selected status is invalid."]));
}

#[tokio::test]
async fn dashboard_endpoint_wraps_the_snapshot() {
    let (office, property, resident) = seeded();
    seeded_request(&office, property.id, resident.resident.id);
    let app = office_router(office);

    let response = app
        .oneshot(empty_request("GET", "/api/dashboard/stats"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["properties"]["total"], json!(1));
    assert_eq!(body["data"]["maintenance"]["by_status"]["pending"], json!(1));
}

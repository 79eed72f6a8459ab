//! HTTP surface for the entity operations.
//!
//! Every handler answers with one envelope shape: `{"success": bool, ...}`
//! carrying `data`, `message`, or a per-field `errors` map. Validation maps
//! to 422, missing records to 404, and anything else to an opaque 500 whose
//! detail is only logged server-side.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Map, Value};

use super::domain::{EntityId, MaintenanceFilter};
use super::service::{OfficeError, OfficeService};
use super::store::{MaintenanceStore, PropertyStore, ResidentStore};

/// Router builder exposing the dashboard and entity CRUD endpoints.
pub fn office_router<S>(service: OfficeService<S>) -> Router
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    Router::new()
        .route("/api/dashboard/stats", get(dashboard_handler::<S>))
        .route(
            "/api/properties",
            get(list_properties_handler::<S>).post(create_property_handler::<S>),
        )
        .route(
            "/api/properties/:id",
            get(show_property_stub)
                .put(update_property_handler::<S>)
                .delete(delete_property_handler::<S>),
        )
        .route(
            "/api/residents",
            get(list_residents_handler::<S>).post(create_resident_handler::<S>),
        )
        .route(
            "/api/residents/:id",
            get(show_resident_stub)
                .put(update_resident_stub)
                .delete(delete_resident_handler::<S>),
        )
        .route(
            "/api/maintenance-requests",
            get(list_requests_handler::<S>).post(create_request_handler::<S>),
        )
        .route(
            "/api/maintenance-requests/:id",
            get(show_request_handler::<S>)
                .put(update_request_handler::<S>)
                .delete(delete_request_handler::<S>),
        )
        .with_state(service)
}

fn data_response(status: StatusCode, data: impl Serialize) -> Response {
    (status, Json(json!({ "success": true, "data": data }))).into_response()
}

fn message_data_response(status: StatusCode, message: &str, data: impl Serialize) -> Response {
    (
        status,
        Json(json!({ "success": true, "message": message, "data": data })),
    )
        .into_response()
}

fn message_response(message: String) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": message })),
    )
        .into_response()
}

fn error_response(operation: &'static str, error: OfficeError) -> Response {
    match error {
        OfficeError::Validation(failure) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "success": false,
                "message": "Validation failed",
                "errors": failure.errors,
            })),
        )
            .into_response(),
        OfficeError::NotFound(entity) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "message": format!("{entity} not found"),
            })),
        )
            .into_response(),
        other => {
            tracing::error!(operation, error = %other, "office operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "Internal server error",
                })),
            )
                .into_response()
        }
    }
}

fn object_body(body: Value) -> Map<String, Value> {
    match body {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

async fn dashboard_handler<S>(State(service): State<OfficeService<S>>) -> Response
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    match service.dashboard_stats() {
        Ok(stats) => data_response(StatusCode::OK, stats),
        Err(error) => error_response("dashboard_stats", error),
    }
}

// Properties

async fn list_properties_handler<S>(State(service): State<OfficeService<S>>) -> Response
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    match service.list_properties() {
        Ok(properties) => data_response(StatusCode::OK, properties),
        Err(error) => error_response("list_properties", error),
    }
}

async fn create_property_handler<S>(
    State(service): State<OfficeService<S>>,
    Json(body): Json<Value>,
) -> Response
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    match service.create_property(&object_body(body)) {
        Ok(property) => {
            message_data_response(StatusCode::CREATED, "Property created successfully", property)
        }
        Err(error) => error_response("create_property", error),
    }
}

/// Registered for route completeness; answers with an empty 200 until a
/// single-property view is needed.
async fn show_property_stub(Path(_id): Path<EntityId>) -> Response {
    StatusCode::OK.into_response()
}

async fn update_property_handler<S>(
    State(service): State<OfficeService<S>>,
    Path(id): Path<EntityId>,
    Json(body): Json<Value>,
) -> Response
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    match service.update_property(id, &object_body(body)) {
        Ok(property) => {
            message_data_response(StatusCode::OK, "Property updated successfully", property)
        }
        Err(error) => error_response("update_property", error),
    }
}

async fn delete_property_handler<S>(
    State(service): State<OfficeService<S>>,
    Path(id): Path<EntityId>,
) -> Response
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    match service.delete_property(id) {
        Ok(property) => message_response(format!(
            "Property '{}' has been deleted successfully",
            property.title
        )),
        Err(error) => error_response("delete_property", error),
    }
}

// Residents

async fn list_residents_handler<S>(State(service): State<OfficeService<S>>) -> Response
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    match service.list_residents() {
        Ok(residents) => data_response(StatusCode::OK, residents),
        Err(error) => error_response("list_residents", error),
    }
}

async fn create_resident_handler<S>(
    State(service): State<OfficeService<S>>,
    Json(body): Json<Value>,
) -> Response
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    match service.create_resident(&object_body(body)) {
        Ok(resident) => {
            message_data_response(StatusCode::CREATED, "Resident created successfully", resident)
        }
        Err(error) => error_response("create_resident", error),
    }
}

/// Registered for route completeness; answers with an empty 200.
async fn show_resident_stub(Path(_id): Path<EntityId>) -> Response {
    StatusCode::OK.into_response()
}

/// Registered for route completeness; answers with an empty 200.
async fn update_resident_stub(Path(_id): Path<EntityId>) -> Response {
    StatusCode::OK.into_response()
}

async fn delete_resident_handler<S>(
    State(service): State<OfficeService<S>>,
    Path(id): Path<EntityId>,
) -> Response
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    match service.delete_resident(id) {
        Ok(resident) => message_response(format!(
            "Resident '{}' has been deleted successfully",
            resident.full_name()
        )),
        Err(error) => error_response("delete_resident", error),
    }
}

// Maintenance requests

async fn list_requests_handler<S>(
    State(service): State<OfficeService<S>>,
    Query(filter): Query<MaintenanceFilter>,
) -> Response
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    match service.list_requests(&filter) {
        Ok(requests) => data_response(StatusCode::OK, requests),
        Err(error) => error_response("list_requests", error),
    }
}

async fn create_request_handler<S>(
    State(service): State<OfficeService<S>>,
    Json(body): Json<Value>,
) -> Response
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    match service.create_request(&object_body(body)) {
        Ok(request) => message_data_response(
            StatusCode::CREATED,
            "Maintenance request created successfully",
            request,
        ),
        Err(error) => error_response("create_request", error),
    }
}

async fn show_request_handler<S>(
    State(service): State<OfficeService<S>>,
    Path(id): Path<EntityId>,
) -> Response
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    match service.get_request(id) {
        Ok(request) => data_response(StatusCode::OK, request),
        Err(error) => error_response("show_request", error),
    }
}

async fn update_request_handler<S>(
    State(service): State<OfficeService<S>>,
    Path(id): Path<EntityId>,
    Json(body): Json<Value>,
) -> Response
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    match service.update_request(id, &object_body(body)) {
        Ok(request) => message_data_response(
            StatusCode::OK,
            "Maintenance request updated successfully",
            request,
        ),
        Err(error) => error_response("update_request", error),
    }
}

async fn delete_request_handler<S>(
    State(service): State<OfficeService<S>>,
    Path(id): Path<EntityId>,
) -> Response
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    match service.delete_request(id) {
        Ok(_) => message_response("Maintenance request deleted successfully".to_string()),
        Err(error) => error_response("delete_request", error),
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::{json, Map, Value};

use crate::office::domain::{MaintenanceView, Property, ResidentView};
use crate::office::service::OfficeService;
use crate::office::store::MemoryOffice;

pub(super) fn service() -> OfficeService<MemoryOffice> {
    OfficeService::new(Arc::new(MemoryOffice::new()))
}

pub(super) fn as_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {other:?}"),
    }
}

pub(super) fn property_payload() -> Map<String, Value> {
    as_map(json!({
        "title": "Sea Point Apartment",
        "description": "Two-bed apartment with mountain views",
        "type": "Apartment",
        "price": 2_450_000.0,
        "bedrooms": 2,
        "bathrooms": 1,
        "parking_spaces": 1,
        "size_sqm": 86.5,
        "address": "12 Beach Road",
        "city": "Cape Town",
        "province": "Western Cape",
        "postal_code": "8005",
        "latitude": -33.9249,
        "longitude": 18.4241,
        "status": "available",
        "is_featured": true,
    }))
}

pub(super) fn resident_payload(property_id: u64) -> Map<String, Value> {
    as_map(json!({
        "property_id": property_id,
        "first_name": "Thandi",
        "last_name": "Nkosi",
        "email": "thandi.nkosi@example.com",
        "phone": "+27821234567",
        "id_number": "9001015800087",
        "date_of_birth": "1990-01-01",
        "gender": "female",
        "occupation": "Engineer",
        "lease_start_date": "2025-02-01",
        "lease_end_date": "2026-01-31",
        "monthly_rent": 18500.0,
        "deposit_amount": 37000.0,
        "status": "active",
    }))
}

pub(super) fn maintenance_payload(property_id: u64, resident_id: u64) -> Map<String, Value> {
    as_map(json!({
        "property_id": property_id,
        "resident_id": resident_id,
        "title": "Geyser leaking",
        "description": "Hot water cylinder drips through the ceiling",
        "category": "plumbing",
        "priority": "high",
        "estimated_cost": 1500.0,
    }))
}

/// Service with one property, one resident, and their ids ready to use.
pub(super) fn seeded() -> (OfficeService<MemoryOffice>, Property, ResidentView) {
    let service = service();
    let property = service
        .create_property(&property_payload())
        .expect("property creates");
    let resident = service
        .create_resident(&resident_payload(property.id))
        .expect("resident creates");
    (service, property, resident)
}

pub(super) fn seeded_request(
    service: &OfficeService<MemoryOffice>,
    property_id: u64,
    resident_id: u64,
) -> MaintenanceView {
    service
        .create_request(&maintenance_payload(property_id, resident_id))
        .expect("request creates")
}

pub(super) fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub(super) fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

pub(super) async fn read_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("body is JSON")
}

//! Maintenance-request lifecycle and store cascade behavior, driven through
//! the public service facade without reaching into private modules.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use estate_office::office::{
    MaintenanceFilter, MaintenanceStatus, MemoryOffice, OfficeError, OfficeService,
};

fn office() -> OfficeService<MemoryOffice> {
    OfficeService::new(Arc::new(MemoryOffice::new()))
}

fn as_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {other:?}"),
    }
}

fn seed(service: &OfficeService<MemoryOffice>) -> (u64, u64, u64) {
    let property = service
        .create_property(&as_map(json!({
            "title": "Umhlanga Flat",
            "description": "Sea-facing two bedroom",
            "type": "Apartment",
            "price": 1_850_000.0,
            "bedrooms": 2,
            "bathrooms": 2,
            "size_sqm": 95,
            "address": "7 Lagoon Drive",
            "city": "Durban",
            "province": "KwaZulu-Natal",
            "postal_code": "4320",
        })))
        .expect("property creates");
    let resident = service
        .create_resident(&as_map(json!({
            "property_id": property.id,
            "first_name": "Ayesha",
            "last_name": "Khan",
            "email": "ayesha.khan@example.com",
            "id_number": "9204047000088",
            "date_of_birth": "1992-04-04",
            "gender": "female",
            "lease_start_date": "2024-11-01",
            "monthly_rent": 15500.0,
            "status": "active",
        })))
        .expect("resident creates");
    let request = service
        .create_request(&as_map(json!({
            "property_id": property.id,
            "resident_id": resident.resident.id,
            "title": "Aircon not cooling",
            "description": "Lounge unit blows warm air",
            "category": "hvac",
            "priority": "medium",
        })))
        .expect("request creates");
    (property.id, resident.resident.id, request.request.id)
}

#[test]
fn lifecycle_walk_stamps_each_stage_once() {
    let service = office();
    let (_, _, request_id) = seed(&service);

    let assigned = service
        .update_request(request_id, &as_map(json!({ "status": "assigned" })))
        .expect("assign");
    let assigned_at = assigned.request.assigned_at.expect("assigned_at stamped");

    let started = service
        .update_request(request_id, &as_map(json!({ "status": "in_progress" })))
        .expect("start");
    let started_at = started.request.started_at.expect("started_at stamped");
    assert!(started_at >= assigned_at);

    let held = service
        .update_request(request_id, &as_map(json!({ "status": "on_hold" })))
        .expect("hold");
    assert_eq!(held.request.started_at, Some(started_at));

    let resumed = service
        .update_request(request_id, &as_map(json!({ "status": "in_progress" })))
        .expect("resume");
    assert_eq!(resumed.request.started_at, Some(started_at));

    let completed = service
        .update_request(
            request_id,
            &as_map(json!({ "status": "completed", "actual_cost": 2300.0 })),
        )
        .expect("complete");
    let completed_at = completed.request.completed_at.expect("completed_at stamped");
    assert!(completed_at >= started_at);
    assert_eq!(completed.request.actual_cost, Some(2300.0));
    assert_eq!(completed.request.reported_at, assigned.request.reported_at);
}

#[test]
fn cancelling_derives_no_timestamp() {
    let service = office();
    let (_, _, request_id) = seed(&service);

    let cancelled = service
        .update_request(request_id, &as_map(json!({ "status": "cancelled" })))
        .expect("cancel");

    assert_eq!(cancelled.request.status, MaintenanceStatus::Cancelled);
    assert_eq!(cancelled.request.assigned_at, None);
    assert_eq!(cancelled.request.started_at, None);
    assert_eq!(cancelled.request.completed_at, None);
}

#[test]
fn resident_cascade_leaves_the_property_intact() {
    let service = office();
    let (property_id, resident_id, request_id) = seed(&service);

    service.delete_resident(resident_id).expect("resident deletes");

    assert!(matches!(
        service.get_request(request_id),
        Err(OfficeError::NotFound("Maintenance request"))
    ));
    let remaining = service.list_properties().expect("list");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, property_id);
}

#[test]
fn filters_compose_over_the_request_list() {
    let service = office();
    let (property_id, resident_id, first_request) = seed(&service);
    let second = service
        .create_request(&as_map(json!({
            "property_id": property_id,
            "resident_id": resident_id,
            "title": "Garden lights dead",
            "description": "Path lighting circuit tripped",
            "category": "electrical",
            "priority": "low",
        })))
        .expect("second request");

    let hvac_only = service
        .list_requests(&MaintenanceFilter {
            category: Some(estate_office::office::MaintenanceCategory::Hvac),
            property_id: Some(property_id),
            ..Default::default()
        })
        .expect("filtered list");

    assert_eq!(hvac_only.len(), 1);
    assert_eq!(hvac_only[0].request.id, first_request);
    assert_ne!(second.request.id, first_request);
}

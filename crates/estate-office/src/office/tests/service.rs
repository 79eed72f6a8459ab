use serde_json::json;

use super::common::*;
use crate::office::domain::{MaintenanceFilter, MaintenancePriority, MaintenanceStatus};
use crate::office::service::OfficeError;

#[test]
fn created_property_reads_back_unchanged() {
    let service = service();
    let created = service
        .create_property(&property_payload())
        .expect("property creates");

    let listed = service.list_properties().expect("list succeeds");
    assert_eq!(listed, vec![created.clone()]);
    assert_eq!(created.title, "Sea Point Apartment");
    assert_eq!(created.parking_spaces, 1);
    assert!(created.is_featured);
}

#[test]
fn properties_list_newest_first() {
    let service = service();
    let first = service.create_property(&property_payload()).expect("first");
    let mut second_payload = property_payload();
    second_payload.insert("title".to_string(), json!("Observatory Loft"));
    let second = service.create_property(&second_payload).expect("second");

    let listed = service.list_properties().expect("list succeeds");
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[test]
fn property_update_requires_the_full_field_set() {
    let service = service();
    let created = service.create_property(&property_payload()).expect("creates");

    let failure = service
        .update_property(created.id, &as_map(json!({ "title": "Renamed" })))
        .expect_err("partial body rejected");
    match failure {
        OfficeError::Validation(failure) => {
            assert!(failure.errors.contains_key("description"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn property_update_resets_absent_optionals_to_defaults() {
    let service = service();
    let created = service.create_property(&property_payload()).expect("creates");

    let mut full = property_payload();
    full.remove("parking_spaces");
    full.remove("is_featured");
    let updated = service.update_property(created.id, &full).expect("updates");

    assert_eq!(updated.parking_spaces, 0);
    assert!(!updated.is_featured);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
}

#[test]
fn missing_property_wins_over_invalid_payload() {
    let service = service();
    let result = service.update_property(99, &as_map(json!({})));
    assert!(matches!(result, Err(OfficeError::NotFound("Property"))));
}

#[test]
fn resident_create_attaches_owning_property() {
    let (_, property, resident) = seeded();
    assert_eq!(resident.resident.property_id, property.id);
    assert_eq!(resident.full_name, "Thandi Nkosi");
    assert_eq!(
        resident.property.as_ref().map(|p| p.id),
        Some(property.id)
    );
}

#[test]
fn resident_requires_existing_property() {
    let service = service();
    let failure = service
        .create_resident(&resident_payload(42))
        .expect_err("no such property");
    match failure {
        OfficeError::Validation(failure) => {
            assert_eq!(
                failure.errors["property_id"],
                vec!["The selected property_id is invalid."]
            );
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn duplicate_email_fails_on_that_field() {
    let (service, property, _) = seeded();

    let mut duplicate = resident_payload(property.id);
    duplicate.insert("id_number".to_string(), json!("8505057000083"));
    let failure = service
        .create_resident(&duplicate)
        .expect_err("email already taken");
    match failure {
        OfficeError::Validation(failure) => {
            assert_eq!(
                failure.errors["email"],
                vec!["The email has already been taken."]
            );
            assert!(!failure.errors.contains_key("id_number"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn duplicate_id_number_fails_on_that_field() {
    let (service, property, _) = seeded();

    let mut duplicate = resident_payload(property.id);
    duplicate.insert("email".to_string(), json!("second@example.com"));
    let failure = service
        .create_resident(&duplicate)
        .expect_err("id_number already taken");
    match failure {
        OfficeError::Validation(failure) => {
            assert_eq!(
                failure.errors["id_number"],
                vec!["The id_number has already been taken."]
            );
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn maintenance_resident_must_live_at_the_property() {
    let (service, property, _) = seeded();

    let mut other_property = property_payload();
    other_property.insert("title".to_string(), json!("Second Property"));
    let second = service.create_property(&other_property).expect("creates");
    let mut stranger = resident_payload(second.id);
    stranger.insert("email".to_string(), json!("stranger@example.com"));
    stranger.insert("id_number".to_string(), json!("7707077000086"));
    let stranger = service.create_resident(&stranger).expect("creates");

    let failure = service
        .create_request(&maintenance_payload(property.id, stranger.resident.id))
        .expect_err("resident lives elsewhere");
    match failure {
        OfficeError::Validation(failure) => {
            assert_eq!(
                failure.errors["resident_id"],
                vec!["The selected resident_id does not belong to the selected property_id."]
            );
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn maintenance_create_starts_pending_with_reported_at() {
    let (service, property, resident) = seeded();
    let view = seeded_request(&service, property.id, resident.resident.id);

    assert_eq!(view.request.status, MaintenanceStatus::Pending);
    assert_eq!(view.request.priority, MaintenancePriority::High);
    assert_eq!(view.request.assigned_at, None);
    assert_eq!(view.request.reported_at, view.request.created_at);
    assert_eq!(view.property.as_ref().map(|p| p.id), Some(property.id));
}

#[test]
fn maintenance_partial_update_preserves_untouched_fields() {
    let (service, property, resident) = seeded();
    let view = seeded_request(&service, property.id, resident.resident.id);

    let updated = service
        .update_request(
            view.request.id,
            &as_map(json!({ "assigned_to": "Jack's Plumbing", "status": "assigned" })),
        )
        .expect("updates");

    assert_eq!(updated.request.title, "Geyser leaking");
    assert_eq!(updated.request.estimated_cost, Some(1500.0));
    assert_eq!(updated.request.assigned_to.as_deref(), Some("Jack's Plumbing"));
    assert_eq!(updated.request.status, MaintenanceStatus::Assigned);
}

#[test]
fn maintenance_list_filters_and_orders_by_reported_at() {
    let (service, property, resident) = seeded();
    let first = seeded_request(&service, property.id, resident.resident.id);
    let second = seeded_request(&service, property.id, resident.resident.id);
    service
        .update_request(second.request.id, &as_map(json!({ "status": "assigned" })))
        .expect("updates");

    let filter = MaintenanceFilter {
        status: Some(MaintenanceStatus::Pending),
        ..Default::default()
    };
    let pending = service.list_requests(&filter).expect("filtered list");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].request.id, first.request.id);

    let all = service
        .list_requests(&MaintenanceFilter::default())
        .expect("full list");
    assert_eq!(all.len(), 2);
    assert!(all[0].request.reported_at >= all[1].request.reported_at);
    assert_eq!(all[0].request.id, second.request.id);
}

#[test]
fn deleting_a_property_cascades_to_dependents() {
    let (service, property, resident) = seeded();
    seeded_request(&service, property.id, resident.resident.id);

    service.delete_property(property.id).expect("deletes");

    assert!(service.list_properties().expect("list").is_empty());
    assert!(service.list_residents().expect("list").is_empty());
    assert!(service
        .list_requests(&MaintenanceFilter::default())
        .expect("list")
        .is_empty());
}

#[test]
fn deleting_a_resident_cascades_to_their_requests() {
    let (service, property, resident) = seeded();
    seeded_request(&service, property.id, resident.resident.id);

    service.delete_resident(resident.resident.id).expect("deletes");

    assert_eq!(service.list_properties().expect("list").len(), 1);
    assert!(service
        .list_requests(&MaintenanceFilter::default())
        .expect("list")
        .is_empty());
}

#[test]
fn delete_missing_records_report_not_found() {
    let service = service();
    assert!(matches!(
        service.delete_property(7),
        Err(OfficeError::NotFound("Property"))
    ));
    assert!(matches!(
        service.delete_resident(7),
        Err(OfficeError::NotFound("Resident"))
    ));
    assert!(matches!(
        service.delete_request(7),
        Err(OfficeError::NotFound("Maintenance request"))
    ));
}

//! Entity repositories and the in-memory backing store.
//!
//! One trait per entity so the service layer can be exercised in isolation;
//! a relational backend would implement the same traits. [`MemoryOffice`]
//! implements all three over shared tables, which is what lets a property
//! delete cascade across entities. Concurrent updates to the same id are
//! last-writer-wins; no version token exists.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::Utc;

use super::domain::{
    EntityId, MaintenanceFilter, MaintenancePatch, MaintenanceRequest, MaintenanceStatus,
    NewMaintenanceRequest, NewProperty, NewResident, Property, Resident,
};

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub trait PropertyStore: Send + Sync {
    fn insert_property(&self, new: NewProperty) -> Result<Property, StoreError>;
    fn property(&self, id: EntityId) -> Result<Option<Property>, StoreError>;
    /// All properties, newest-created first.
    fn properties(&self) -> Result<Vec<Property>, StoreError>;
    fn update_property(&self, id: EntityId, new: NewProperty)
        -> Result<Option<Property>, StoreError>;
    /// Deletes the property and every resident and maintenance request that
    /// references it. Returns the deleted record.
    fn delete_property(&self, id: EntityId) -> Result<Option<Property>, StoreError>;
}

pub trait ResidentStore: Send + Sync {
    fn insert_resident(&self, new: NewResident) -> Result<Resident, StoreError>;
    fn resident(&self, id: EntityId) -> Result<Option<Resident>, StoreError>;
    /// All residents, newest-created first.
    fn residents(&self) -> Result<Vec<Resident>, StoreError>;
    fn email_taken(&self, email: &str) -> Result<bool, StoreError>;
    fn id_number_taken(&self, id_number: &str) -> Result<bool, StoreError>;
    /// Deletes the resident and every maintenance request that references
    /// it. Returns the deleted record.
    fn delete_resident(&self, id: EntityId) -> Result<Option<Resident>, StoreError>;
}

pub trait MaintenanceStore: Send + Sync {
    /// Inserts a new request: status starts `pending` and `reported_at` is
    /// stamped with the creation time, regardless of client input.
    fn insert_request(&self, new: NewMaintenanceRequest)
        -> Result<MaintenanceRequest, StoreError>;
    fn request(&self, id: EntityId) -> Result<Option<MaintenanceRequest>, StoreError>;
    /// Matching requests ordered by `reported_at` descending.
    fn requests(&self, filter: &MaintenanceFilter) -> Result<Vec<MaintenanceRequest>, StoreError>;
    fn update_request(
        &self,
        id: EntityId,
        patch: MaintenancePatch,
    ) -> Result<Option<MaintenanceRequest>, StoreError>;
    fn delete_request(&self, id: EntityId) -> Result<Option<MaintenanceRequest>, StoreError>;
}

#[derive(Default)]
struct OfficeTables {
    properties: HashMap<EntityId, Property>,
    residents: HashMap<EntityId, Resident>,
    requests: HashMap<EntityId, MaintenanceRequest>,
}

/// In-memory store backing the service and the demo CLI.
#[derive(Default)]
pub struct MemoryOffice {
    tables: Mutex<OfficeTables>,
    property_seq: AtomicU64,
    resident_seq: AtomicU64,
    request_seq: AtomicU64,
}

impl MemoryOffice {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(seq: &AtomicU64) -> EntityId {
        seq.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl PropertyStore for MemoryOffice {
    fn insert_property(&self, new: NewProperty) -> Result<Property, StoreError> {
        let now = Utc::now();
        let record = Property {
            id: Self::next_id(&self.property_seq),
            title: new.title,
            description: new.description,
            property_type: new.property_type,
            price: new.price,
            bedrooms: new.bedrooms,
            bathrooms: new.bathrooms,
            parking_spaces: new.parking_spaces,
            size_sqm: new.size_sqm,
            address: new.address,
            city: new.city,
            province: new.province,
            postal_code: new.postal_code,
            latitude: new.latitude,
            longitude: new.longitude,
            status: new.status,
            is_featured: new.is_featured,
            created_at: now,
            updated_at: now,
        };
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        tables.properties.insert(record.id, record.clone());
        Ok(record)
    }

    fn property(&self, id: EntityId) -> Result<Option<Property>, StoreError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.properties.get(&id).cloned())
    }

    fn properties(&self) -> Result<Vec<Property>, StoreError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        let mut records: Vec<Property> = tables.properties.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    fn update_property(
        &self,
        id: EntityId,
        new: NewProperty,
    ) -> Result<Option<Property>, StoreError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let Some(record) = tables.properties.get_mut(&id) else {
            return Ok(None);
        };
        record.title = new.title;
        record.description = new.description;
        record.property_type = new.property_type;
        record.price = new.price;
        record.bedrooms = new.bedrooms;
        record.bathrooms = new.bathrooms;
        record.parking_spaces = new.parking_spaces;
        record.size_sqm = new.size_sqm;
        record.address = new.address;
        record.city = new.city;
        record.province = new.province;
        record.postal_code = new.postal_code;
        record.latitude = new.latitude;
        record.longitude = new.longitude;
        record.status = new.status;
        record.is_featured = new.is_featured;
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    fn delete_property(&self, id: EntityId) -> Result<Option<Property>, StoreError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let Some(record) = tables.properties.remove(&id) else {
            return Ok(None);
        };
        tables.residents.retain(|_, resident| resident.property_id != id);
        tables.requests.retain(|_, request| request.property_id != id);
        Ok(Some(record))
    }
}

impl ResidentStore for MemoryOffice {
    fn insert_resident(&self, new: NewResident) -> Result<Resident, StoreError> {
        let now = Utc::now();
        let record = Resident {
            id: Self::next_id(&self.resident_seq),
            property_id: new.property_id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            id_number: new.id_number,
            date_of_birth: new.date_of_birth,
            gender: new.gender,
            occupation: new.occupation,
            emergency_contact_name: new.emergency_contact_name,
            emergency_contact_phone: new.emergency_contact_phone,
            lease_start_date: new.lease_start_date,
            lease_end_date: new.lease_end_date,
            monthly_rent: new.monthly_rent,
            deposit_amount: new.deposit_amount,
            status: new.status,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        };
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        tables.residents.insert(record.id, record.clone());
        Ok(record)
    }

    fn resident(&self, id: EntityId) -> Result<Option<Resident>, StoreError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.residents.get(&id).cloned())
    }

    fn residents(&self) -> Result<Vec<Resident>, StoreError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        let mut records: Vec<Resident> = tables.residents.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    fn email_taken(&self, email: &str) -> Result<bool, StoreError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables
            .residents
            .values()
            .any(|resident| resident.email.eq_ignore_ascii_case(email)))
    }

    fn id_number_taken(&self, id_number: &str) -> Result<bool, StoreError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables
            .residents
            .values()
            .any(|resident| resident.id_number == id_number))
    }

    fn delete_resident(&self, id: EntityId) -> Result<Option<Resident>, StoreError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let Some(record) = tables.residents.remove(&id) else {
            return Ok(None);
        };
        tables.requests.retain(|_, request| request.resident_id != id);
        Ok(Some(record))
    }
}

impl MaintenanceStore for MemoryOffice {
    fn insert_request(
        &self,
        new: NewMaintenanceRequest,
    ) -> Result<MaintenanceRequest, StoreError> {
        let now = Utc::now();
        let record = MaintenanceRequest {
            id: Self::next_id(&self.request_seq),
            property_id: new.property_id,
            resident_id: new.resident_id,
            title: new.title,
            description: new.description,
            category: new.category,
            priority: new.priority,
            status: MaintenanceStatus::Pending,
            estimated_cost: new.estimated_cost,
            actual_cost: None,
            assigned_to: None,
            notes: new.notes,
            reported_at: now,
            assigned_at: None,
            started_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        tables.requests.insert(record.id, record.clone());
        Ok(record)
    }

    fn request(&self, id: EntityId) -> Result<Option<MaintenanceRequest>, StoreError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.requests.get(&id).cloned())
    }

    fn requests(&self, filter: &MaintenanceFilter) -> Result<Vec<MaintenanceRequest>, StoreError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        let mut records: Vec<MaintenanceRequest> = tables
            .requests
            .values()
            .filter(|request| filter.status.is_none_or(|status| request.status == status))
            .filter(|request| {
                filter
                    .priority
                    .is_none_or(|priority| request.priority == priority)
            })
            .filter(|request| {
                filter
                    .category
                    .is_none_or(|category| request.category == category)
            })
            .filter(|request| {
                filter
                    .property_id
                    .is_none_or(|property_id| request.property_id == property_id)
            })
            .cloned()
            .collect();
        records.sort_by(|a, b| b.reported_at.cmp(&a.reported_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    fn update_request(
        &self,
        id: EntityId,
        patch: MaintenancePatch,
    ) -> Result<Option<MaintenanceRequest>, StoreError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let Some(record) = tables.requests.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            record.title = title;
        }
        if let Some(description) = patch.description {
            record.description = description;
        }
        if let Some(category) = patch.category {
            record.category = category;
        }
        if let Some(priority) = patch.priority {
            record.priority = priority;
        }
        if let Some(status) = patch.status {
            record.status = status;
        }
        if let Some(estimated_cost) = patch.estimated_cost {
            record.estimated_cost = estimated_cost;
        }
        if let Some(actual_cost) = patch.actual_cost {
            record.actual_cost = actual_cost;
        }
        if let Some(assigned_to) = patch.assigned_to {
            record.assigned_to = assigned_to;
        }
        if let Some(notes) = patch.notes {
            record.notes = notes;
        }
        if let Some(assigned_at) = patch.assigned_at {
            record.assigned_at = Some(assigned_at);
        }
        if let Some(started_at) = patch.started_at {
            record.started_at = Some(started_at);
        }
        if let Some(completed_at) = patch.completed_at {
            record.completed_at = Some(completed_at);
        }
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    fn delete_request(&self, id: EntityId) -> Result<Option<MaintenanceRequest>, StoreError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.requests.remove(&id))
    }
}

//! Service facade composing the store, validation layer, lifecycle engine,
//! and dashboard aggregation. Both the HTTP routers and the demo CLI drive
//! the office exclusively through this type.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};

use super::dashboard::{self, DashboardStats};
use super::domain::{
    EntityId, MaintenanceFilter, MaintenanceRequest, MaintenanceView, Property, Resident,
    ResidentView,
};
use super::lifecycle;
use super::store::{MaintenanceStore, PropertyStore, ResidentStore, StoreError};
use super::validate::{self, FieldErrors, ValidationFailure};

/// Error raised by office operations.
#[derive(Debug, thiserror::Error)]
pub enum OfficeError {
    #[error("validation failed")]
    Validation(#[from] ValidationFailure),
    /// Carries the entity display name for the client-facing message.
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct OfficeService<S> {
    store: Arc<S>,
}

impl<S> Clone for OfficeService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S> OfficeService<S>
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // Properties

    pub fn list_properties(&self) -> Result<Vec<Property>, OfficeError> {
        Ok(self.store.properties()?)
    }

    pub fn create_property(&self, input: &Map<String, Value>) -> Result<Property, OfficeError> {
        let new = validate::validate_property(input)?;
        Ok(self.store.insert_property(new)?)
    }

    /// Full-field update: the same rule set as create, absent optional
    /// fields reset to their defaults. Missing record wins over validation.
    pub fn update_property(
        &self,
        id: EntityId,
        input: &Map<String, Value>,
    ) -> Result<Property, OfficeError> {
        if self.store.property(id)?.is_none() {
            return Err(OfficeError::NotFound("Property"));
        }
        let new = validate::validate_property(input)?;
        self.store
            .update_property(id, new)?
            .ok_or(OfficeError::NotFound("Property"))
    }

    /// Deletes the property and, by cascade, its residents and maintenance
    /// requests. Returns the deleted record so callers can name it.
    pub fn delete_property(&self, id: EntityId) -> Result<Property, OfficeError> {
        self.store
            .delete_property(id)?
            .ok_or(OfficeError::NotFound("Property"))
    }

    // Residents

    pub fn list_residents(&self) -> Result<Vec<ResidentView>, OfficeError> {
        let residents = self.store.residents()?;
        residents
            .into_iter()
            .map(|resident| {
                let property = self.store.property(resident.property_id)?;
                Ok(ResidentView::with_property(resident, property))
            })
            .collect()
    }

    /// Validates field rules first, then the store-backed rules: the owning
    /// property must exist and email/id_number must be unused.
    pub fn create_resident(&self, input: &Map<String, Value>) -> Result<ResidentView, OfficeError> {
        let new = validate::validate_resident(input)?;

        let mut errors = FieldErrors::new();
        let property = self.store.property(new.property_id)?;
        if property.is_none() {
            errors
                .entry("property_id".to_string())
                .or_default()
                .push("The selected property_id is invalid.".to_string());
        }
        if self.store.email_taken(&new.email)? {
            errors
                .entry("email".to_string())
                .or_default()
                .push("The email has already been taken.".to_string());
        }
        if self.store.id_number_taken(&new.id_number)? {
            errors
                .entry("id_number".to_string())
                .or_default()
                .push("The id_number has already been taken.".to_string());
        }
        if !errors.is_empty() {
            return Err(ValidationFailure { errors }.into());
        }

        let resident = self.store.insert_resident(new)?;
        Ok(ResidentView::with_property(resident, property))
    }

    /// Deletes the resident and, by cascade, its maintenance requests.
    pub fn delete_resident(&self, id: EntityId) -> Result<Resident, OfficeError> {
        self.store
            .delete_resident(id)?
            .ok_or(OfficeError::NotFound("Resident"))
    }

    // Maintenance requests

    pub fn list_requests(
        &self,
        filter: &MaintenanceFilter,
    ) -> Result<Vec<MaintenanceView>, OfficeError> {
        let requests = self.store.requests(filter)?;
        requests
            .into_iter()
            .map(|request| self.request_view(request))
            .collect()
    }

    pub fn get_request(&self, id: EntityId) -> Result<MaintenanceView, OfficeError> {
        let request = self
            .store
            .request(id)?
            .ok_or(OfficeError::NotFound("Maintenance request"))?;
        self.request_view(request)
    }

    /// Creates a request in `pending` with `reported_at` stamped at creation
    /// time. The named resident must belong to the named property.
    pub fn create_request(
        &self,
        input: &Map<String, Value>,
    ) -> Result<MaintenanceView, OfficeError> {
        let new = validate::validate_maintenance_create(input)?;

        let mut errors = FieldErrors::new();
        let property = self.store.property(new.property_id)?;
        if property.is_none() {
            errors
                .entry("property_id".to_string())
                .or_default()
                .push("The selected property_id is invalid.".to_string());
        }
        let resident = self.store.resident(new.resident_id)?;
        match &resident {
            None => {
                errors
                    .entry("resident_id".to_string())
                    .or_default()
                    .push("The selected resident_id is invalid.".to_string());
            }
            Some(resident) if property.is_some() && resident.property_id != new.property_id => {
                errors
                    .entry("resident_id".to_string())
                    .or_default()
                    .push(
                        "The selected resident_id does not belong to the selected property_id."
                            .to_string(),
                    );
            }
            Some(_) => {}
        }
        if !errors.is_empty() {
            return Err(ValidationFailure { errors }.into());
        }

        let request = self.store.insert_request(new)?;
        Ok(MaintenanceView {
            request,
            property,
            resident: resident.map(ResidentView::new),
        })
    }

    /// Partial update. A supplied status runs through the lifecycle engine
    /// against the previously stored record before the patch is applied.
    pub fn update_request(
        &self,
        id: EntityId,
        input: &Map<String, Value>,
    ) -> Result<MaintenanceView, OfficeError> {
        let previous = self
            .store
            .request(id)?
            .ok_or(OfficeError::NotFound("Maintenance request"))?;

        let mut patch = validate::validate_maintenance_update(input)?;
        lifecycle::apply_transition(&previous, &mut patch, Utc::now());

        let updated = self
            .store
            .update_request(id, patch)?
            .ok_or(OfficeError::NotFound("Maintenance request"))?;
        self.request_view(updated)
    }

    pub fn delete_request(&self, id: EntityId) -> Result<MaintenanceRequest, OfficeError> {
        self.store
            .delete_request(id)?
            .ok_or(OfficeError::NotFound("Maintenance request"))
    }

    // Dashboard

    pub fn dashboard_stats(&self) -> Result<DashboardStats, OfficeError> {
        Ok(dashboard::snapshot(self.store.as_ref())?)
    }

    fn request_view(&self, request: MaintenanceRequest) -> Result<MaintenanceView, OfficeError> {
        let property = self.store.property(request.property_id)?;
        let resident = self
            .store
            .resident(request.resident_id)?
            .map(ResidentView::new);
        Ok(MaintenanceView {
            request,
            property,
            resident,
        })
    }
}

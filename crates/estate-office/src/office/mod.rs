//! The back-office domain: entities, validation, persistence traits, the
//! maintenance lifecycle, dashboard aggregation, and the HTTP surface.

pub mod auth;
pub mod dashboard;
pub mod domain;
pub mod lifecycle;
pub mod router;
pub mod service;
pub mod store;
pub mod validate;

#[cfg(test)]
mod tests;

pub use auth::{auth_router, require_session, SessionStore, SessionUser, SESSION_COOKIE};
pub use dashboard::{DashboardStats, Histogram, MaintenanceStats, PropertyStats, ResidentStats};
pub use domain::{
    EntityId, Gender, MaintenanceCategory, MaintenanceFilter, MaintenancePatch,
    MaintenancePriority, MaintenanceRequest, MaintenanceStatus, MaintenanceView,
    NewMaintenanceRequest, NewProperty, NewResident, Property, PropertyStatus, Resident,
    ResidentStatus, ResidentView,
};
pub use router::office_router;
pub use service::{OfficeError, OfficeService};
pub use store::{
    MaintenanceStore, MemoryOffice, PropertyStore, ResidentStore, StoreError,
};
pub use validate::{FieldErrors, ValidationFailure};

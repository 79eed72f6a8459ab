//! Dashboard aggregation: totals, histograms, and recent-activity lists
//! computed across all three entities.
//!
//! The snapshot is rebuilt from the store on every call. The reads are not
//! wrapped in any isolation guarantee, so a write landing between two of
//! them can skew one figure against another; for an administrative summary
//! that is acceptable.

use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{
    MaintenanceFilter, MaintenancePriority, MaintenanceView, Property, ResidentView,
};
use super::store::{MaintenanceStore, PropertyStore, ResidentStore, StoreError};

const RECENT_LIMIT: usize = 5;

/// Count per status/priority value; only values that occur are materialized.
pub type Histogram = BTreeMap<String, u64>;

#[derive(Debug, Clone, Serialize)]
pub struct PropertyStats {
    pub total: u64,
    pub by_status: Histogram,
    pub recent: Vec<Property>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResidentStats {
    pub total: u64,
    pub by_status: Histogram,
    pub recent: Vec<ResidentView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceStats {
    pub total: u64,
    pub by_status: Histogram,
    pub by_priority: Histogram,
    pub urgent_open: u64,
    pub recent: Vec<MaintenanceView>,
}

/// Full dashboard snapshot as served by `/api/dashboard/stats`.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub properties: PropertyStats,
    pub residents: ResidentStats,
    pub maintenance: MaintenanceStats,
}

/// Computes the snapshot from current store state.
pub fn snapshot<S>(store: &S) -> Result<DashboardStats, StoreError>
where
    S: PropertyStore + ResidentStore + MaintenanceStore,
{
    let properties = store.properties()?;
    let mut properties_by_status = Histogram::new();
    for property in &properties {
        *properties_by_status
            .entry(property.status.as_str().to_string())
            .or_default() += 1;
    }

    let residents = store.residents()?;
    let mut residents_by_status = Histogram::new();
    for resident in &residents {
        *residents_by_status
            .entry(resident.status.as_str().to_string())
            .or_default() += 1;
    }

    let requests = store.requests(&MaintenanceFilter::default())?;
    let mut requests_by_status = Histogram::new();
    let mut requests_by_priority = Histogram::new();
    let mut urgent_open = 0;
    for request in &requests {
        *requests_by_status
            .entry(request.status.as_str().to_string())
            .or_default() += 1;
        *requests_by_priority
            .entry(request.priority.as_str().to_string())
            .or_default() += 1;
        if request.priority == MaintenancePriority::Urgent && request.status.is_open() {
            urgent_open += 1;
        }
    }

    let recent_residents = residents
        .iter()
        .take(RECENT_LIMIT)
        .map(|resident| {
            let property = store.property(resident.property_id)?;
            Ok(ResidentView::with_property(resident.clone(), property))
        })
        .collect::<Result<Vec<_>, StoreError>>()?;

    let recent_requests = requests
        .iter()
        .take(RECENT_LIMIT)
        .map(|request| {
            let property = store.property(request.property_id)?;
            let resident = store
                .resident(request.resident_id)?
                .map(ResidentView::new);
            Ok(MaintenanceView {
                request: request.clone(),
                property,
                resident,
            })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;

    Ok(DashboardStats {
        properties: PropertyStats {
            total: properties.len() as u64,
            by_status: properties_by_status,
            recent: properties.into_iter().take(RECENT_LIMIT).collect(),
        },
        residents: ResidentStats {
            total: residents.len() as u64,
            by_status: residents_by_status,
            recent: recent_residents,
        },
        maintenance: MaintenanceStats {
            total: requests.len() as u64,
            by_status: requests_by_status,
            by_priority: requests_by_priority,
            urgent_open,
            recent: recent_requests,
        },
    })
}

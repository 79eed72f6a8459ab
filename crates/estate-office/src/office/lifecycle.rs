//! Timestamp side-effects of maintenance status transitions.
//!
//! No transition table is enforced: any status may follow any other, and a
//! backward move (completed back to pending, say) never clears a timestamp
//! that was already earned. Each timestamp is set at most once, so repeating
//! a transition is a no-op.

use chrono::{DateTime, Utc};

use super::domain::{MaintenancePatch, MaintenanceRequest, MaintenanceStatus};

/// Fills the patch's derived timestamps for a status change, evaluated
/// against the previously stored record.
pub fn apply_transition(
    previous: &MaintenanceRequest,
    patch: &mut MaintenancePatch,
    now: DateTime<Utc>,
) {
    let Some(next) = patch.status else {
        return;
    };

    match next {
        MaintenanceStatus::Assigned
            if previous.status == MaintenanceStatus::Pending && previous.assigned_at.is_none() =>
        {
            patch.assigned_at = Some(now);
        }
        MaintenanceStatus::InProgress
            if matches!(
                previous.status,
                MaintenanceStatus::Assigned | MaintenanceStatus::OnHold
            ) && previous.started_at.is_none() =>
        {
            patch.started_at = Some(now);
        }
        MaintenanceStatus::Completed
            if previous.status != MaintenanceStatus::Completed
                && previous.completed_at.is_none() =>
        {
            patch.completed_at = Some(now);
        }
        _ => {}
    }
}

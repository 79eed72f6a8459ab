use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the entity store at insertion time.
pub type EntityId = u64;

/// Marketing status of a property listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Available,
    Sold,
    Rented,
    UnderOffer,
}

impl PropertyStatus {
    pub const ALLOWED: &'static [&'static str] = &["available", "sold", "rented", "under_offer"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Sold => "sold",
            Self::Rented => "rented",
            Self::UnderOffer => "under_offer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(Self::Available),
            "sold" => Some(Self::Sold),
            "rented" => Some(Self::Rented),
            "under_offer" => Some(Self::UnderOffer),
            _ => None,
        }
    }
}

/// Tenancy status of a resident record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidentStatus {
    Active,
    Inactive,
    Pending,
    Terminated,
}

impl ResidentStatus {
    pub const ALLOWED: &'static [&'static str] = &["active", "inactive", "pending", "terminated"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
            Self::Terminated => "terminated",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "pending" => Some(Self::Pending),
            "terminated" => Some(Self::Terminated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALLOWED: &'static [&'static str] = &["male", "female", "other"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Trade category of a maintenance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceCategory {
    Plumbing,
    Electrical,
    Hvac,
    Appliances,
    Structural,
    Painting,
    Landscaping,
    Security,
    Cleaning,
    Other,
}

impl MaintenanceCategory {
    pub const ALLOWED: &'static [&'static str] = &[
        "plumbing",
        "electrical",
        "hvac",
        "appliances",
        "structural",
        "painting",
        "landscaping",
        "security",
        "cleaning",
        "other",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plumbing => "plumbing",
            Self::Electrical => "electrical",
            Self::Hvac => "hvac",
            Self::Appliances => "appliances",
            Self::Structural => "structural",
            Self::Painting => "painting",
            Self::Landscaping => "landscaping",
            Self::Security => "security",
            Self::Cleaning => "cleaning",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "plumbing" => Some(Self::Plumbing),
            "electrical" => Some(Self::Electrical),
            "hvac" => Some(Self::Hvac),
            "appliances" => Some(Self::Appliances),
            "structural" => Some(Self::Structural),
            "painting" => Some(Self::Painting),
            "landscaping" => Some(Self::Landscaping),
            "security" => Some(Self::Security),
            "cleaning" => Some(Self::Cleaning),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenancePriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl MaintenancePriority {
    pub const ALLOWED: &'static [&'static str] = &["low", "medium", "high", "urgent"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

/// Workflow status of a maintenance request. The lifecycle engine derives
/// timestamps from transitions but deliberately enforces no transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Pending,
    Assigned,
    InProgress,
    OnHold,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    pub const ALLOWED: &'static [&'static str] = &[
        "pending",
        "assigned",
        "in_progress",
        "on_hold",
        "completed",
        "cancelled",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "assigned" => Some(Self::Assigned),
            "in_progress" => Some(Self::InProgress),
            "on_hold" => Some(Self::OnHold),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Statuses counted as "open" for the urgent dashboard figure.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Assigned | Self::InProgress)
    }
}

/// A property listing owned by the back office. Owns residents and
/// maintenance requests; deleting it cascades to both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking_spaces: u32,
    pub size_sqm: f64,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: PropertyStatus,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Normalized property payload produced by full validation. Property create
/// and update both require the complete field set, so one shape serves both.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub property_type: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking_spaces: u32,
    pub size_sqm: f64,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: PropertyStatus,
    pub is_featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    pub id: EntityId,
    pub property_id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub id_number: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub occupation: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub lease_start_date: NaiveDate,
    pub lease_end_date: Option<NaiveDate>,
    pub monthly_rent: f64,
    pub deposit_amount: Option<f64>,
    pub status: ResidentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resident {
    /// Computed display name, never stored.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Normalized resident payload produced by full validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResident {
    pub property_id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub id_number: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub occupation: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub lease_start_date: NaiveDate,
    pub lease_end_date: Option<NaiveDate>,
    pub monthly_rent: f64,
    pub deposit_amount: Option<f64>,
    pub status: ResidentStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    pub id: EntityId,
    pub property_id: EntityId,
    pub resident_id: EntityId,
    pub title: String,
    pub description: String,
    pub category: MaintenanceCategory,
    pub priority: MaintenancePriority,
    pub status: MaintenanceStatus,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    pub reported_at: DateTime<Utc>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Normalized maintenance-request payload produced by full validation.
/// Status and `reported_at` are assigned by the service, never by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenanceRequest {
    pub property_id: EntityId,
    pub resident_id: EntityId,
    pub title: String,
    pub description: String,
    pub category: MaintenanceCategory,
    pub priority: MaintenancePriority,
    pub estimated_cost: Option<f64>,
    pub notes: Option<String>,
}

/// Partial maintenance update. Outer `Option` means the field was supplied;
/// nullable fields carry a second `Option` so an explicit null clears the
/// stored value. Lifecycle timestamps are filled in by the lifecycle engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenancePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<MaintenanceCategory>,
    pub priority: Option<MaintenancePriority>,
    pub status: Option<MaintenanceStatus>,
    pub estimated_cost: Option<Option<f64>>,
    pub actual_cost: Option<Option<f64>>,
    pub assigned_to: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Resident with its computed name and, when loaded, the owning property.
#[derive(Debug, Clone, Serialize)]
pub struct ResidentView {
    #[serde(flatten)]
    pub resident: Resident,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<Property>,
}

impl ResidentView {
    pub fn new(resident: Resident) -> Self {
        let full_name = resident.full_name();
        Self {
            resident,
            full_name,
            property: None,
        }
    }

    pub fn with_property(resident: Resident, property: Option<Property>) -> Self {
        let mut view = Self::new(resident);
        view.property = property;
        view
    }
}

/// Maintenance request with its parents attached, as returned by list/show.
#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceView {
    #[serde(flatten)]
    pub request: MaintenanceRequest,
    pub property: Option<Property>,
    pub resident: Option<ResidentView>,
}

/// Optional filters accepted by the maintenance-request listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct MaintenanceFilter {
    pub status: Option<MaintenanceStatus>,
    pub priority: Option<MaintenancePriority>,
    pub category: Option<MaintenanceCategory>,
    pub property_id: Option<EntityId>,
}

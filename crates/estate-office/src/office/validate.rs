//! Declarative field validation over JSON input.
//!
//! Each entity has one rule pass that extracts and checks every field,
//! accumulating all violations into a per-field error map instead of failing
//! on the first. Create paths run the full rule set (every required field
//! must be present); the maintenance update path checks only supplied fields.
//! Uniqueness and referential rules need store state and live in the service,
//! which merges them into the same failure shape.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use super::domain::{
    EntityId, Gender, MaintenanceCategory, MaintenancePatch, MaintenancePriority,
    MaintenanceStatus, NewMaintenanceRequest, NewProperty, NewResident, PropertyStatus,
    ResidentStatus,
};

/// Per-field violation map, every message for every failed rule.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("validation failed")]
pub struct ValidationFailure {
    pub errors: FieldErrors,
}

/// Walks one entity's rule table against a JSON object, collecting every
/// violation. Required extractors return a placeholder on failure; the
/// recorded error guarantees `finish` rejects the record before the
/// placeholder can escape.
struct Checker<'a> {
    input: &'a Map<String, Value>,
    errors: FieldErrors,
}

impl<'a> Checker<'a> {
    fn new(input: &'a Map<String, Value>) -> Self {
        Self {
            input,
            errors: FieldErrors::new(),
        }
    }

    fn fail(&mut self, field: &str, message: String) {
        self.errors.entry(field.to_string()).or_default().push(message);
    }

    fn supplied(&self, field: &str) -> bool {
        self.input.contains_key(field)
    }

    fn finish(self) -> Result<(), ValidationFailure> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure {
                errors: self.errors,
            })
        }
    }

    fn required_string(&mut self, field: &str, max: Option<usize>) -> String {
        match self.input.get(field) {
            None | Some(Value::Null) => {
                self.fail(field, format!("The {field} field is required."));
                String::new()
            }
            Some(Value::String(value)) => {
                if value.trim().is_empty() {
                    self.fail(field, format!("The {field} field is required."));
                    return String::new();
                }
                if let Some(max) = max {
                    if value.chars().count() > max {
                        self.fail(
                            field,
                            format!(
                                "The {field} field must not be greater than {max} characters."
                            ),
                        );
                    }
                }
                value.clone()
            }
            Some(_) => {
                self.fail(field, format!("The {field} field must be a string."));
                String::new()
            }
        }
    }

    fn optional_string(&mut self, field: &str, max: Option<usize>) -> Option<String> {
        match self.input.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(value)) => {
                if let Some(max) = max {
                    if value.chars().count() > max {
                        self.fail(
                            field,
                            format!(
                                "The {field} field must not be greater than {max} characters."
                            ),
                        );
                    }
                }
                Some(value.clone())
            }
            Some(_) => {
                self.fail(field, format!("The {field} field must be a string."));
                None
            }
        }
    }

    fn required_number(&mut self, field: &str, min: Option<f64>) -> f64 {
        match self.input.get(field) {
            None | Some(Value::Null) => {
                self.fail(field, format!("The {field} field is required."));
                0.0
            }
            Some(value) => self.number_value(field, value, min).unwrap_or(0.0),
        }
    }

    fn optional_number(&mut self, field: &str, min: Option<f64>) -> Option<f64> {
        match self.input.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.number_value(field, value, min),
        }
    }

    fn number_value(&mut self, field: &str, value: &Value, min: Option<f64>) -> Option<f64> {
        let Some(number) = value.as_f64() else {
            self.fail(field, format!("The {field} field must be a number."));
            return None;
        };
        if let Some(min) = min {
            if number < min {
                self.fail(field, format!("The {field} field must be at least {min}."));
                return None;
            }
        }
        Some(number)
    }

    fn required_integer(&mut self, field: &str, min: i64) -> u32 {
        match self.input.get(field) {
            None | Some(Value::Null) => {
                self.fail(field, format!("The {field} field is required."));
                0
            }
            Some(value) => self.integer_value(field, value, min).unwrap_or(0),
        }
    }

    fn optional_integer(&mut self, field: &str, min: i64) -> Option<u32> {
        match self.input.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.integer_value(field, value, min),
        }
    }

    fn integer_value(&mut self, field: &str, value: &Value, min: i64) -> Option<u32> {
        let Some(number) = value.as_i64() else {
            self.fail(field, format!("The {field} field must be an integer."));
            return None;
        };
        if number < min {
            self.fail(field, format!("The {field} field must be at least {min}."));
            return None;
        }
        u32::try_from(number).ok().or_else(|| {
            self.fail(field, format!("The {field} field must be an integer."));
            None
        })
    }

    fn optional_bool(&mut self, field: &str) -> Option<bool> {
        match self.input.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::Bool(value)) => Some(*value),
            Some(_) => {
                self.fail(field, format!("The {field} field must be true or false."));
                None
            }
        }
    }

    fn required_date(&mut self, field: &str) -> NaiveDate {
        match self.input.get(field) {
            None | Some(Value::Null) => {
                self.fail(field, format!("The {field} field is required."));
                NaiveDate::default()
            }
            Some(value) => self
                .date_value(field, value)
                .unwrap_or_else(NaiveDate::default),
        }
    }

    fn optional_date(&mut self, field: &str) -> Option<NaiveDate> {
        match self.input.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.date_value(field, value),
        }
    }

    fn date_value(&mut self, field: &str, value: &Value) -> Option<NaiveDate> {
        let parsed = value
            .as_str()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok());
        if parsed.is_none() {
            self.fail(field, format!("The {field} field must be a valid date."));
        }
        parsed
    }

    fn required_enum<T: Copy>(&mut self, field: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
        match self.input.get(field) {
            None | Some(Value::Null) => {
                self.fail(field, format!("The {field} field is required."));
                None
            }
            Some(value) => self.enum_value(field, value, parse),
        }
    }

    fn optional_enum<T: Copy>(&mut self, field: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
        match self.input.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.enum_value(field, value, parse),
        }
    }

    fn enum_value<T: Copy>(
        &mut self,
        field: &str,
        value: &Value,
        parse: fn(&str) -> Option<T>,
    ) -> Option<T> {
        let parsed = value.as_str().and_then(parse);
        if parsed.is_none() {
            self.fail(field, format!("The selected {field} is invalid."));
        }
        parsed
    }

    /// Foreign-key ids arrive as JSON numbers from the SPA but as strings
    /// from form-encoded clients; both are accepted.
    fn required_id(&mut self, field: &str) -> EntityId {
        let parsed = match self.input.get(field) {
            None | Some(Value::Null) => {
                self.fail(field, format!("The {field} field is required."));
                return 0;
            }
            Some(Value::Number(number)) => number.as_u64(),
            Some(Value::String(raw)) => raw.trim().parse::<u64>().ok(),
            Some(_) => None,
        };
        match parsed {
            Some(id) if id > 0 => id,
            _ => {
                self.fail(field, format!("The selected {field} is invalid."));
                0
            }
        }
    }

    fn email_format(&mut self, field: &str, value: &str) {
        let well_formed = match value.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
            }
            None => false,
        };
        if !well_formed {
            self.fail(
                field,
                format!("The {field} field must be a valid email address."),
            );
        }
    }
}

/// Full validation for property create and update; both require the complete
/// field set, and absent optional fields take their documented defaults.
pub fn validate_property(input: &Map<String, Value>) -> Result<NewProperty, ValidationFailure> {
    let mut check = Checker::new(input);

    let title = check.required_string("title", Some(255));
    let description = check.required_string("description", None);
    let property_type = check.required_string("type", Some(255));
    let price = check.required_number("price", Some(0.0));
    let bedrooms = check.required_integer("bedrooms", 0);
    let bathrooms = check.required_integer("bathrooms", 1);
    let parking_spaces = check.optional_integer("parking_spaces", 0);
    let size_sqm = check.required_number("size_sqm", Some(1.0));
    let address = check.required_string("address", Some(255));
    let city = check.required_string("city", Some(255));
    let province = check.required_string("province", Some(255));
    let postal_code = check.required_string("postal_code", Some(10));
    let latitude = check.optional_number("latitude", None);
    let longitude = check.optional_number("longitude", None);
    let status = check.optional_enum("status", PropertyStatus::parse);
    let is_featured = check.optional_bool("is_featured");

    check.finish()?;

    Ok(NewProperty {
        title,
        description,
        property_type,
        price,
        bedrooms,
        bathrooms,
        parking_spaces: parking_spaces.unwrap_or(0),
        size_sqm,
        address,
        city,
        province,
        postal_code,
        latitude,
        longitude,
        status: status.unwrap_or(PropertyStatus::Available),
        is_featured: is_featured.unwrap_or(false),
    })
}

/// Full validation for resident create. Lease end, when given, must fall
/// strictly after lease start.
pub fn validate_resident(input: &Map<String, Value>) -> Result<NewResident, ValidationFailure> {
    let mut check = Checker::new(input);

    let property_id = check.required_id("property_id");
    let first_name = check.required_string("first_name", Some(255));
    let last_name = check.required_string("last_name", Some(255));
    let email = check.required_string("email", Some(255));
    if !email.is_empty() {
        check.email_format("email", &email);
    }
    let phone = check.optional_string("phone", Some(20));
    let id_number = check.required_string("id_number", Some(13));
    let date_of_birth = check.required_date("date_of_birth");
    let gender = check.required_enum("gender", Gender::parse);
    let occupation = check.optional_string("occupation", Some(255));
    let emergency_contact_name = check.optional_string("emergency_contact_name", Some(255));
    let emergency_contact_phone = check.optional_string("emergency_contact_phone", Some(20));
    let lease_start_date = check.required_date("lease_start_date");
    let lease_end_date = check.optional_date("lease_end_date");
    let monthly_rent = check.required_number("monthly_rent", Some(0.0));
    let deposit_amount = check.optional_number("deposit_amount", Some(0.0));
    let status = check.required_enum("status", ResidentStatus::parse);
    let notes = check.optional_string("notes", None);

    if let Some(end) = lease_end_date {
        if check.supplied("lease_start_date") && end <= lease_start_date {
            check.fail(
                "lease_end_date",
                "The lease_end_date field must be a date after lease_start_date.".to_string(),
            );
        }
    }

    check.finish()?;

    Ok(NewResident {
        property_id,
        first_name,
        last_name,
        email,
        phone,
        id_number,
        date_of_birth,
        gender: gender.unwrap_or(Gender::Other),
        occupation,
        emergency_contact_name,
        emergency_contact_phone,
        lease_start_date,
        lease_end_date,
        monthly_rent,
        deposit_amount,
        status: status.unwrap_or(ResidentStatus::Pending),
        notes,
    })
}

/// Full validation for maintenance-request create. Status and reporting time
/// are not client fields; the service stamps both.
pub fn validate_maintenance_create(
    input: &Map<String, Value>,
) -> Result<NewMaintenanceRequest, ValidationFailure> {
    let mut check = Checker::new(input);

    let property_id = check.required_id("property_id");
    let resident_id = check.required_id("resident_id");
    let title = check.required_string("title", Some(255));
    let description = check.required_string("description", None);
    let category = check.required_enum("category", MaintenanceCategory::parse);
    let priority = check.required_enum("priority", MaintenancePriority::parse);
    let estimated_cost = check.optional_number("estimated_cost", Some(0.0));
    let notes = check.optional_string("notes", None);

    check.finish()?;

    Ok(NewMaintenanceRequest {
        property_id,
        resident_id,
        title,
        description,
        category: category.unwrap_or(MaintenanceCategory::Other),
        priority: priority.unwrap_or(MaintenancePriority::Low),
        estimated_cost,
        notes,
    })
}

/// Partial validation for maintenance-request update: only supplied fields
/// are checked, absent fields leave the stored record untouched. Explicit
/// nulls clear nullable fields.
pub fn validate_maintenance_update(
    input: &Map<String, Value>,
) -> Result<MaintenancePatch, ValidationFailure> {
    let mut check = Checker::new(input);
    let mut patch = MaintenancePatch::default();

    if check.supplied("title") {
        patch.title = Some(check.required_string("title", Some(255)));
    }
    if check.supplied("description") {
        patch.description = Some(check.required_string("description", None));
    }
    if check.supplied("category") {
        patch.category = check.required_enum("category", MaintenanceCategory::parse);
    }
    if check.supplied("priority") {
        patch.priority = check.required_enum("priority", MaintenancePriority::parse);
    }
    if check.supplied("status") {
        patch.status = check.required_enum("status", MaintenanceStatus::parse);
    }
    if check.supplied("estimated_cost") {
        patch.estimated_cost = Some(check.optional_number("estimated_cost", Some(0.0)));
    }
    if check.supplied("actual_cost") {
        patch.actual_cost = Some(check.optional_number("actual_cost", Some(0.0)));
    }
    if check.supplied("assigned_to") {
        patch.assigned_to = Some(check.optional_string("assigned_to", Some(255)));
    }
    if check.supplied("notes") {
        patch.notes = Some(check.optional_string("notes", None));
    }

    check.finish()?;
    Ok(patch)
}

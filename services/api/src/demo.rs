use clap::Args;
use estate_office::error::AppError;
use estate_office::office::{
    DashboardStats, EntityId, MaintenanceStore, MaintenanceView, MemoryOffice, OfficeError,
    OfficeService, PropertyStore, ResidentStore,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the maintenance lifecycle walkthrough.
    #[arg(long)]
    pub(crate) skip_lifecycle: bool,
    /// Print the dashboard snapshot as pretty JSON instead of a summary.
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        skip_lifecycle,
        json,
    } = args;

    println!("Property back office demo");
    let service = OfficeService::new(Arc::new(MemoryOffice::new()));

    let request_id = match seed_portfolio(&service) {
        Ok(id) => id,
        Err(err) => {
            println!("  Seeding failed: {}", err);
            return Ok(());
        }
    };

    if !skip_lifecycle {
        println!("\nMaintenance lifecycle walkthrough");
        for status in ["assigned", "in_progress", "completed"] {
            match advance_request(&service, request_id, status) {
                Ok(view) => render_request(&view),
                Err(err) => {
                    println!("  Transition to {} failed: {}", status, err);
                    return Ok(());
                }
            }
        }
    }

    let stats = match service.dashboard_stats() {
        Ok(stats) => stats,
        Err(err) => {
            println!("  Dashboard unavailable: {}", err);
            return Ok(());
        }
    };

    if json {
        match serde_json::to_string_pretty(&stats) {
            Ok(payload) => println!("\n{}", payload),
            Err(err) => println!("  Dashboard payload unavailable: {}", err),
        }
    } else {
        render_dashboard(&stats);
    }

    Ok(())
}

fn seed_portfolio<S>(service: &OfficeService<S>) -> Result<EntityId, OfficeError>
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    let sea_point = service.create_property(&object(json!({
        "title": "Sea Point Apartment",
        "description": "Two-bedroom apartment with ocean views",
        "type": "apartment",
        "status": "rented",
        "price": 14500,
        "bedrooms": 2,
        "bathrooms": 1,
        "size_sqm": 78.0,
        "address": "12 Beach Road",
        "city": "Cape Town",
        "province": "Western Cape",
        "postal_code": "8005",
    })))?;

    let cottage = service.create_property(&object(json!({
        "title": "Gardens Cottage",
        "description": "Compact garden cottage near the city bowl",
        "type": "house",
        "price": 11000,
        "bedrooms": 1,
        "bathrooms": 1,
        "size_sqm": 52.5,
        "address": "4 Hof Street",
        "city": "Cape Town",
        "province": "Western Cape",
        "postal_code": "8001",
    })))?;

    println!(
        "- Seeded properties: {} (#{}), {} (#{})",
        sea_point.title, sea_point.id, cottage.title, cottage.id
    );

    let resident = service.create_resident(&object(json!({
        "first_name": "Thandi",
        "last_name": "Nkosi",
        "email": "thandi.nkosi@example.com",
        "phone": "+27 82 555 0101",
        "id_number": "9001015800087",
        "date_of_birth": "1990-01-01",
        "gender": "female",
        "property_id": sea_point.id,
        "lease_start_date": "2026-01-01",
        "lease_end_date": "2026-12-31",
        "monthly_rent": 14500,
        "deposit_amount": 14500,
        "status": "active",
    })))?;
    let cottage_resident = service.create_resident(&object(json!({
        "first_name": "Sipho",
        "last_name": "Dlamini",
        "email": "sipho.dlamini@example.com",
        "phone": "+27 83 555 0202",
        "id_number": "8712245100083",
        "date_of_birth": "1987-12-24",
        "gender": "male",
        "property_id": cottage.id,
        "lease_start_date": "2026-03-01",
        "lease_end_date": "2027-02-28",
        "monthly_rent": 11000,
        "deposit_amount": 11000,
        "status": "active",
    })))?;
    println!(
        "- Seeded residents: {} (#{}), {} (#{})",
        resident.full_name,
        resident.resident.id,
        cottage_resident.full_name,
        cottage_resident.resident.id
    );

    let geyser = service.create_request(&object(json!({
        "title": "Geyser leaking",
        "description": "Hot water cylinder dripping through the ceiling",
        "category": "plumbing",
        "priority": "urgent",
        "property_id": sea_point.id,
        "resident_id": resident.resident.id,
    })))?;
    service.create_request(&object(json!({
        "title": "Garden gate hinge",
        "description": "Gate no longer closes flush",
        "category": "structural",
        "priority": "low",
        "property_id": cottage.id,
        "resident_id": cottage_resident.resident.id,
    })))?;

    println!(
        "- Seeded maintenance requests, tracking \"{}\" (#{})",
        geyser.request.title, geyser.request.id
    );
    Ok(geyser.request.id)
}

fn advance_request<S>(
    service: &OfficeService<S>,
    id: EntityId,
    status: &str,
) -> Result<MaintenanceView, OfficeError>
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    let mut patch = object(json!({ "status": status }));
    if status == "assigned" {
        patch.insert("assigned_to".to_string(), json!("Joe's Plumbing"));
    }
    if status == "completed" {
        patch.insert("actual_cost".to_string(), json!(1850));
    }
    service.update_request(id, &patch)
}

fn render_request(view: &MaintenanceView) {
    let stamp = |label: &str, value: &Option<chrono::DateTime<chrono::Utc>>| match value {
        Some(at) => format!("{} {}", label, at.format("%Y-%m-%d %H:%M")),
        None => format!("{} -", label),
    };
    println!(
        "- {} -> {} | {} | {} | {}",
        view.request.title,
        view.request.status.as_str(),
        stamp("assigned", &view.request.assigned_at),
        stamp("started", &view.request.started_at),
        stamp("completed", &view.request.completed_at),
    );
}

fn render_dashboard(stats: &DashboardStats) {
    println!("\nDashboard snapshot");
    println!("- Properties: {} total", stats.properties.total);
    for (status, count) in &stats.properties.by_status {
        println!("    - {}: {}", status, count);
    }
    println!("- Residents: {} total", stats.residents.total);
    for (status, count) in &stats.residents.by_status {
        println!("    - {}: {}", status, count);
    }
    println!(
        "- Maintenance: {} total | {} urgent open",
        stats.maintenance.total, stats.maintenance.urgent_open
    );
    println!("  By status:");
    for (status, count) in &stats.maintenance.by_status {
        println!("    - {}: {}", status, count);
    }
    println!("  By priority:");
    for (priority, count) in &stats.maintenance.by_priority {
        println!("    - {}: {}", priority, count);
    }
    println!("  Recent requests:");
    for view in &stats.maintenance.recent {
        println!(
            "    - {} [{}]",
            view.request.title,
            view.request.status.as_str()
        );
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

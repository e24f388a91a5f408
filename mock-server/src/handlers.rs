use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::envelope::{created, done, ok, ok_with, ApiResult, Envelope};
use crate::models::*;
use crate::Db;

type Reply<T> = ApiResult<Json<Envelope<T>>>;
type Created<T> = ApiResult<(StatusCode, Json<Envelope<T>>)>;

// --- auth ---

pub async fn login(State(db): State<Db>, Json(input): Json<LoginRequest>) -> Reply<AuthResponse> {
    let session = db.write().await.login(input)?;
    Ok(ok_with(session, "Login successful"))
}

pub async fn register(
    State(db): State<Db>,
    Json(input): Json<RegisterRequest>,
) -> Created<AuthResponse> {
    let session = db.write().await.register(input)?;
    Ok(created(session, "Registration successful"))
}

// --- tracking ---

pub async fn track(State(db): State<Db>, Path(number): Path<String>) -> Reply<TrackingResponse> {
    Ok(ok(db.read().await.track(&number)?))
}

// --- shipments ---

pub async fn list_shipments(State(db): State<Db>) -> Json<Envelope<Vec<Shipment>>> {
    ok(db.read().await.list_shipments())
}

pub async fn get_shipment(State(db): State<Db>, Path(id): Path<i64>) -> Reply<Shipment> {
    Ok(ok(db.read().await.get_shipment(id)?))
}

pub async fn get_shipment_by_tracking(
    State(db): State<Db>,
    Path(number): Path<String>,
) -> Reply<Shipment> {
    Ok(ok(db.read().await.get_shipment_by_tracking(&number)?))
}

pub async fn create_shipment(
    State(db): State<Db>,
    Json(input): Json<CreateShipment>,
) -> Created<Shipment> {
    let shipment = db.write().await.create_shipment(input)?;
    Ok(created(shipment, "Shipment created successfully"))
}

pub async fn update_shipment(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateShipment>,
) -> Reply<Shipment> {
    let shipment = db.write().await.update_shipment(id, input)?;
    Ok(ok_with(shipment, "Shipment updated successfully"))
}

pub async fn assign_driver(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<AssignDriver>,
) -> Reply<Shipment> {
    let shipment = db.write().await.assign_driver(id, input.driver_id)?;
    Ok(ok_with(shipment, "Driver assigned successfully"))
}

pub async fn mark_delivered(State(db): State<Db>, Path(id): Path<i64>) -> Reply<Shipment> {
    let shipment = db.write().await.mark_delivered(id)?;
    Ok(ok_with(shipment, "Shipment marked as delivered"))
}

pub async fn delete_shipment(State(db): State<Db>, Path(id): Path<i64>) -> Reply<()> {
    db.write().await.delete_shipment(id)?;
    Ok(done("Shipment deleted successfully"))
}

pub async fn shipments_by_driver(
    State(db): State<Db>,
    Path(driver_id): Path<i64>,
) -> Json<Envelope<Vec<Shipment>>> {
    ok(db.read().await.shipments_by_driver(driver_id, false))
}

pub async fn active_shipments_by_driver(
    State(db): State<Db>,
    Path(driver_id): Path<i64>,
) -> Json<Envelope<Vec<Shipment>>> {
    ok(db.read().await.shipments_by_driver(driver_id, true))
}

// --- trucks ---

pub async fn list_trucks(State(db): State<Db>) -> Json<Envelope<Vec<Truck>>> {
    ok(db.read().await.list_trucks())
}

pub async fn available_trucks(State(db): State<Db>) -> Json<Envelope<Vec<Truck>>> {
    ok(db.read().await.trucks_with_status(TruckStatus::Available))
}

pub async fn active_trucks(State(db): State<Db>) -> Json<Envelope<Vec<Truck>>> {
    ok(db.read().await.trucks_with_status(TruckStatus::InUse))
}

pub async fn trucks_by_status(
    State(db): State<Db>,
    Path(status): Path<TruckStatus>,
) -> Json<Envelope<Vec<Truck>>> {
    ok(db.read().await.trucks_with_status(status))
}

pub async fn get_truck(State(db): State<Db>, Path(id): Path<i64>) -> Reply<Truck> {
    Ok(ok(db.read().await.get_truck(id)?))
}

pub async fn get_truck_by_plate(State(db): State<Db>, Path(plate): Path<String>) -> Reply<Truck> {
    Ok(ok(db.read().await.get_truck_by_plate(&plate)?))
}

pub async fn create_truck(State(db): State<Db>, Json(input): Json<CreateTruck>) -> Created<Truck> {
    let truck = db.write().await.create_truck(input)?;
    Ok(created(truck, "Truck created successfully"))
}

pub async fn update_truck(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTruck>,
) -> Reply<Truck> {
    let truck = db.write().await.update_truck(id, input)?;
    Ok(ok_with(truck, "Truck updated successfully"))
}

pub async fn update_location(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<LocationUpdate>,
) -> Reply<Truck> {
    let truck = db.write().await.update_location(id, input)?;
    Ok(ok_with(truck, "Location updated successfully"))
}

pub async fn delete_truck(State(db): State<Db>, Path(id): Path<i64>) -> Reply<()> {
    db.write().await.delete_truck(id)?;
    Ok(done("Truck deleted successfully"))
}

// --- drivers ---

pub async fn list_drivers(State(db): State<Db>) -> Json<Envelope<Vec<Driver>>> {
    ok(db.read().await.list_drivers())
}

pub async fn available_drivers(State(db): State<Db>) -> Json<Envelope<Vec<Driver>>> {
    ok(db.read().await.drivers_with_status(DriverStatus::Available))
}

pub async fn drivers_by_status(
    State(db): State<Db>,
    Path(status): Path<DriverStatus>,
) -> Json<Envelope<Vec<Driver>>> {
    ok(db.read().await.drivers_with_status(status))
}

pub async fn get_driver(State(db): State<Db>, Path(id): Path<i64>) -> Reply<Driver> {
    Ok(ok(db.read().await.get_driver(id)?))
}

pub async fn get_driver_by_email(
    State(db): State<Db>,
    Path(email): Path<String>,
) -> Reply<Driver> {
    Ok(ok(db.read().await.get_driver_by_email(&email)?))
}

pub async fn create_driver(
    State(db): State<Db>,
    Json(input): Json<CreateDriver>,
) -> Created<Driver> {
    let driver = db.write().await.create_driver(input)?;
    Ok(created(driver, "Driver created successfully"))
}

pub async fn update_driver(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateDriver>,
) -> Reply<Driver> {
    let driver = db.write().await.update_driver(id, input)?;
    Ok(ok_with(driver, "Driver updated successfully"))
}

pub async fn assign_truck(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<AssignTruck>,
) -> Reply<Driver> {
    let driver = db.write().await.assign_truck(id, input.truck_id)?;
    Ok(ok_with(driver, "Truck assigned successfully"))
}

pub async fn unassign_truck(State(db): State<Db>, Path(id): Path<i64>) -> Reply<Driver> {
    let driver = db.write().await.unassign_truck(id)?;
    Ok(ok_with(driver, "Truck unassigned successfully"))
}

pub async fn delete_driver(State(db): State<Db>, Path(id): Path<i64>) -> Reply<()> {
    db.write().await.delete_driver(id)?;
    Ok(done("Driver deleted successfully"))
}

// --- warehouses ---

pub async fn list_warehouses(State(db): State<Db>) -> Json<Envelope<Vec<Warehouse>>> {
    ok(db.read().await.list_warehouses())
}

pub async fn low_occupancy(State(db): State<Db>) -> Json<Envelope<Vec<Warehouse>>> {
    ok(db.read().await.low_occupancy())
}

pub async fn high_occupancy(State(db): State<Db>) -> Json<Envelope<Vec<Warehouse>>> {
    ok(db.read().await.high_occupancy())
}

pub async fn get_warehouse(State(db): State<Db>, Path(id): Path<i64>) -> Reply<Warehouse> {
    Ok(ok(db.read().await.get_warehouse(id)?))
}

pub async fn create_warehouse(
    State(db): State<Db>,
    Json(input): Json<CreateWarehouse>,
) -> Created<Warehouse> {
    let warehouse = db.write().await.create_warehouse(input)?;
    Ok(created(warehouse, "Warehouse created successfully"))
}

pub async fn update_warehouse(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateWarehouse>,
) -> Reply<Warehouse> {
    let warehouse = db.write().await.update_warehouse(id, input)?;
    Ok(ok_with(warehouse, "Warehouse updated successfully"))
}

pub async fn update_inventory(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<InventoryUpdate>,
) -> Reply<Warehouse> {
    let warehouse = db.write().await.update_inventory(id, input.change_amount)?;
    Ok(ok_with(warehouse, "Inventory updated successfully"))
}

pub async fn delete_warehouse(State(db): State<Db>, Path(id): Path<i64>) -> Reply<()> {
    db.write().await.delete_warehouse(id)?;
    Ok(done("Warehouse deleted successfully"))
}

// --- dashboard ---

pub async fn dashboard(State(db): State<Db>) -> Json<Envelope<DashboardStats>> {
    ok(db.read().await.dashboard())
}

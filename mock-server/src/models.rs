//! Wire DTOs served by the mock backend.
//!
//! Defined independently of `fleet-core` on purpose: the client's
//! integration tests catch drift between the two.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Driver,
    Customer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    Pending,
    PickedUp,
    InTransit,
    OutForDelivery,
    Delivered,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TruckStatus {
    Available,
    InUse,
    Maintenance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    Available,
    OnDelivery,
    OffDuty,
}

// --- auth ---

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub token: String,
}

// --- shipments ---

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: i64,
    pub tracking_number: String,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub weight: f64,
    pub driver_id: Option<i64>,
    pub driver_name: Option<String>,
    pub truck_id: Option<i64>,
    pub truck_license_plate: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
    pub actual_delivery: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipment {
    pub origin: String,
    pub destination: String,
    pub weight: f64,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
    pub warehouse_id: Option<i64>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShipment {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub weight: Option<f64>,
    pub status: Option<ShipmentStatus>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignDriver {
    pub driver_id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponse {
    pub tracking_number: String,
    pub status: ShipmentStatus,
    pub origin: String,
    pub destination: String,
    pub estimated_delivery: Option<NaiveDate>,
    pub weight: f64,
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub status: ShipmentStatus,
    pub location: String,
    pub timestamp: String,
    pub completed: bool,
}

// --- trucks ---

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: i64,
    pub license_plate: String,
    pub model: String,
    pub capacity: f64,
    pub status: TruckStatus,
    pub mileage: i64,
    pub last_service: Option<NaiveDate>,
    pub next_service: Option<NaiveDate>,
    pub current_latitude: Option<f64>,
    pub current_longitude: Option<f64>,
    pub current_speed: Option<f64>,
    pub heading: Option<String>,
    pub last_location_update: Option<NaiveDateTime>,
    pub assigned_driver_id: Option<i64>,
    pub assigned_driver_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTruck {
    pub license_plate: String,
    pub model: String,
    pub capacity: f64,
    pub status: Option<TruckStatus>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTruck {
    pub license_plate: Option<String>,
    pub model: Option<String>,
    pub capacity: Option<f64>,
    pub status: Option<TruckStatus>,
    pub mileage: Option<i64>,
    pub last_service: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct LocationUpdate {
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub heading: String,
}

// --- drivers ---

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub status: DriverStatus,
    pub assigned_truck_id: Option<i64>,
    pub assigned_truck_plate: Option<String>,
    pub total_deliveries: u32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriver {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDriver {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub status: Option<DriverStatus>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTruck {
    pub truck_id: i64,
}

// --- warehouses ---

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub address: String,
    pub capacity: i64,
    pub current_inventory: i64,
    pub capacity_usage_percentage: i32,
    pub manager: String,
    pub phone: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarehouse {
    pub name: String,
    pub location: String,
    pub address: String,
    pub capacity: i64,
    pub manager: String,
    pub phone: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWarehouse {
    pub name: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub capacity: Option<i64>,
    pub manager: Option<String>,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdate {
    pub change_amount: i64,
}

// --- dashboard ---

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_shipments: u64,
    pub active_shipments: u64,
    pub delivered_shipments: u64,
    pub pending_shipments: u64,
    pub total_trucks: u64,
    pub available_trucks: u64,
    pub trucks_in_use: u64,
    pub trucks_in_maintenance: u64,
    pub total_drivers: u64,
    pub available_drivers: u64,
    pub drivers_on_delivery: u64,
    pub drivers_off_duty: u64,
    pub total_warehouses: u64,
    pub total_warehouse_capacity: i64,
    pub total_inventory: i64,
    pub delivery_success_rate: f64,
    pub average_delivery_time: f64,
    pub weekly_deliveries: Vec<WeeklyDeliveries>,
    pub recent_shipments: Vec<Shipment>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeeklyDeliveries {
    pub day: String,
    pub deliveries: u32,
    pub pending: u32,
}

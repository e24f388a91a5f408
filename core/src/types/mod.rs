//! Wire DTOs for the fleet backend.
//!
//! # Design
//! Field names follow the backend's camelCase JSON. Ids are `i64`, calendar
//! dates are `NaiveDate` and record instants are `NaiveDateTime`, since the
//! backend emits zone-less local values. Fields the backend may leave null
//! are `Option` with `#[serde(default)]`. Update requests skip absent fields
//! so the server applies only what was set.

mod auth;
mod dashboard;
mod driver;
mod shipment;
mod truck;
mod warehouse;

pub use auth::{LoginRequest, RegisterRequest, Role, Session};
pub use dashboard::{DashboardStats, WeeklyDeliveries};
pub use driver::{AssignTruckRequest, CreateDriverRequest, Driver, DriverStatus, UpdateDriverRequest};
pub use shipment::{
    AssignDriverRequest, CreateShipmentRequest, Shipment, ShipmentStatus, TimelineEntry,
    TrackingResponse, UpdateShipmentRequest,
};
pub use truck::{CreateTruckRequest, LocationUpdate, Truck, TruckStatus, UpdateTruckRequest};
pub use warehouse::{
    CreateWarehouseRequest, InventoryUpdateRequest, UpdateWarehouseRequest, Warehouse,
};

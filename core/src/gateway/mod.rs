//! Per-resource views over `FleetClient`.
//!
//! Each method binds one path template, one HTTP method and one payload
//! type. No input is validated here; the backend rejects what it doesn't
//! like and the rejection comes back as `ApiError::RequestFailed`.

mod auth;
mod dashboard;
mod drivers;
mod shipments;
mod tracking;
mod trucks;
mod warehouses;

pub use auth::AuthApi;
pub use dashboard::DashboardApi;
pub use drivers::DriversApi;
pub use shipments::ShipmentsApi;
pub use tracking::TrackingApi;
pub use trucks::TrucksApi;
pub use warehouses::WarehousesApi;

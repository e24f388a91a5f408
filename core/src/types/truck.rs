use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TruckStatus {
    Available,
    InUse,
    Maintenance,
}

impl TruckStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TruckStatus::Available => "AVAILABLE",
            TruckStatus::InUse => "IN_USE",
            TruckStatus::Maintenance => "MAINTENANCE",
        }
    }
}

/// A fleet vehicle. Location fields stay `None` until the first
/// `update_location`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: i64,
    pub license_plate: String,
    pub model: String,
    pub capacity: f64,
    pub status: TruckStatus,
    #[serde(default)]
    pub mileage: i64,
    #[serde(default)]
    pub last_service: Option<NaiveDate>,
    #[serde(default)]
    pub next_service: Option<NaiveDate>,
    #[serde(default)]
    pub current_latitude: Option<f64>,
    #[serde(default)]
    pub current_longitude: Option<f64>,
    #[serde(default)]
    pub current_speed: Option<f64>,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub last_location_update: Option<NaiveDateTime>,
    #[serde(default)]
    pub assigned_driver_id: Option<i64>,
    #[serde(default)]
    pub assigned_driver_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTruckRequest {
    pub license_plate: String,
    pub model: String,
    pub capacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TruckStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTruckRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TruckStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_service: Option<NaiveDate>,
}

/// A GPS fix pushed by the vehicle. `heading` is a compass label such as
/// `"NE"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub heading: String,
}

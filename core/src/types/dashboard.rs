use serde::{Deserialize, Serialize};

use super::Shipment;

/// Read-only aggregate for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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
    #[serde(default)]
    pub total_warehouse_capacity: Option<i64>,
    #[serde(default)]
    pub total_inventory: Option<i64>,
    pub delivery_success_rate: f64,
    pub average_delivery_time: f64,
    #[serde(default)]
    pub weekly_deliveries: Vec<WeeklyDeliveries>,
    #[serde(default)]
    pub recent_shipments: Vec<Shipment>,
}

/// One day of the weekly series (`day` is a short label like `"Mon"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyDeliveries {
    pub day: String,
    pub deliveries: u32,
    pub pending: u32,
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    Available,
    OnDelivery,
    OffDuty,
}

impl DriverStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DriverStatus::Available => "AVAILABLE",
            DriverStatus::OnDelivery => "ON_DELIVERY",
            DriverStatus::OffDuty => "OFF_DUTY",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub status: DriverStatus,
    #[serde(default)]
    pub assigned_truck_id: Option<i64>,
    #[serde(default)]
    pub assigned_truck_plate: Option<String>,
    #[serde(default)]
    pub total_deliveries: u32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDriverRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DriverStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTruckRequest {
    pub truck_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_total_deliveries_defaults_to_zero() {
        let json = r#"{
            "id": 3,
            "name": "Marta",
            "email": "marta@example.com",
            "phone": "+351 900 000 000",
            "licenseNumber": "L-123",
            "status": "OFF_DUTY",
            "createdAt": "2024-02-01T12:00:00",
            "updatedAt": "2024-02-01T12:00:00"
        }"#;
        let driver: Driver = serde_json::from_str(json).unwrap();
        assert_eq!(driver.total_deliveries, 0);
        assert_eq!(driver.status, DriverStatus::OffDuty);
        assert_eq!(driver.assigned_truck_id, None);
    }

    #[test]
    fn assign_truck_body_is_camel_case() {
        let json = serde_json::to_value(AssignTruckRequest { truck_id: 9 }).unwrap();
        assert_eq!(json, serde_json::json!({ "truckId": 9 }));
    }
}

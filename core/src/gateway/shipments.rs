use crate::client::FleetClient;
use crate::envelope::{ApiResponse, Empty};
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{AssignDriverRequest, CreateShipmentRequest, Shipment, UpdateShipmentRequest};

pub struct ShipmentsApi<'a, T> {
    client: &'a FleetClient<T>,
}

impl<'a, T: Transport> ShipmentsApi<'a, T> {
    pub(crate) fn new(client: &'a FleetClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<ApiResponse<Vec<Shipment>>> {
        self.client.get("/shipments")
    }

    pub fn get_by_id(&self, id: i64) -> Result<ApiResponse<Shipment>> {
        self.client.get(&format!("/shipments/{id}"))
    }

    pub fn get_by_tracking_number(&self, tracking_number: &str) -> Result<ApiResponse<Shipment>> {
        self.client
            .get(&format!("/shipments/tracking/{tracking_number}"))
    }

    pub fn create(&self, request: &CreateShipmentRequest) -> Result<ApiResponse<Shipment>> {
        self.client.post_json("/shipments", request)
    }

    pub fn update(&self, id: i64, request: &UpdateShipmentRequest) -> Result<ApiResponse<Shipment>> {
        self.client.put_json(&format!("/shipments/{id}"), request)
    }

    pub fn assign_driver(&self, shipment_id: i64, driver_id: i64) -> Result<ApiResponse<Shipment>> {
        self.client.post_json(
            &format!("/shipments/{shipment_id}/assign"),
            &AssignDriverRequest { driver_id },
        )
    }

    pub fn mark_delivered(&self, id: i64) -> Result<ApiResponse<Shipment>> {
        self.client.post(&format!("/shipments/{id}/deliver"))
    }

    pub fn delete(&self, id: i64) -> Result<ApiResponse<Empty>> {
        self.client.delete(&format!("/shipments/{id}"))
    }

    pub fn list_by_driver(&self, driver_id: i64) -> Result<ApiResponse<Vec<Shipment>>> {
        self.client.get(&format!("/shipments/driver/{driver_id}"))
    }

    pub fn list_active_by_driver(&self, driver_id: i64) -> Result<ApiResponse<Vec<Shipment>>> {
        self.client
            .get(&format!("/shipments/driver/{driver_id}/active"))
    }
}

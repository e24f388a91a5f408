use crate::client::FleetClient;
use crate::envelope::{ApiResponse, Empty};
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{CreateTruckRequest, LocationUpdate, Truck, TruckStatus, UpdateTruckRequest};

pub struct TrucksApi<'a, T> {
    client: &'a FleetClient<T>,
}

impl<'a, T: Transport> TrucksApi<'a, T> {
    pub(crate) fn new(client: &'a FleetClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<ApiResponse<Vec<Truck>>> {
        self.client.get("/trucks")
    }

    pub fn get_by_id(&self, id: i64) -> Result<ApiResponse<Truck>> {
        self.client.get(&format!("/trucks/{id}"))
    }

    pub fn get_by_license_plate(&self, license_plate: &str) -> Result<ApiResponse<Truck>> {
        self.client.get(&format!("/trucks/license/{license_plate}"))
    }

    pub fn list_available(&self) -> Result<ApiResponse<Vec<Truck>>> {
        self.client.get("/trucks/available")
    }

    /// Trucks currently in use.
    pub fn list_active(&self) -> Result<ApiResponse<Vec<Truck>>> {
        self.client.get("/trucks/active")
    }

    pub fn list_by_status(&self, status: TruckStatus) -> Result<ApiResponse<Vec<Truck>>> {
        self.client.get(&format!("/trucks/status/{}", status.as_str()))
    }

    pub fn create(&self, request: &CreateTruckRequest) -> Result<ApiResponse<Truck>> {
        self.client.post_json("/trucks", request)
    }

    pub fn update(&self, id: i64, request: &UpdateTruckRequest) -> Result<ApiResponse<Truck>> {
        self.client.put_json(&format!("/trucks/{id}"), request)
    }

    pub fn update_location(&self, id: i64, location: &LocationUpdate) -> Result<ApiResponse<Truck>> {
        self.client.put_json(&format!("/trucks/{id}/location"), location)
    }

    pub fn delete(&self, id: i64) -> Result<ApiResponse<Empty>> {
        self.client.delete(&format!("/trucks/{id}"))
    }
}

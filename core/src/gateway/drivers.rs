use crate::client::FleetClient;
use crate::envelope::{ApiResponse, Empty};
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{AssignTruckRequest, CreateDriverRequest, Driver, DriverStatus, UpdateDriverRequest};

pub struct DriversApi<'a, T> {
    client: &'a FleetClient<T>,
}

impl<'a, T: Transport> DriversApi<'a, T> {
    pub(crate) fn new(client: &'a FleetClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<ApiResponse<Vec<Driver>>> {
        self.client.get("/drivers")
    }

    pub fn get_by_id(&self, id: i64) -> Result<ApiResponse<Driver>> {
        self.client.get(&format!("/drivers/{id}"))
    }

    pub fn get_by_email(&self, email: &str) -> Result<ApiResponse<Driver>> {
        self.client.get(&format!("/drivers/email/{email}"))
    }

    pub fn list_available(&self) -> Result<ApiResponse<Vec<Driver>>> {
        self.client.get("/drivers/available")
    }

    pub fn list_by_status(&self, status: DriverStatus) -> Result<ApiResponse<Vec<Driver>>> {
        self.client.get(&format!("/drivers/status/{}", status.as_str()))
    }

    pub fn create(&self, request: &CreateDriverRequest) -> Result<ApiResponse<Driver>> {
        self.client.post_json("/drivers", request)
    }

    pub fn update(&self, id: i64, request: &UpdateDriverRequest) -> Result<ApiResponse<Driver>> {
        self.client.put_json(&format!("/drivers/{id}"), request)
    }

    pub fn assign_truck(&self, driver_id: i64, truck_id: i64) -> Result<ApiResponse<Driver>> {
        self.client.post_json(
            &format!("/drivers/{driver_id}/assign-truck"),
            &AssignTruckRequest { truck_id },
        )
    }

    pub fn unassign_truck(&self, driver_id: i64) -> Result<ApiResponse<Driver>> {
        self.client
            .post(&format!("/drivers/{driver_id}/unassign-truck"))
    }

    pub fn delete(&self, id: i64) -> Result<ApiResponse<Empty>> {
        self.client.delete(&format!("/drivers/{id}"))
    }
}

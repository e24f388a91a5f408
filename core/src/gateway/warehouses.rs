use crate::client::FleetClient;
use crate::envelope::{ApiResponse, Empty};
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{
    CreateWarehouseRequest, InventoryUpdateRequest, UpdateWarehouseRequest, Warehouse,
};

pub struct WarehousesApi<'a, T> {
    client: &'a FleetClient<T>,
}

impl<'a, T: Transport> WarehousesApi<'a, T> {
    pub(crate) fn new(client: &'a FleetClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<ApiResponse<Vec<Warehouse>>> {
        self.client.get("/warehouses")
    }

    pub fn get_by_id(&self, id: i64) -> Result<ApiResponse<Warehouse>> {
        self.client.get(&format!("/warehouses/{id}"))
    }

    pub fn list_low_occupancy(&self) -> Result<ApiResponse<Vec<Warehouse>>> {
        self.client.get("/warehouses/low-occupancy")
    }

    pub fn list_high_occupancy(&self) -> Result<ApiResponse<Vec<Warehouse>>> {
        self.client.get("/warehouses/high-occupancy")
    }

    pub fn create(&self, request: &CreateWarehouseRequest) -> Result<ApiResponse<Warehouse>> {
        self.client.post_json("/warehouses", request)
    }

    pub fn update(&self, id: i64, request: &UpdateWarehouseRequest) -> Result<ApiResponse<Warehouse>> {
        self.client.put_json(&format!("/warehouses/{id}"), request)
    }

    /// Apply a stock delta; negative amounts remove stock.
    pub fn update_inventory(&self, id: i64, change_amount: i64) -> Result<ApiResponse<Warehouse>> {
        self.client.put_json(
            &format!("/warehouses/{id}/inventory"),
            &InventoryUpdateRequest { change_amount },
        )
    }

    pub fn delete(&self, id: i64) -> Result<ApiResponse<Empty>> {
        self.client.delete(&format!("/warehouses/{id}"))
    }
}

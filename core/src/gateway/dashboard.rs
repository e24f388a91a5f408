use crate::client::FleetClient;
use crate::envelope::ApiResponse;
use crate::error::Result;
use crate::transport::Transport;
use crate::types::DashboardStats;

pub struct DashboardApi<'a, T> {
    client: &'a FleetClient<T>,
}

impl<'a, T: Transport> DashboardApi<'a, T> {
    pub(crate) fn new(client: &'a FleetClient<T>) -> Self {
        Self { client }
    }

    pub fn get_stats(&self) -> Result<ApiResponse<DashboardStats>> {
        self.client.get("/dashboard")
    }
}

use crate::client::FleetClient;
use crate::envelope::ApiResponse;
use crate::error::Result;
use crate::transport::Transport;
use crate::types::TrackingResponse;

/// Public shipment tracking. Works without a session; a token is still
/// attached when one exists.
pub struct TrackingApi<'a, T> {
    client: &'a FleetClient<T>,
}

impl<'a, T: Transport> TrackingApi<'a, T> {
    pub(crate) fn new(client: &'a FleetClient<T>) -> Self {
        Self { client }
    }

    pub fn track(&self, tracking_number: &str) -> Result<ApiResponse<TrackingResponse>> {
        self.client.get(&format!("/track/{tracking_number}"))
    }
}

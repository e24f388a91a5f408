//! The entry point: a transport wired to a request executor.
//!
//! # Design
//! `FleetClient` holds no mutable state. Every call builds one request,
//! executes it once and parses one envelope; concurrent calls share nothing
//! but read access to the session store. Gateways are borrowed views that
//! bind paths and payload types, see `crate::gateway`.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::envelope::ApiResponse;
use crate::error::Result;
use crate::executor::RequestExecutor;
use crate::gateway::{
    AuthApi, DashboardApi, DriversApi, ShipmentsApi, TrackingApi, TrucksApi, WarehousesApi,
};
use crate::http::{HttpMethod, HttpRequest};
use crate::session::{SessionStore, TokenProvider};
use crate::transport::{Transport, UreqTransport};

#[derive(Debug, Clone)]
pub struct FleetClient<T = UreqTransport> {
    executor: RequestExecutor,
    transport: T,
}

impl FleetClient<UreqTransport> {
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Self {
        Self::with_transport(config, store, UreqTransport::new())
    }

    /// Base URL from `FLEET_API_URL` (or the local default).
    pub fn from_env(store: Arc<dyn SessionStore>) -> Self {
        Self::new(&ClientConfig::from_env(), store)
    }
}

impl<T: Transport> FleetClient<T> {
    pub fn with_transport(config: &ClientConfig, store: Arc<dyn SessionStore>, transport: T) -> Self {
        Self {
            executor: RequestExecutor::new(config, TokenProvider::new(store)),
            transport,
        }
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    pub fn tokens(&self) -> &TokenProvider {
        self.executor.tokens()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute a prebuilt request and parse its envelope.
    pub fn send<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<ApiResponse<R>> {
        let response = self.transport.execute(&request)?;
        self.executor.parse(response)
    }

    pub(crate) fn get<R: DeserializeOwned>(&self, endpoint: &str) -> Result<ApiResponse<R>> {
        self.send(self.executor.build(HttpMethod::Get, endpoint, None, &[]))
    }

    pub(crate) fn delete<R: DeserializeOwned>(&self, endpoint: &str) -> Result<ApiResponse<R>> {
        self.send(self.executor.build(HttpMethod::Delete, endpoint, None, &[]))
    }

    /// POST with no body.
    pub(crate) fn post<R: DeserializeOwned>(&self, endpoint: &str) -> Result<ApiResponse<R>> {
        self.send(self.executor.build(HttpMethod::Post, endpoint, None, &[]))
    }

    pub(crate) fn post_json<B, R>(&self, endpoint: &str, payload: &B) -> Result<ApiResponse<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(self.executor.build_json(HttpMethod::Post, endpoint, payload)?)
    }

    pub(crate) fn put_json<B, R>(&self, endpoint: &str, payload: &B) -> Result<ApiResponse<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(self.executor.build_json(HttpMethod::Put, endpoint, payload)?)
    }

    pub fn auth(&self) -> AuthApi<'_, T> {
        AuthApi::new(self)
    }

    pub fn shipments(&self) -> ShipmentsApi<'_, T> {
        ShipmentsApi::new(self)
    }

    pub fn tracking(&self) -> TrackingApi<'_, T> {
        TrackingApi::new(self)
    }

    pub fn trucks(&self) -> TrucksApi<'_, T> {
        TrucksApi::new(self)
    }

    pub fn drivers(&self) -> DriversApi<'_, T> {
        DriversApi::new(self)
    }

    pub fn warehouses(&self) -> WarehousesApi<'_, T> {
        WarehousesApi::new(self)
    }

    pub fn dashboard(&self) -> DashboardApi<'_, T> {
        DashboardApi::new(self)
    }
}

//! Blocking client for the fleet-logistics REST API.
//!
//! # Overview
//! Covers auth, shipments, public tracking, trucks, drivers, warehouses and
//! the dashboard. Every call is one request: the bearer token is read from
//! the persisted session, the body is sent as JSON, and the response's
//! `{success, message, data, timestamp, error}` envelope is parsed into
//! `ApiResponse<T>`. Non-2xx responses become `ApiError::RequestFailed`.
//!
//! # Design
//! - `RequestExecutor` builds `HttpRequest` values and parses
//!   `HttpResponse` values without I/O; `Transport` does the round trip
//!   (`UreqTransport` by default), so tests can swap in a recorder.
//! - Session storage sits behind `SessionStore`; a corrupted session reads
//!   as "logged out" instead of failing the call.
//! - No caching, retries or deduplication.
//!
//! ```no_run
//! use std::sync::Arc;
//! use fleet_core::{FleetClient, MemoryStore};
//!
//! let client = FleetClient::from_env(Arc::new(MemoryStore::new()));
//! let tracking = client.tracking().track("FH-2024-001")?.into_data();
//! println!("{:?}", tracking.status);
//! # Ok::<(), fleet_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod executor;
pub mod gateway;
pub mod http;
pub mod session;
pub mod transport;
pub mod types;

pub use client::FleetClient;
pub use config::ClientConfig;
pub use envelope::{ApiResponse, Empty};
pub use error::{ApiError, Result};
pub use executor::RequestExecutor;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{FileStore, MemoryStore, SessionStore, TokenProvider, SESSION_KEY};
pub use transport::{Transport, UreqTransport};
pub use types::*;

//! In-memory stand-in for the fleet logistics backend.
//!
//! Serves the same `/api` surface as the real service, wrapped in the same
//! response envelope, so the client can be exercised end to end.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub mod envelope;
mod handlers;
pub mod models;
pub mod store;

use envelope::ApiFailure;
use store::Store;

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::new())
}

pub fn app_with(store: Store) -> Router {
    use handlers::*;

    let db: Db = Arc::new(RwLock::new(store));

    let public = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/track/{tracking_number}", get(track));

    let protected = Router::new()
        .route("/shipments", get(list_shipments).post(create_shipment))
        .route(
            "/shipments/{id}",
            get(get_shipment).put(update_shipment).delete(delete_shipment),
        )
        .route("/shipments/tracking/{tracking_number}", get(get_shipment_by_tracking))
        .route("/shipments/{id}/assign", post(assign_driver))
        .route("/shipments/{id}/deliver", post(mark_delivered))
        .route("/shipments/driver/{driver_id}", get(shipments_by_driver))
        .route("/shipments/driver/{driver_id}/active", get(active_shipments_by_driver))
        .route("/trucks", get(list_trucks).post(create_truck))
        .route("/trucks/available", get(available_trucks))
        .route("/trucks/active", get(active_trucks))
        .route("/trucks/status/{status}", get(trucks_by_status))
        .route("/trucks/license/{plate}", get(get_truck_by_plate))
        .route(
            "/trucks/{id}",
            get(get_truck).put(update_truck).delete(delete_truck),
        )
        .route("/trucks/{id}/location", put(update_location))
        .route("/drivers", get(list_drivers).post(create_driver))
        .route("/drivers/available", get(available_drivers))
        .route("/drivers/status/{status}", get(drivers_by_status))
        .route("/drivers/email/{email}", get(get_driver_by_email))
        .route(
            "/drivers/{id}",
            get(get_driver).put(update_driver).delete(delete_driver),
        )
        .route("/drivers/{id}/assign-truck", post(assign_truck))
        .route("/drivers/{id}/unassign-truck", post(unassign_truck))
        .route("/warehouses", get(list_warehouses).post(create_warehouse))
        .route("/warehouses/low-occupancy", get(low_occupancy))
        .route("/warehouses/high-occupancy", get(high_occupancy))
        .route(
            "/warehouses/{id}",
            get(get_warehouse).put(update_warehouse).delete(delete_warehouse),
        )
        .route("/warehouses/{id}/inventory", put(update_inventory))
        .route("/dashboard", get(dashboard))
        .route_layer(middleware::from_fn_with_state(db.clone(), require_token));

    Router::new()
        .nest("/api", public.merge(protected))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Reject requests without a bearer token issued by `/auth/*`.
async fn require_token(
    State(db): State<Db>,
    request: Request,
    next: Next,
) -> Result<Response, ApiFailure> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned);

    match token {
        Some(token) if db.read().await.is_valid_token(&token) => Ok(next.run(request).await),
        _ => Err(ApiFailure::unauthorized("Full authentication is required")),
    }
}

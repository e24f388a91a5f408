//! Full fleet lifecycle against the live mock backend.
//!
//! # Design
//! Starts `fleet-mock-server` on a random port, then drives every gateway
//! over real HTTP with `UreqTransport`. Validates that request building,
//! auth headers and envelope parsing agree with an actual server.

use std::sync::Arc;

use fleet_core::{
    ClientConfig, CreateDriverRequest, CreateShipmentRequest, CreateTruckRequest,
    CreateWarehouseRequest, DriverStatus, FileStore, FleetClient, LocationUpdate, MemoryStore,
    RegisterRequest, Role, ShipmentStatus, TruckStatus, UpdateShipmentRequest,
    UpdateWarehouseRequest,
};

/// Bind a random port and serve the mock backend from a background thread.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            fleet_mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}/api")
}

#[test]
fn fleet_lifecycle() {
    let base = start_server();
    let client = FleetClient::new(&ClientConfig::new(&base), Arc::new(MemoryStore::new()));

    // Step 1: anonymous calls to protected routes are refused.
    let err = client.trucks().list().unwrap_err();
    assert!(err.is_unauthorized(), "expected 401, got {err:?}");

    // Step 2: register, then log in and keep the session.
    let registered = client
        .auth()
        .register(&RegisterRequest {
            name: "Dispatch".to_string(),
            email: "dispatch@fleet.io".to_string(),
            password: "secret1".to_string(),
            role: Some(Role::Admin),
        })
        .unwrap();
    assert!(registered.success);
    assert_eq!(registered.data.role, Role::Admin);

    let session = client
        .auth()
        .login_and_remember("dispatch@fleet.io", "secret1")
        .unwrap();
    assert_eq!(client.tokens().token(), Some(session.token.clone()));

    // Step 3: fleet setup.
    let truck = client
        .trucks()
        .create(&CreateTruckRequest {
            license_plate: "AA-11-BB".to_string(),
            model: "Actros".to_string(),
            capacity: 18000.0,
            status: None,
        })
        .unwrap()
        .into_data();
    assert_eq!(truck.status, TruckStatus::Available);
    assert_eq!(truck.mileage, 0);

    let driver = client
        .drivers()
        .create(&CreateDriverRequest {
            name: "Joao".to_string(),
            email: "joao@fleet.io".to_string(),
            phone: "+351 2".to_string(),
            license_number: "PT-1".to_string(),
        })
        .unwrap()
        .into_data();
    assert_eq!(driver.status, DriverStatus::Available);

    let driver = client.drivers().assign_truck(driver.id, truck.id).unwrap().into_data();
    assert_eq!(driver.assigned_truck_id, Some(truck.id));
    assert_eq!(driver.assigned_truck_plate.as_deref(), Some("AA-11-BB"));
    let active = client.trucks().list_active().unwrap().into_data();
    assert_eq!(active.len(), 1);

    let moved = client
        .trucks()
        .update_location(
            truck.id,
            &LocationUpdate {
                latitude: 38.72,
                longitude: -9.14,
                speed: 62.5,
                heading: "N".to_string(),
            },
        )
        .unwrap()
        .into_data();
    assert_eq!(moved.current_latitude, Some(38.72));
    assert!(moved.last_location_update.is_some());

    // Step 4: a shipment goes through assignment and delivery.
    let shipment = client
        .shipments()
        .create(&CreateShipmentRequest {
            origin: "Lisbon".to_string(),
            destination: "Porto".to_string(),
            weight: 120.5,
            customer_name: Some("Ana".to_string()),
            ..Default::default()
        })
        .unwrap()
        .into_data();
    assert_eq!(shipment.status, ShipmentStatus::Pending);
    assert!(shipment.tracking_number.starts_with("FH-"));
    assert!(shipment.estimated_delivery.is_some());

    let by_number = client
        .shipments()
        .get_by_tracking_number(&shipment.tracking_number)
        .unwrap()
        .into_data();
    assert_eq!(by_number.id, shipment.id);

    let updated = client
        .shipments()
        .update(
            shipment.id,
            &UpdateShipmentRequest {
                notes: Some("fragile".to_string()),
                ..Default::default()
            },
        )
        .unwrap()
        .into_data();
    assert_eq!(updated.notes.as_deref(), Some("fragile"));
    assert_eq!(updated.origin, "Lisbon");

    let assigned = client
        .shipments()
        .assign_driver(shipment.id, driver.id)
        .unwrap()
        .into_data();
    assert_eq!(assigned.status, ShipmentStatus::InTransit);
    assert_eq!(assigned.driver_id, Some(driver.id));
    assert_eq!(assigned.truck_id, Some(truck.id));

    let active_for_driver = client
        .shipments()
        .list_active_by_driver(driver.id)
        .unwrap()
        .into_data();
    assert_eq!(active_for_driver.len(), 1);

    // A driver on delivery can't lose their truck.
    let err = client.drivers().unassign_truck(driver.id).unwrap_err();
    assert_eq!(err.message(), "Cannot unassign truck while driver is on delivery");

    let delivered = client.shipments().mark_delivered(shipment.id).unwrap().into_data();
    assert_eq!(delivered.status, ShipmentStatus::Delivered);
    assert!(delivered.actual_delivery.is_some());
    let driver = client.drivers().get_by_id(driver.id).unwrap().into_data();
    assert_eq!(driver.status, DriverStatus::Available);
    assert_eq!(driver.total_deliveries, 1);
    assert!(client
        .shipments()
        .list_active_by_driver(driver.id)
        .unwrap()
        .into_data()
        .is_empty());
    assert_eq!(client.shipments().list_by_driver(driver.id).unwrap().data.len(), 1);

    // Step 5: public tracking works without a session.
    let public = FleetClient::new(&ClientConfig::new(&base), Arc::new(MemoryStore::new()));
    let tracking = public
        .tracking()
        .track(&shipment.tracking_number)
        .unwrap()
        .into_data();
    assert_eq!(tracking.status, ShipmentStatus::Delivered);
    assert_eq!(tracking.timeline.len(), 5);
    assert!(tracking.timeline[0].completed);
    assert!(tracking.timeline[2].completed);
    assert!(tracking.timeline[4].completed);

    // Step 6: warehouse inventory is delta-based and bounded.
    let warehouse = client
        .warehouses()
        .create(&CreateWarehouseRequest {
            name: "North Hub".to_string(),
            location: "Porto".to_string(),
            address: "Rua A 1".to_string(),
            capacity: 200,
            manager: "Rita".to_string(),
            phone: "+351 1".to_string(),
            latitude: None,
            longitude: None,
        })
        .unwrap()
        .into_data();
    let stocked = client.warehouses().update_inventory(warehouse.id, 170).unwrap().into_data();
    assert_eq!(stocked.capacity_usage_percentage, 85);
    let stocked = client.warehouses().update_inventory(warehouse.id, -5).unwrap().into_data();
    assert_eq!(stocked.current_inventory, 165);
    let err = client
        .warehouses()
        .update_inventory(warehouse.id, -500)
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.message(), "Inventory cannot be negative");
    assert_eq!(client.warehouses().list_high_occupancy().unwrap().data.len(), 1);
    assert!(client.warehouses().list_low_occupancy().unwrap().data.is_empty());

    let renamed = client
        .warehouses()
        .update(
            warehouse.id,
            &UpdateWarehouseRequest {
                manager: Some("Nuno".to_string()),
                ..Default::default()
            },
        )
        .unwrap()
        .into_data();
    assert_eq!(renamed.manager, "Nuno");
    assert_eq!(renamed.current_inventory, 165);

    // Step 7: dashboard reflects the state built above.
    let stats = client.dashboard().get_stats().unwrap().into_data();
    assert_eq!(stats.total_shipments, 1);
    assert_eq!(stats.delivered_shipments, 1);
    assert_eq!(stats.delivery_success_rate, 100.0);
    assert_eq!(stats.total_trucks, 1);
    assert_eq!(stats.total_drivers, 1);
    assert_eq!(stats.total_inventory, Some(165));
    assert_eq!(stats.weekly_deliveries.len(), 7);

    // Step 8: teardown, honouring the delete rules.
    let err = client.trucks().delete(truck.id).unwrap_err();
    assert_eq!(err.message(), "Cannot delete truck that is assigned to a driver");
    client.drivers().unassign_truck(driver.id).unwrap();
    assert!(client.trucks().delete(truck.id).unwrap().data.is_none());
    client.drivers().delete(driver.id).unwrap();

    let err = client.warehouses().delete(warehouse.id).unwrap_err();
    assert_eq!(err.message(), "Cannot delete warehouse with existing inventory");
    client.warehouses().update_inventory(warehouse.id, -165).unwrap();
    client.warehouses().delete(warehouse.id).unwrap();

    let deleted = client.shipments().delete(shipment.id).unwrap();
    assert!(deleted.success);
    let err = client.shipments().get_by_id(shipment.id).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.message(),
        format!("Shipment not found with id: {}", shipment.id)
    );

    // Step 9: logging out drops the token; protected calls fail again.
    client.auth().logout().unwrap();
    assert!(client.tokens().token().is_none());
    assert!(client.dashboard().get_stats().unwrap_err().is_unauthorized());
}

#[test]
fn session_survives_in_file_store() {
    let base = start_server();
    let dir = tempfile::tempdir().unwrap();

    let client = FleetClient::new(&ClientConfig::new(&base), Arc::new(FileStore::new(dir.path())));
    client
        .auth()
        .register(&RegisterRequest {
            name: "Ops".to_string(),
            email: "ops@fleet.io".to_string(),
            password: "secret1".to_string(),
            role: None,
        })
        .unwrap();
    let session = client.auth().login_and_remember("ops@fleet.io", "secret1").unwrap();
    assert_eq!(session.role, Role::Customer);

    // A second client over the same directory picks the session up.
    let reopened = FleetClient::new(&ClientConfig::new(&base), Arc::new(FileStore::new(dir.path())));
    assert_eq!(reopened.tokens().token(), Some(session.token));
    assert!(reopened.trucks().list().unwrap().data.is_empty());

    let err = reopened.auth().login("ops@fleet.io", "wrong-password").unwrap_err();
    assert_eq!(err.message(), "Invalid email or password");
}

#[test]
fn unreachable_server_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = FleetClient::new(
        &ClientConfig::new(&format!("http://{addr}/api")),
        Arc::new(MemoryStore::new()),
    );
    let err = client.tracking().track("FH-2024-001").unwrap_err();
    assert!(matches!(err, fleet_core::ApiError::Transport(_)));
    assert_eq!(err.status(), None);
}

//! In-memory backend state and the rules applied to it.
//!
//! Relations are stored one way (shipment -> driver/truck, driver -> truck)
//! and the denormalized names in responses are filled in at render time, so
//! a rename shows up everywhere without bookkeeping.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, Local, NaiveDateTime, Weekday};
use uuid::Uuid;

use crate::envelope::{ApiFailure, ApiResult};
use crate::models::*;

/// Steps shown on the public tracking page, in order.
const TRACKING_FLOW: [ShipmentStatus; 5] = [
    ShipmentStatus::Pending,
    ShipmentStatus::PickedUp,
    ShipmentStatus::InTransit,
    ShipmentStatus::OutForDelivery,
    ShipmentStatus::Delivered,
];

struct User {
    id: i64,
    name: String,
    email: String,
    password: String,
    role: Role,
}

struct TimelineRecord {
    status: ShipmentStatus,
    location: String,
    at: NaiveDateTime,
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn usage_percentage(inventory: i64, capacity: i64) -> i32 {
    if capacity == 0 {
        return 0;
    }
    (inventory as f64 * 100.0 / capacity as f64).round() as i32
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    shipment_counter: u32,
    users: Vec<User>,
    tokens: HashMap<String, i64>,
    shipments: BTreeMap<i64, Shipment>,
    timelines: HashMap<i64, Vec<TimelineRecord>>,
    trucks: BTreeMap<i64, Truck>,
    drivers: BTreeMap<i64, Driver>,
    warehouses: BTreeMap<i64, Warehouse>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    // --- auth ---

    pub fn register(&mut self, req: RegisterRequest) -> ApiResult<AuthResponse> {
        if req.name.trim().is_empty() || req.email.trim().is_empty() {
            return Err(ApiFailure::bad_request("Validation failed"));
        }
        if req.password.len() < 6 {
            return Err(ApiFailure::bad_request("Password must be at least 6 characters"));
        }
        if self.users.iter().any(|u| u.email.eq_ignore_ascii_case(&req.email)) {
            return Err(ApiFailure::bad_request("Email already registered"));
        }
        let id = self.next_id();
        self.users.push(User {
            id,
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role.unwrap_or(Role::Customer),
        });
        self.issue_token(id)
    }

    pub fn login(&mut self, req: LoginRequest) -> ApiResult<AuthResponse> {
        let id = self
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(&req.email) && u.password == req.password)
            .map(|u| u.id)
            .ok_or_else(|| ApiFailure::unauthorized("Invalid email or password"))?;
        self.issue_token(id)
    }

    fn issue_token(&mut self, user_id: i64) -> ApiResult<AuthResponse> {
        let user = self
            .users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| ApiFailure::unauthorized("Invalid email or password"))?;
        let token = Uuid::new_v4().simple().to_string();
        let response = AuthResponse {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            token: token.clone(),
        };
        self.tokens.insert(token, user_id);
        Ok(response)
    }

    pub fn is_valid_token(&self, token: &str) -> bool {
        self.tokens.contains_key(token)
    }

    // --- shipments ---

    fn shipment_view(&self, shipment: &Shipment) -> Shipment {
        let mut view = shipment.clone();
        view.driver_name = shipment
            .driver_id
            .and_then(|id| self.drivers.get(&id))
            .map(|d| d.name.clone());
        view.truck_license_plate = shipment
            .truck_id
            .and_then(|id| self.trucks.get(&id))
            .map(|t| t.license_plate.clone());
        view
    }

    fn shipment_mut(&mut self, id: i64) -> ApiResult<&mut Shipment> {
        self.shipments
            .get_mut(&id)
            .ok_or_else(|| ApiFailure::not_found(format!("Shipment not found with id: {id}")))
    }

    fn record_status(&mut self, id: i64, status: ShipmentStatus) {
        let Some(shipment) = self.shipments.get_mut(&id) else {
            return;
        };
        shipment.status = status;
        shipment.updated_at = now();
        let location = match status {
            ShipmentStatus::Pending => shipment.origin.clone(),
            ShipmentStatus::PickedUp => format!("{} (Pickup Location)", shipment.origin),
            ShipmentStatus::InTransit => "In Transit".to_string(),
            ShipmentStatus::OutForDelivery => format!("{} (Local Hub)", shipment.destination),
            ShipmentStatus::Delivered => shipment.destination.clone(),
            ShipmentStatus::Cancelled => "Cancelled".to_string(),
        };
        self.timelines.entry(id).or_default().push(TimelineRecord {
            status,
            location,
            at: now(),
        });
    }

    pub fn list_shipments(&self) -> Vec<Shipment> {
        self.shipments.values().map(|s| self.shipment_view(s)).collect()
    }

    pub fn get_shipment(&self, id: i64) -> ApiResult<Shipment> {
        self.shipments
            .get(&id)
            .map(|s| self.shipment_view(s))
            .ok_or_else(|| ApiFailure::not_found(format!("Shipment not found with id: {id}")))
    }

    pub fn get_shipment_by_tracking(&self, tracking_number: &str) -> ApiResult<Shipment> {
        self.shipments
            .values()
            .find(|s| s.tracking_number == tracking_number)
            .map(|s| self.shipment_view(s))
            .ok_or_else(|| {
                ApiFailure::not_found(format!(
                    "Shipment not found with tracking number: {tracking_number}"
                ))
            })
    }

    pub fn create_shipment(&mut self, req: CreateShipment) -> ApiResult<Shipment> {
        if req.origin.trim().is_empty() || req.destination.trim().is_empty() {
            return Err(ApiFailure::bad_request("Validation failed"));
        }
        if req.weight <= 0.0 {
            return Err(ApiFailure::bad_request("Weight must be positive"));
        }
        if let Some(warehouse_id) = req.warehouse_id {
            if !self.warehouses.contains_key(&warehouse_id) {
                return Err(ApiFailure::not_found("Warehouse not found"));
            }
        }

        self.shipment_counter += 1;
        let created = now();
        let id = self.next_id();
        let shipment = Shipment {
            id,
            tracking_number: format!("FH-{}-{:03}", created.year(), self.shipment_counter),
            origin: req.origin,
            destination: req.destination,
            status: ShipmentStatus::Pending,
            weight: req.weight,
            driver_id: None,
            driver_name: None,
            truck_id: None,
            truck_license_plate: None,
            customer_name: req.customer_name,
            customer_phone: req.customer_phone,
            customer_email: req.customer_email,
            notes: req.notes,
            estimated_delivery: Some(
                req.estimated_delivery
                    .unwrap_or_else(|| created.date() + Duration::days(7)),
            ),
            actual_delivery: None,
            created_at: created,
            updated_at: created,
        };
        self.shipments.insert(id, shipment);
        self.record_status(id, ShipmentStatus::Pending);
        self.get_shipment(id)
    }

    pub fn update_shipment(&mut self, id: i64, req: UpdateShipment) -> ApiResult<Shipment> {
        let shipment = self.shipment_mut(id)?;
        if let Some(origin) = req.origin {
            shipment.origin = origin;
        }
        if let Some(destination) = req.destination {
            shipment.destination = destination;
        }
        if let Some(weight) = req.weight {
            shipment.weight = weight;
        }
        if let Some(name) = req.customer_name {
            shipment.customer_name = Some(name);
        }
        if let Some(phone) = req.customer_phone {
            shipment.customer_phone = Some(phone);
        }
        if let Some(email) = req.customer_email {
            shipment.customer_email = Some(email);
        }
        if let Some(notes) = req.notes {
            shipment.notes = Some(notes);
        }
        if let Some(date) = req.estimated_delivery {
            shipment.estimated_delivery = Some(date);
        }
        shipment.updated_at = now();
        let current = shipment.status;
        if let Some(status) = req.status.filter(|s| *s != current) {
            self.record_status(id, status);
        }
        self.get_shipment(id)
    }

    pub fn assign_driver(&mut self, id: i64, driver_id: i64) -> ApiResult<Shipment> {
        self.shipment_mut(id)?;
        let driver = self
            .drivers
            .get_mut(&driver_id)
            .ok_or_else(|| ApiFailure::not_found("Driver not found"))?;
        if driver.status != DriverStatus::Available {
            return Err(ApiFailure::bad_request("Driver is not available"));
        }
        driver.status = DriverStatus::OnDelivery;
        driver.updated_at = now();
        let truck_id = driver.assigned_truck_id;

        let shipment = self.shipment_mut(id)?;
        shipment.driver_id = Some(driver_id);
        if truck_id.is_some() {
            shipment.truck_id = truck_id;
        }
        self.record_status(id, ShipmentStatus::InTransit);
        self.get_shipment(id)
    }

    pub fn mark_delivered(&mut self, id: i64) -> ApiResult<Shipment> {
        let shipment = self.shipment_mut(id)?;
        shipment.actual_delivery = Some(now().date());
        let driver_id = shipment.driver_id;
        self.record_status(id, ShipmentStatus::Delivered);
        if let Some(driver) = driver_id.and_then(|d| self.drivers.get_mut(&d)) {
            driver.status = DriverStatus::Available;
            driver.total_deliveries += 1;
            driver.updated_at = now();
        }
        self.get_shipment(id)
    }

    pub fn delete_shipment(&mut self, id: i64) -> ApiResult<()> {
        self.shipments
            .remove(&id)
            .ok_or_else(|| ApiFailure::not_found(format!("Shipment not found with id: {id}")))?;
        self.timelines.remove(&id);
        Ok(())
    }

    pub fn shipments_by_driver(&self, driver_id: i64, active_only: bool) -> Vec<Shipment> {
        self.shipments
            .values()
            .filter(|s| s.driver_id == Some(driver_id))
            .filter(|s| !active_only || s.status != ShipmentStatus::Delivered)
            .map(|s| self.shipment_view(s))
            .collect()
    }

    pub fn track(&self, tracking_number: &str) -> ApiResult<TrackingResponse> {
        let shipment = self
            .shipments
            .values()
            .find(|s| s.tracking_number == tracking_number)
            .ok_or_else(|| ApiFailure::not_found("Shipment not found"))?;
        let history = self.timelines.get(&shipment.id);

        let timeline = TRACKING_FLOW
            .iter()
            .map(|&status| {
                let reached = history.and_then(|h| h.iter().find(|r| r.status == status));
                match reached {
                    Some(record) => TimelineEntry {
                        status,
                        location: record.location.clone(),
                        timestamp: record.at.format("%Y-%m-%d %I:%M %p").to_string(),
                        completed: true,
                    },
                    None => TimelineEntry {
                        status,
                        location: expected_location(shipment, status),
                        timestamp: expected_timestamp(shipment, status),
                        completed: false,
                    },
                }
            })
            .collect();

        Ok(TrackingResponse {
            tracking_number: shipment.tracking_number.clone(),
            status: shipment.status,
            origin: shipment.origin.clone(),
            destination: shipment.destination.clone(),
            estimated_delivery: shipment.estimated_delivery,
            weight: shipment.weight,
            timeline,
        })
    }

    // --- trucks ---

    fn truck_view(&self, truck: &Truck) -> Truck {
        let mut view = truck.clone();
        let driver = self
            .drivers
            .values()
            .find(|d| d.assigned_truck_id == Some(truck.id));
        view.assigned_driver_id = driver.map(|d| d.id);
        view.assigned_driver_name = driver.map(|d| d.name.clone());
        view
    }

    fn trucks_where(&self, keep: impl Fn(&Truck) -> bool) -> Vec<Truck> {
        self.trucks
            .values()
            .filter(|t| keep(t))
            .map(|t| self.truck_view(t))
            .collect()
    }

    pub fn list_trucks(&self) -> Vec<Truck> {
        self.trucks_where(|_| true)
    }

    pub fn trucks_with_status(&self, status: TruckStatus) -> Vec<Truck> {
        self.trucks_where(|t| t.status == status)
    }

    pub fn get_truck(&self, id: i64) -> ApiResult<Truck> {
        self.trucks
            .get(&id)
            .map(|t| self.truck_view(t))
            .ok_or_else(|| ApiFailure::not_found(format!("Truck not found with id: {id}")))
    }

    pub fn get_truck_by_plate(&self, plate: &str) -> ApiResult<Truck> {
        self.trucks
            .values()
            .find(|t| t.license_plate == plate)
            .map(|t| self.truck_view(t))
            .ok_or_else(|| {
                ApiFailure::not_found(format!("Truck not found with license plate: {plate}"))
            })
    }

    pub fn create_truck(&mut self, req: CreateTruck) -> ApiResult<Truck> {
        if self.trucks.values().any(|t| t.license_plate == req.license_plate) {
            return Err(ApiFailure::bad_request(
                "Truck with this license plate already exists",
            ));
        }
        let created = now();
        let id = self.next_id();
        self.trucks.insert(
            id,
            Truck {
                id,
                license_plate: req.license_plate,
                model: req.model,
                capacity: req.capacity,
                status: req.status.unwrap_or(TruckStatus::Available),
                mileage: 0,
                last_service: None,
                next_service: None,
                current_latitude: None,
                current_longitude: None,
                current_speed: None,
                heading: None,
                last_location_update: None,
                assigned_driver_id: None,
                assigned_driver_name: None,
                created_at: created,
                updated_at: created,
            },
        );
        self.get_truck(id)
    }

    pub fn update_truck(&mut self, id: i64, req: UpdateTruck) -> ApiResult<Truck> {
        if let Some(plate) = &req.license_plate {
            if self
                .trucks
                .values()
                .any(|t| t.id != id && &t.license_plate == plate)
            {
                return Err(ApiFailure::bad_request("License plate already in use"));
            }
        }
        let truck = self
            .trucks
            .get_mut(&id)
            .ok_or_else(|| ApiFailure::not_found(format!("Truck not found with id: {id}")))?;
        if let Some(plate) = req.license_plate {
            truck.license_plate = plate;
        }
        if let Some(model) = req.model {
            truck.model = model;
        }
        if let Some(capacity) = req.capacity {
            truck.capacity = capacity;
        }
        if let Some(status) = req.status {
            truck.status = status;
        }
        if let Some(mileage) = req.mileage {
            truck.mileage = mileage;
        }
        if let Some(date) = req.last_service {
            truck.last_service = Some(date);
            truck.next_service = Some(date + Duration::days(90));
        }
        truck.updated_at = now();
        self.get_truck(id)
    }

    pub fn update_location(&mut self, id: i64, req: LocationUpdate) -> ApiResult<Truck> {
        let truck = self
            .trucks
            .get_mut(&id)
            .ok_or_else(|| ApiFailure::not_found(format!("Truck not found with id: {id}")))?;
        truck.current_latitude = Some(req.latitude);
        truck.current_longitude = Some(req.longitude);
        truck.current_speed = Some(req.speed);
        truck.heading = Some(req.heading);
        truck.last_location_update = Some(now());
        self.get_truck(id)
    }

    pub fn delete_truck(&mut self, id: i64) -> ApiResult<()> {
        if !self.trucks.contains_key(&id) {
            return Err(ApiFailure::not_found(format!("Truck not found with id: {id}")));
        }
        if self.drivers.values().any(|d| d.assigned_truck_id == Some(id)) {
            return Err(ApiFailure::bad_request(
                "Cannot delete truck that is assigned to a driver",
            ));
        }
        self.trucks.remove(&id);
        Ok(())
    }

    // --- drivers ---

    fn driver_view(&self, driver: &Driver) -> Driver {
        let mut view = driver.clone();
        view.assigned_truck_plate = driver
            .assigned_truck_id
            .and_then(|id| self.trucks.get(&id))
            .map(|t| t.license_plate.clone());
        view
    }

    pub fn list_drivers(&self) -> Vec<Driver> {
        self.drivers.values().map(|d| self.driver_view(d)).collect()
    }

    pub fn drivers_with_status(&self, status: DriverStatus) -> Vec<Driver> {
        self.drivers
            .values()
            .filter(|d| d.status == status)
            .map(|d| self.driver_view(d))
            .collect()
    }

    pub fn get_driver(&self, id: i64) -> ApiResult<Driver> {
        self.drivers
            .get(&id)
            .map(|d| self.driver_view(d))
            .ok_or_else(|| ApiFailure::not_found(format!("Driver not found with id: {id}")))
    }

    pub fn get_driver_by_email(&self, email: &str) -> ApiResult<Driver> {
        self.drivers
            .values()
            .find(|d| d.email.eq_ignore_ascii_case(email))
            .map(|d| self.driver_view(d))
            .ok_or_else(|| ApiFailure::not_found(format!("Driver not found with email: {email}")))
    }

    pub fn create_driver(&mut self, req: CreateDriver) -> ApiResult<Driver> {
        if self.drivers.values().any(|d| d.email.eq_ignore_ascii_case(&req.email)) {
            return Err(ApiFailure::bad_request("Driver with this email already exists"));
        }
        if self
            .drivers
            .values()
            .any(|d| d.license_number == req.license_number)
        {
            return Err(ApiFailure::bad_request(
                "Driver with this license number already exists",
            ));
        }
        let created = now();
        let id = self.next_id();
        self.drivers.insert(
            id,
            Driver {
                id,
                name: req.name,
                email: req.email,
                phone: req.phone,
                license_number: req.license_number,
                status: DriverStatus::Available,
                assigned_truck_id: None,
                assigned_truck_plate: None,
                total_deliveries: 0,
                created_at: created,
                updated_at: created,
            },
        );
        self.get_driver(id)
    }

    pub fn update_driver(&mut self, id: i64, req: UpdateDriver) -> ApiResult<Driver> {
        if let Some(email) = &req.email {
            if self
                .drivers
                .values()
                .any(|d| d.id != id && d.email.eq_ignore_ascii_case(email))
            {
                return Err(ApiFailure::bad_request("Email already in use"));
            }
        }
        if let Some(license) = &req.license_number {
            if self
                .drivers
                .values()
                .any(|d| d.id != id && &d.license_number == license)
            {
                return Err(ApiFailure::bad_request("License number already in use"));
            }
        }
        let driver = self
            .drivers
            .get_mut(&id)
            .ok_or_else(|| ApiFailure::not_found(format!("Driver not found with id: {id}")))?;
        if let Some(name) = req.name {
            driver.name = name;
        }
        if let Some(email) = req.email {
            driver.email = email;
        }
        if let Some(phone) = req.phone {
            driver.phone = phone;
        }
        if let Some(license) = req.license_number {
            driver.license_number = license;
        }
        if let Some(status) = req.status {
            driver.status = status;
        }
        driver.updated_at = now();
        self.get_driver(id)
    }

    pub fn assign_truck(&mut self, driver_id: i64, truck_id: i64) -> ApiResult<Driver> {
        if !self.drivers.contains_key(&driver_id) {
            return Err(ApiFailure::not_found("Driver not found"));
        }
        let truck = self
            .trucks
            .get(&truck_id)
            .ok_or_else(|| ApiFailure::not_found("Truck not found"))?;
        if truck.status != TruckStatus::Available {
            return Err(ApiFailure::bad_request("Truck is not available"));
        }
        if self
            .drivers
            .values()
            .any(|d| d.assigned_truck_id == Some(truck_id))
        {
            return Err(ApiFailure::bad_request(
                "Truck is already assigned to another driver",
            ));
        }
        if let Some(truck) = self.trucks.get_mut(&truck_id) {
            truck.status = TruckStatus::InUse;
            truck.updated_at = now();
        }
        if let Some(driver) = self.drivers.get_mut(&driver_id) {
            driver.assigned_truck_id = Some(truck_id);
            driver.updated_at = now();
        }
        self.get_driver(driver_id)
    }

    pub fn unassign_truck(&mut self, driver_id: i64) -> ApiResult<Driver> {
        let driver = self
            .drivers
            .get_mut(&driver_id)
            .ok_or_else(|| ApiFailure::not_found("Driver not found"))?;
        let Some(truck_id) = driver.assigned_truck_id else {
            return Err(ApiFailure::bad_request(
                "Driver doesn't have an assigned truck",
            ));
        };
        if driver.status == DriverStatus::OnDelivery {
            return Err(ApiFailure::bad_request(
                "Cannot unassign truck while driver is on delivery",
            ));
        }
        driver.assigned_truck_id = None;
        driver.updated_at = now();
        if let Some(truck) = self.trucks.get_mut(&truck_id) {
            truck.status = TruckStatus::Available;
            truck.updated_at = now();
        }
        self.get_driver(driver_id)
    }

    pub fn delete_driver(&mut self, id: i64) -> ApiResult<()> {
        let driver = self
            .drivers
            .get(&id)
            .ok_or_else(|| ApiFailure::not_found(format!("Driver not found with id: {id}")))?;
        if driver.status == DriverStatus::OnDelivery {
            return Err(ApiFailure::bad_request(
                "Cannot delete driver who is currently on delivery",
            ));
        }
        if let Some(truck) = driver.assigned_truck_id.and_then(|t| self.trucks.get_mut(&t)) {
            truck.status = TruckStatus::Available;
        }
        self.drivers.remove(&id);
        Ok(())
    }

    // --- warehouses ---

    fn warehouses_where(&self, keep: impl Fn(&Warehouse) -> bool) -> Vec<Warehouse> {
        self.warehouses.values().filter(|w| keep(w)).cloned().collect()
    }

    pub fn list_warehouses(&self) -> Vec<Warehouse> {
        self.warehouses_where(|_| true)
    }

    pub fn low_occupancy(&self) -> Vec<Warehouse> {
        self.warehouses_where(|w| (w.current_inventory as f64) < w.capacity as f64 * 0.5)
    }

    pub fn high_occupancy(&self) -> Vec<Warehouse> {
        self.warehouses_where(|w| (w.current_inventory as f64) >= w.capacity as f64 * 0.8)
    }

    pub fn get_warehouse(&self, id: i64) -> ApiResult<Warehouse> {
        self.warehouses
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiFailure::not_found(format!("Warehouse not found with id: {id}")))
    }

    fn warehouse_mut(&mut self, id: i64) -> ApiResult<&mut Warehouse> {
        self.warehouses
            .get_mut(&id)
            .ok_or_else(|| ApiFailure::not_found(format!("Warehouse not found with id: {id}")))
    }

    pub fn create_warehouse(&mut self, req: CreateWarehouse) -> ApiResult<Warehouse> {
        if req.capacity <= 0 {
            return Err(ApiFailure::bad_request("Capacity must be positive"));
        }
        if self.warehouses.values().any(|w| w.name == req.name) {
            return Err(ApiFailure::bad_request("Warehouse with this name already exists"));
        }
        let created = now();
        let id = self.next_id();
        let warehouse = Warehouse {
            id,
            name: req.name,
            location: req.location,
            address: req.address,
            capacity: req.capacity,
            current_inventory: 0,
            capacity_usage_percentage: 0,
            manager: req.manager,
            phone: req.phone,
            latitude: req.latitude,
            longitude: req.longitude,
            created_at: created,
            updated_at: created,
        };
        self.warehouses.insert(id, warehouse.clone());
        Ok(warehouse)
    }

    pub fn update_warehouse(&mut self, id: i64, req: UpdateWarehouse) -> ApiResult<Warehouse> {
        let warehouse = self.warehouse_mut(id)?;
        if let Some(name) = req.name {
            warehouse.name = name;
        }
        if let Some(location) = req.location {
            warehouse.location = location;
        }
        if let Some(address) = req.address {
            warehouse.address = address;
        }
        if let Some(capacity) = req.capacity {
            warehouse.capacity = capacity;
        }
        if let Some(manager) = req.manager {
            warehouse.manager = manager;
        }
        if let Some(phone) = req.phone {
            warehouse.phone = phone;
        }
        if let Some(lat) = req.latitude {
            warehouse.latitude = Some(lat);
        }
        if let Some(lon) = req.longitude {
            warehouse.longitude = Some(lon);
        }
        warehouse.capacity_usage_percentage =
            usage_percentage(warehouse.current_inventory, warehouse.capacity);
        warehouse.updated_at = now();
        Ok(warehouse.clone())
    }

    pub fn update_inventory(&mut self, id: i64, change_amount: i64) -> ApiResult<Warehouse> {
        let warehouse = self.warehouse_mut(id)?;
        let next = match warehouse.current_inventory.checked_add(change_amount) {
            Some(next) => next,
            None if change_amount < 0 => {
                return Err(ApiFailure::bad_request("Inventory cannot be negative"))
            }
            None => return Err(ApiFailure::bad_request("Inventory cannot exceed capacity")),
        };
        if next < 0 {
            return Err(ApiFailure::bad_request("Inventory cannot be negative"));
        }
        if next > warehouse.capacity {
            return Err(ApiFailure::bad_request("Inventory cannot exceed capacity"));
        }
        warehouse.current_inventory = next;
        warehouse.capacity_usage_percentage = usage_percentage(next, warehouse.capacity);
        warehouse.updated_at = now();
        Ok(warehouse.clone())
    }

    pub fn delete_warehouse(&mut self, id: i64) -> ApiResult<()> {
        let warehouse = self.warehouse_mut(id)?;
        if warehouse.current_inventory > 0 {
            return Err(ApiFailure::bad_request(
                "Cannot delete warehouse with existing inventory",
            ));
        }
        self.warehouses.remove(&id);
        Ok(())
    }

    // --- dashboard ---

    pub fn dashboard(&self) -> DashboardStats {
        let count_shipments =
            |keep: fn(ShipmentStatus) -> bool| self.shipments.values().filter(|s| keep(s.status)).count() as u64;
        let count_trucks =
            |status: TruckStatus| self.trucks.values().filter(|t| t.status == status).count() as u64;
        let count_drivers =
            |status: DriverStatus| self.drivers.values().filter(|d| d.status == status).count() as u64;

        let total_shipments = self.shipments.len() as u64;
        let delivered = count_shipments(|s| s == ShipmentStatus::Delivered);
        let success_rate = if total_shipments > 0 {
            (delivered as f64 * 100.0 / total_shipments as f64 * 10.0).round() / 10.0
        } else {
            0.0
        };

        let cutoff = now() - Duration::days(7);
        let mut recent: Vec<&Shipment> = self
            .shipments
            .values()
            .filter(|s| s.created_at >= cutoff)
            .collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        DashboardStats {
            total_shipments,
            active_shipments: count_shipments(|s| {
                matches!(
                    s,
                    ShipmentStatus::Pending
                        | ShipmentStatus::PickedUp
                        | ShipmentStatus::InTransit
                        | ShipmentStatus::OutForDelivery
                )
            }),
            delivered_shipments: delivered,
            pending_shipments: count_shipments(|s| s == ShipmentStatus::Pending),
            total_trucks: self.trucks.len() as u64,
            available_trucks: count_trucks(TruckStatus::Available),
            trucks_in_use: count_trucks(TruckStatus::InUse),
            trucks_in_maintenance: count_trucks(TruckStatus::Maintenance),
            total_drivers: self.drivers.len() as u64,
            available_drivers: count_drivers(DriverStatus::Available),
            drivers_on_delivery: count_drivers(DriverStatus::OnDelivery),
            drivers_off_duty: count_drivers(DriverStatus::OffDuty),
            total_warehouses: self.warehouses.len() as u64,
            total_warehouse_capacity: self.warehouses.values().map(|w| w.capacity).sum(),
            total_inventory: self.warehouses.values().map(|w| w.current_inventory).sum(),
            delivery_success_rate: success_rate,
            average_delivery_time: self.average_delivery_days(),
            weekly_deliveries: self.weekly_deliveries(),
            recent_shipments: recent
                .into_iter()
                .take(5)
                .map(|s| self.shipment_view(s))
                .collect(),
        }
    }

    /// Mean days from creation to delivery over delivered shipments.
    fn average_delivery_days(&self) -> f64 {
        let days: Vec<i64> = self
            .shipments
            .values()
            .filter_map(|s| s.actual_delivery.map(|d| (d - s.created_at.date()).num_days()))
            .collect();
        if days.is_empty() {
            return 0.0;
        }
        let mean = days.iter().sum::<i64>() as f64 / days.len() as f64;
        (mean * 10.0).round() / 10.0
    }

    /// Deliveries and still-pending creations per weekday, Monday first.
    fn weekly_deliveries(&self) -> Vec<WeeklyDeliveries> {
        const DAYS: [(Weekday, &str); 7] = [
            (Weekday::Mon, "Mon"),
            (Weekday::Tue, "Tue"),
            (Weekday::Wed, "Wed"),
            (Weekday::Thu, "Thu"),
            (Weekday::Fri, "Fri"),
            (Weekday::Sat, "Sat"),
            (Weekday::Sun, "Sun"),
        ];
        DAYS.iter()
            .map(|(weekday, label)| WeeklyDeliveries {
                day: label.to_string(),
                deliveries: self
                    .shipments
                    .values()
                    .filter(|s| s.actual_delivery.map(|d| d.weekday()) == Some(*weekday))
                    .count() as u32,
                pending: self
                    .shipments
                    .values()
                    .filter(|s| {
                        s.status == ShipmentStatus::Pending && s.created_at.weekday() == *weekday
                    })
                    .count() as u32,
            })
            .collect()
    }
}

fn expected_location(shipment: &Shipment, status: ShipmentStatus) -> String {
    match status {
        ShipmentStatus::Pending | ShipmentStatus::PickedUp => shipment.origin.clone(),
        ShipmentStatus::InTransit => "Transit Hub".to_string(),
        ShipmentStatus::OutForDelivery => format!("{} Distribution Center", shipment.destination),
        ShipmentStatus::Delivered => shipment.destination.clone(),
        ShipmentStatus::Cancelled => "Unknown".to_string(),
    }
}

fn expected_timestamp(shipment: &Shipment, status: ShipmentStatus) -> String {
    let Some(eta) = shipment.estimated_delivery else {
        return "Pending".to_string();
    };
    match status {
        ShipmentStatus::OutForDelivery => format!("Expected {}", eta - Duration::days(1)),
        ShipmentStatus::Delivered => format!("Expected {eta}"),
        _ => "Pending".to_string(),
    }
}

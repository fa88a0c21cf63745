//! In-process store for local runs and tests.
//!
//! All tables sit behind one async mutex, so every trait method observes and
//! mutates a consistent snapshot: check-then-write sequences cannot interleave.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use super::{BookingOutcome, PaymentRecording, Store, StoreError, StoreResult, VehicleRegistration};
use crate::models::{
    Availability, BookedRide, CompletedRide, Driver, DriverSummary, NewDriver, NewFeedback,
    NewMaintenance, NewPassenger, NewPayment, NewPromotion, NewSupportRequest, NewVehicle,
    Passenger, PassengerSummary, Ride, RideBooking, RideStatus, Vehicle,
};

/// Rows keyed by id, with ids handed out the way a serial column would.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, build(id));
        id
    }

    fn get(&self, id: i64) -> Option<&T> {
        self.rows.get(&id)
    }

    fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    fn values(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.rows.values()
    }
}

#[derive(Debug, Default)]
struct Tables {
    drivers: Table<Driver>,
    passengers: Table<Passenger>,
    vehicles: Table<Vehicle>,
    rides: Table<Ride>,
    payments: Table<NewPayment>,
    feedback: Table<NewFeedback>,
    maintenance: Table<NewMaintenance>,
    promotions: Table<NewPromotion>,
    support_requests: Table<NewSupportRequest>,
}

impl Tables {
    fn require(present: bool, table: &'static str, id: i64) -> StoreResult<()> {
        if present {
            Ok(())
        } else {
            Err(StoreError::MissingReference { table, id })
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_driver(&self, driver: NewDriver) -> StoreResult<i64> {
        let mut tables = self.tables.lock().await;
        Ok(tables.drivers.insert_with(|id| Driver {
            id,
            name: driver.name,
            contact_number: driver.contact_number,
            status: driver.status,
            schedule: driver.schedule,
            rating: driver.rating,
            insurance_document: driver.insurance_document,
            driving_license_number: driver.driving_license_number,
            preferred_payment_method: driver.preferred_payment_method,
        }))
    }

    async fn insert_passenger(&self, passenger: NewPassenger) -> StoreResult<i64> {
        let mut tables = self.tables.lock().await;
        Ok(tables.passengers.insert_with(|id| Passenger {
            id,
            name: passenger.name,
            contact_no: passenger.contact_no,
            email: passenger.email,
            payment_details: passenger.payment_details,
        }))
    }

    async fn register_vehicle(&self, vehicle: NewVehicle) -> StoreResult<VehicleRegistration> {
        let mut tables = self.tables.lock().await;

        if !tables.drivers.contains(vehicle.driver_id) {
            return Ok(VehicleRegistration::DriverNotFound);
        }
        if tables
            .vehicles
            .values()
            .any(|v| v.license_plate == vehicle.license_plate)
        {
            return Ok(VehicleRegistration::DuplicatePlate);
        }

        let id = tables.vehicles.insert_with(|id| Vehicle {
            id,
            make: vehicle.make,
            license_plate: vehicle.license_plate,
            color: vehicle.color,
            vehicle_type: vehicle.vehicle_type,
            insurance_policy_number: vehicle.insurance_policy_number,
            child_seat_available: vehicle.child_seat_available,
            capacity: vehicle.capacity,
            status: Availability::Available,
            driver_id: vehicle.driver_id,
        });
        Ok(VehicleRegistration::Registered(id))
    }

    async fn book_ride(&self, booking: RideBooking) -> StoreResult<BookingOutcome> {
        let mut tables = self.tables.lock().await;

        let Some(vehicle) = tables
            .vehicles
            .get(booking.vehicle_id)
            .filter(|v| v.status == Availability::Available)
        else {
            return Ok(BookingOutcome::VehicleUnavailable);
        };
        let owner_id = vehicle.driver_id;
        let vehicle_make = vehicle.make.clone();

        let Some(driver) = tables.drivers.get(owner_id) else {
            return Ok(BookingOutcome::VehicleUnavailable);
        };
        let driver_name = driver.name.clone();

        if owner_id != booking.driver_id {
            return Ok(BookingOutcome::DriverMismatch { owner_id });
        }
        if !tables.passengers.contains(booking.passenger_id) {
            return Ok(BookingOutcome::PassengerNotFound);
        }

        // Every check passed; the three writes below cannot fail.
        let ride_id = tables.rides.insert_with(|id| Ride {
            id,
            fare: booking.fare,
            status: RideStatus::Pending,
            pickup_location: booking.pickup_location,
            dropoff_location: booking.dropoff_location,
            vehicle_id: booking.vehicle_id,
            passenger_id: booking.passenger_id,
            driver_id: booking.driver_id,
            created_at: Utc::now(),
        });
        if let Some(vehicle) = tables.vehicles.get_mut(booking.vehicle_id) {
            vehicle.status = Availability::Unavailable;
        }
        if let Some(driver) = tables.drivers.get_mut(booking.driver_id) {
            driver.status = Availability::Unavailable;
        }

        Ok(BookingOutcome::Booked(BookedRide {
            ride_id,
            fare: booking.fare,
            driver_name,
            vehicle_make,
        }))
    }

    async fn record_payment(&self, payment: NewPayment) -> StoreResult<PaymentRecording> {
        let mut tables = self.tables.lock().await;

        if !tables.rides.contains(payment.ride_id) {
            return Ok(PaymentRecording::RideNotFound);
        }
        if tables.payments.values().any(|p| p.ride_id == payment.ride_id) {
            return Ok(PaymentRecording::AlreadyPaid);
        }

        let ride_id = payment.ride_id;
        let ride_completed = payment.completes_ride();
        let payment_id = tables.payments.insert_with(|_| payment);
        if ride_completed {
            if let Some(ride) = tables.rides.get_mut(ride_id) {
                ride.status = RideStatus::Completed;
            }
        }

        Ok(PaymentRecording::Recorded {
            payment_id,
            ride_completed,
        })
    }

    async fn insert_feedback(&self, feedback: NewFeedback) -> StoreResult<i64> {
        let mut tables = self.tables.lock().await;
        Tables::require(tables.rides.contains(feedback.ride_id), "rides", feedback.ride_id)?;
        Ok(tables.feedback.insert_with(|_| feedback))
    }

    async fn insert_maintenance(&self, maintenance: NewMaintenance) -> StoreResult<i64> {
        let mut tables = self.tables.lock().await;
        Tables::require(
            tables.vehicles.contains(maintenance.vehicle_id),
            "vehicles",
            maintenance.vehicle_id,
        )?;
        Ok(tables.maintenance.insert_with(|_| maintenance))
    }

    async fn insert_promotion(&self, promotion: NewPromotion) -> StoreResult<i64> {
        let mut tables = self.tables.lock().await;
        Ok(tables.promotions.insert_with(|_| promotion))
    }

    async fn insert_support_request(&self, request: NewSupportRequest) -> StoreResult<i64> {
        let mut tables = self.tables.lock().await;
        Tables::require(tables.rides.contains(request.ride_id), "rides", request.ride_id)?;
        Tables::require(
            tables.passengers.contains(request.passenger_id),
            "passengers",
            request.passenger_id,
        )?;
        Ok(tables.support_requests.insert_with(|_| request))
    }

    async fn list_drivers(&self) -> StoreResult<Vec<DriverSummary>> {
        let tables = self.tables.lock().await;
        let mut drivers: Vec<DriverSummary> = tables
            .drivers
            .values()
            .map(|d| DriverSummary {
                id: d.id,
                name: d.name.clone(),
            })
            .collect();
        drivers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(drivers)
    }

    async fn list_passengers(&self) -> StoreResult<Vec<PassengerSummary>> {
        let tables = self.tables.lock().await;
        let mut passengers: Vec<PassengerSummary> = tables
            .passengers
            .values()
            .map(|p| PassengerSummary {
                id: p.id,
                name: p.name.clone(),
            })
            .collect();
        passengers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(passengers)
    }

    async fn completed_rides(&self) -> StoreResult<Vec<CompletedRide>> {
        let tables = self.tables.lock().await;
        let rides = tables
            .rides
            .values()
            .rev()
            .filter(|r| r.status == RideStatus::Completed)
            .filter_map(|r| {
                let passenger = tables.passengers.get(r.passenger_id)?;
                let driver = tables.drivers.get(r.driver_id)?;
                Some(CompletedRide {
                    ride_id: r.id,
                    pickup_location: r.pickup_location.clone(),
                    dropoff_location: r.dropoff_location.clone(),
                    passenger_name: passenger.name.clone(),
                    driver_name: driver.name.clone(),
                })
            })
            .collect();
        Ok(rides)
    }

    async fn find_driver(&self, id: i64) -> StoreResult<Option<Driver>> {
        Ok(self.tables.lock().await.drivers.get(id).cloned())
    }

    async fn find_vehicle(&self, id: i64) -> StoreResult<Option<Vehicle>> {
        Ok(self.tables.lock().await.vehicles.get(id).cloned())
    }

    async fn find_ride(&self, id: i64) -> StoreResult<Option<Ride>> {
        Ok(self.tables.lock().await.rides.get(id).cloned())
    }
}

//! booking.rs
//!
//! Ride booking: validate the request, price it on the server, and hand the
//! whole write set to the store as one atomic operation.
//!
//! The store decides availability under its own locking, so two requests
//! racing for the same vehicle are serialized there; this layer only turns the
//! outcome into a response or a classified error.

use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    models::{BookRideRequest, BookedRide},
    store::{BookingOutcome, Store},
};

/// Flat charge applied to every ride.
pub const BASE_FARE: f64 = 100.0;
/// Charge per distance unit.
pub const DISTANCE_FARE: f64 = 10.0;
/// Distance billed for every ride until real routing distances exist.
pub const FIXED_DISTANCE_UNITS: f64 = 5.0;

/// Server-side fare; clients never supply it.
pub fn fare() -> f64 {
    BASE_FARE + DISTANCE_FARE * FIXED_DISTANCE_UNITS
}

pub struct BookingService {
    store: Arc<dyn Store>,
}

impl BookingService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn book(&self, req: BookRideRequest) -> AppResult<BookedRide> {
        let booking = req.into_booking(fare())?;
        let (vehicle_id, driver_id, passenger_id) =
            (booking.vehicle_id, booking.driver_id, booking.passenger_id);

        info!(
            "Ride booking request: vehicle={}, driver={}, passenger={}",
            vehicle_id, driver_id, passenger_id
        );

        let outcome = self
            .store
            .book_ride(booking)
            .await
            .map_err(AppError::store("Database error"))?;

        match outcome {
            BookingOutcome::Booked(ride) => {
                info!(
                    "Ride {} booked: fare={}, driver={}, vehicle={}",
                    ride.ride_id, ride.fare, ride.driver_name, ride.vehicle_make
                );
                Ok(ride)
            }
            BookingOutcome::VehicleUnavailable => Err(AppError::VehicleUnavailable),
            BookingOutcome::PassengerNotFound => Err(AppError::PassengerNotFound),
            BookingOutcome::DriverMismatch { owner_id } => {
                warn!(
                    "Vehicle {} is operated by driver {}, not {}",
                    vehicle_id, owner_id, driver_id
                );
                Err(AppError::DriverMismatch {
                    driver_id,
                    vehicle_id,
                })
            }
        }
    }
}

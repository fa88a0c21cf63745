//! Query/transaction gateway.
//!
//! Every operation that writes more than one row is a single `Store` method so
//! that each backend can run it atomically: `PgStore` inside one database
//! transaction, `MemoryStore` under one lock. Business-rule rejections come back
//! as outcome enums; `StoreError` is reserved for the store itself failing.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::Database;
use crate::models::{
    BookedRide, CompletedRide, Driver, DriverSummary, NewDriver, NewFeedback, NewMaintenance,
    NewPassenger, NewPayment, NewPromotion, NewSupportRequest, NewVehicle, PassengerSummary, Ride,
    RideBooking, Vehicle,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub const MEMORY_URL: &str = "memory://";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("{table} row {id} referenced but does not exist")]
    MissingReference { table: &'static str, id: i64 },
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Booked(BookedRide),
    /// No vehicle with that id, or it is not Available.
    VehicleUnavailable,
    PassengerNotFound,
    /// The vehicle belongs to a different driver than the one requested.
    DriverMismatch { owner_id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleRegistration {
    Registered(i64),
    DriverNotFound,
    DuplicatePlate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentRecording {
    Recorded { payment_id: i64, ride_completed: bool },
    RideNotFound,
    AlreadyPaid,
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_driver(&self, driver: NewDriver) -> StoreResult<i64>;
    async fn insert_passenger(&self, passenger: NewPassenger) -> StoreResult<i64>;

    /// Driver existence and plate uniqueness checks followed by the insert.
    async fn register_vehicle(&self, vehicle: NewVehicle) -> StoreResult<VehicleRegistration>;

    /// Locks the vehicle and its driver, checks the passenger, inserts the
    /// ride as Pending and flips vehicle and driver to Unavailable. Either all
    /// of it happens or none of it does.
    async fn book_ride(&self, booking: RideBooking) -> StoreResult<BookingOutcome>;

    /// Inserts the payment and, for a completed payment, completes the ride.
    async fn record_payment(&self, payment: NewPayment) -> StoreResult<PaymentRecording>;

    async fn insert_feedback(&self, feedback: NewFeedback) -> StoreResult<i64>;
    async fn insert_maintenance(&self, maintenance: NewMaintenance) -> StoreResult<i64>;
    async fn insert_promotion(&self, promotion: NewPromotion) -> StoreResult<i64>;
    async fn insert_support_request(&self, request: NewSupportRequest) -> StoreResult<i64>;

    async fn list_drivers(&self) -> StoreResult<Vec<DriverSummary>>;
    async fn list_passengers(&self) -> StoreResult<Vec<PassengerSummary>>;
    async fn completed_rides(&self) -> StoreResult<Vec<CompletedRide>>;

    async fn find_driver(&self, id: i64) -> StoreResult<Option<Driver>>;
    async fn find_vehicle(&self, id: i64) -> StoreResult<Option<Vehicle>>;
    async fn find_ride(&self, id: i64) -> StoreResult<Option<Ride>>;
}

/// Picks the backend from the database URL; Postgres gets its migrations run.
pub async fn connect(config: &DatabaseConfig) -> StoreResult<Arc<dyn Store>> {
    if config.url == MEMORY_URL {
        info!("Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let db = Database::new(config).await?;
    info!("Database connected");
    db.run_migrations().await?;
    Ok(Arc::new(PgStore::new(db)))
}

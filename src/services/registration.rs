use std::sync::Arc;
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::{NewVehicle, RegisterVehicleRequest},
    store::{Store, VehicleRegistration},
};

/// Vehicle registration: the owning driver must exist and the plate must be new.
pub struct RegistrationService {
    store: Arc<dyn Store>,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn register_vehicle(&self, req: RegisterVehicleRequest) -> AppResult<i64> {
        let vehicle = NewVehicle::try_from(req)?;
        let driver_id = vehicle.driver_id;
        let plate = vehicle.license_plate.clone();

        let outcome = self
            .store
            .register_vehicle(vehicle)
            .await
            .map_err(AppError::store("Database operation failed"))?;

        match outcome {
            VehicleRegistration::Registered(id) => {
                info!("Vehicle {} registered: plate={}, driver={}", id, plate, driver_id);
                Ok(id)
            }
            VehicleRegistration::DriverNotFound => Err(AppError::DriverNotFound(driver_id)),
            VehicleRegistration::DuplicatePlate => Err(AppError::DuplicatePlate),
        }
    }
}

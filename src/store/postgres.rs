use async_trait::async_trait;
use tracing::debug;

use super::{BookingOutcome, PaymentRecording, Store, StoreResult, VehicleRegistration};
use crate::database::Database;
use crate::models::{
    BookedRide, CompletedRide, Driver, DriverSummary, NewDriver, NewFeedback, NewMaintenance,
    NewPassenger, NewPayment, NewPromotion, NewSupportRequest, NewVehicle, PassengerSummary, Ride,
    RideBooking, Vehicle,
};

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[derive(Clone)]
pub struct PgStore {
    db: Database,
}

impl PgStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_driver(&self, driver: NewDriver) -> StoreResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO drivers
                (name, contact_number, status, schedule, rating,
                 insurance_document, driving_license_number, preferred_payment_method)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(driver.name)
        .bind(driver.contact_number)
        .bind(driver.status)
        .bind(driver.schedule)
        .bind(driver.rating)
        .bind(driver.insurance_document)
        .bind(driver.driving_license_number)
        .bind(driver.preferred_payment_method)
        .fetch_one(&self.db.pool)
        .await?;

        Ok(id)
    }

    async fn insert_passenger(&self, passenger: NewPassenger) -> StoreResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO passengers (name, contact_no, email, payment_details)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(passenger.name)
        .bind(passenger.contact_no)
        .bind(passenger.email)
        .bind(passenger.payment_details)
        .fetch_one(&self.db.pool)
        .await?;

        Ok(id)
    }

    async fn register_vehicle(&self, vehicle: NewVehicle) -> StoreResult<VehicleRegistration> {
        let driver_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM drivers WHERE id = $1)",
        )
        .bind(vehicle.driver_id)
        .fetch_one(&self.db.pool)
        .await?;

        if !driver_exists {
            return Ok(VehicleRegistration::DriverNotFound);
        }

        let plate_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = $1)",
        )
        .bind(&vehicle.license_plate)
        .fetch_one(&self.db.pool)
        .await?;

        if plate_taken {
            return Ok(VehicleRegistration::DuplicatePlate);
        }

        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO vehicles
                (make, license_plate, color, vehicle_type, insurance_policy_number,
                 child_seat_available, capacity, status, driver_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'Available', $8)
            RETURNING id
            "#,
        )
        .bind(vehicle.make)
        .bind(vehicle.license_plate)
        .bind(vehicle.color)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.insurance_policy_number)
        .bind(vehicle.child_seat_available)
        .bind(vehicle.capacity)
        .bind(vehicle.driver_id)
        .fetch_one(&self.db.pool)
        .await;

        match inserted {
            Ok(id) => Ok(VehicleRegistration::Registered(id)),
            // Lost a race with another registration of the same plate
            Err(e) if is_unique_violation(&e) => Ok(VehicleRegistration::DuplicatePlate),
            Err(e) => Err(e.into()),
        }
    }

    async fn book_ride(&self, booking: RideBooking) -> StoreResult<BookingOutcome> {
        let mut tx = self.db.pool.begin().await?;

        // Row locks on the vehicle and its driver. A concurrent booking of the
        // same vehicle waits here, then re-evaluates the status filter and
        // finds nothing.
        let vehicle: Option<(i64, String, String)> = sqlx::query_as(
            r#"
            SELECT v.driver_id, v.make, d.name
            FROM vehicles v
            JOIN drivers d ON d.id = v.driver_id
            WHERE v.id = $1 AND v.status = 'Available'
            FOR UPDATE OF v, d
            "#,
        )
        .bind(booking.vehicle_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((owner_id, vehicle_make, driver_name)) = vehicle else {
            tx.rollback().await?;
            return Ok(BookingOutcome::VehicleUnavailable);
        };

        if owner_id != booking.driver_id {
            tx.rollback().await?;
            return Ok(BookingOutcome::DriverMismatch { owner_id });
        }

        let passenger_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM passengers WHERE id = $1)",
        )
        .bind(booking.passenger_id)
        .fetch_one(&mut *tx)
        .await?;

        if !passenger_exists {
            tx.rollback().await?;
            return Ok(BookingOutcome::PassengerNotFound);
        }

        let ride_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO rides
                (fare, status, pickup_location, dropoff_location, vehicle_id, passenger_id, driver_id)
            VALUES ($1, 'Pending', $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(booking.fare)
        .bind(&booking.pickup_location)
        .bind(&booking.dropoff_location)
        .bind(booking.vehicle_id)
        .bind(booking.passenger_id)
        .bind(booking.driver_id)
        .fetch_one(&mut *tx)
        .await?;

        let claimed = sqlx::query(
            "UPDATE vehicles SET status = 'Unavailable' WHERE id = $1 AND status = 'Available'",
        )
        .bind(booking.vehicle_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if claimed == 0 {
            tx.rollback().await?;
            return Ok(BookingOutcome::VehicleUnavailable);
        }

        sqlx::query("UPDATE drivers SET status = 'Unavailable' WHERE id = $1")
            .bind(booking.driver_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!("ride {} committed for vehicle {}", ride_id, booking.vehicle_id);

        Ok(BookingOutcome::Booked(BookedRide {
            ride_id,
            fare: booking.fare,
            driver_name,
            vehicle_make,
        }))
    }

    async fn record_payment(&self, payment: NewPayment) -> StoreResult<PaymentRecording> {
        let mut tx = self.db.pool.begin().await?;

        let ride = sqlx::query_scalar::<_, i64>("SELECT id FROM rides WHERE id = $1 FOR UPDATE")
            .bind(payment.ride_id)
            .fetch_optional(&mut *tx)
            .await?;

        if ride.is_none() {
            tx.rollback().await?;
            return Ok(PaymentRecording::RideNotFound);
        }

        let already_paid = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM payments WHERE ride_id = $1)",
        )
        .bind(payment.ride_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_paid {
            tx.rollback().await?;
            return Ok(PaymentRecording::AlreadyPaid);
        }

        let ride_completed = payment.completes_ride();
        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO payments (ride_id, payment_method, amount, payment_status, transaction_date)
            VALUES ($1, $2, $3, $4, CURRENT_DATE)
            RETURNING id
            "#,
        )
        .bind(payment.ride_id)
        .bind(payment.payment_method)
        .bind(payment.amount)
        .bind(payment.payment_status)
        .fetch_one(&mut *tx)
        .await;

        let payment_id = match inserted {
            Ok(id) => id,
            // The dropped transaction rolls back
            Err(e) if is_unique_violation(&e) => return Ok(PaymentRecording::AlreadyPaid),
            Err(e) => return Err(e.into()),
        };

        if ride_completed {
            sqlx::query("UPDATE rides SET status = 'Completed' WHERE id = $1")
                .bind(payment.ride_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(PaymentRecording::Recorded {
            payment_id,
            ride_completed,
        })
    }

    async fn insert_feedback(&self, feedback: NewFeedback) -> StoreResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO feedback (ride_id, from_user_id, to_user_id, rating, comments, submitted_at)
             VALUES ($1, $2, $3, $4, $5, NOW())
             RETURNING id",
        )
        .bind(feedback.ride_id)
        .bind(feedback.from_user_id)
        .bind(feedback.to_user_id)
        .bind(feedback.rating)
        .bind(feedback.comments)
        .fetch_one(&self.db.pool)
        .await?;

        Ok(id)
    }

    async fn insert_maintenance(&self, maintenance: NewMaintenance) -> StoreResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO maintenance (vehicle_id, performed_by, cost, description, performed_on)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(maintenance.vehicle_id)
        .bind(maintenance.performed_by)
        .bind(maintenance.cost)
        .bind(maintenance.description)
        .bind(maintenance.performed_on)
        .fetch_one(&self.db.pool)
        .await?;

        Ok(id)
    }

    async fn insert_promotion(&self, promotion: NewPromotion) -> StoreResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO promotions
                (promo_code, description, eligibility_criteria, expiry_date, discount_amount)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(promotion.promo_code)
        .bind(promotion.description)
        .bind(promotion.eligibility_criteria)
        .bind(promotion.expiry_date)
        .bind(promotion.discount_amount)
        .fetch_one(&self.db.pool)
        .await?;

        Ok(id)
    }

    async fn insert_support_request(&self, request: NewSupportRequest) -> StoreResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO support_requests
                (ride_id, passenger_id, issue_description, submitted_at, resolution_status)
             VALUES ($1, $2, $3, NOW(), 'Pending')
             RETURNING id",
        )
        .bind(request.ride_id)
        .bind(request.passenger_id)
        .bind(request.issue_description)
        .fetch_one(&self.db.pool)
        .await?;

        Ok(id)
    }

    async fn list_drivers(&self) -> StoreResult<Vec<DriverSummary>> {
        let drivers = sqlx::query_as::<_, DriverSummary>(
            "SELECT id, name FROM drivers ORDER BY name, id",
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(drivers)
    }

    async fn list_passengers(&self) -> StoreResult<Vec<PassengerSummary>> {
        let passengers = sqlx::query_as::<_, PassengerSummary>(
            "SELECT id, name FROM passengers ORDER BY name, id",
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(passengers)
    }

    async fn completed_rides(&self) -> StoreResult<Vec<CompletedRide>> {
        let rides = sqlx::query_as::<_, CompletedRide>(
            r#"
            SELECT r.id AS ride_id, r.pickup_location, r.dropoff_location,
                   p.name AS passenger_name, d.name AS driver_name
            FROM rides r
            JOIN passengers p ON p.id = r.passenger_id
            JOIN drivers d ON d.id = r.driver_id
            WHERE r.status = 'Completed'
            ORDER BY r.id DESC
            "#,
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(rides)
    }

    async fn find_driver(&self, id: i64) -> StoreResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            SELECT id, name, contact_number, status, schedule, rating,
                   insurance_document, driving_license_number, preferred_payment_method
            FROM drivers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db.pool)
        .await?;

        Ok(driver)
    }

    async fn find_vehicle(&self, id: i64) -> StoreResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, make, license_plate, color, vehicle_type, insurance_policy_number,
                   child_seat_available, capacity, status, driver_id
            FROM vehicles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db.pool)
        .await?;

        Ok(vehicle)
    }

    async fn find_ride(&self, id: i64) -> StoreResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            SELECT id, fare, status, pickup_location, dropoff_location,
                   vehicle_id, passenger_id, driver_id, created_at
            FROM rides
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db.pool)
        .await?;

        Ok(ride)
    }
}

pub mod driver;
pub mod passenger;
pub mod vehicle;
pub mod ride;
pub mod payment;
pub mod feedback;
pub mod maintenance;
pub mod promotion;
pub mod support;

use serde::{Deserialize, Serialize};

pub use driver::{Driver, DriverSummary, NewDriver, RegisterDriverRequest};
pub use feedback::{NewFeedback, SubmitFeedbackRequest};
pub use maintenance::{LogMaintenanceRequest, NewMaintenance};
pub use passenger::{NewPassenger, Passenger, PassengerSummary, RegisterPassengerRequest};
pub use payment::{NewPayment, RecordPaymentRequest};
pub use promotion::{CreatePromotionRequest, NewPromotion};
pub use ride::{BookRideRequest, BookedRide, CompletedRide, Ride, RideBooking, RideStatus};
pub use support::{NewSupportRequest, SubmitSupportRequest};
pub use vehicle::{NewVehicle, RegisterVehicleRequest, Vehicle};

/// Status shared by drivers and vehicles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "availability")]
pub enum Availability {
    Available,
    Unavailable,
}

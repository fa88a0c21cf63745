pub mod booking;
pub mod payment;
pub mod registration;

pub use booking::BookingService;
pub use payment::PaymentService;
pub use registration::RegistrationService;

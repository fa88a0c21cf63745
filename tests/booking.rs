use fake::{faker::name::en::Name, Fake};
use futures::future::join_all;
use std::sync::Arc;

use ride_hailing::{
    error::AppError,
    models::{Availability, BookRideRequest, NewDriver, NewPassenger, RecordPaymentRequest, RegisterVehicleRequest},
    services::{BookingService, PaymentService, RegistrationService},
    store::{MemoryStore, Store},
};

struct Fleet {
    store: Arc<dyn Store>,
    passenger: i64,
    drivers: Vec<i64>,
    vehicles: Vec<i64>,
}

fn new_driver(name: String) -> NewDriver {
    NewDriver {
        name,
        contact_number: None,
        status: Availability::Available,
        schedule: None,
        rating: None,
        insurance_document: None,
        driving_license_number: None,
        preferred_payment_method: None,
    }
}

fn vehicle_request(driver_id: i64, plate: &str) -> RegisterVehicleRequest {
    serde_json::from_value(serde_json::json!({
        "driverID": driver_id,
        "make": "Honda",
        "licensePlate": plate,
        "color": "Grey",
        "insurancePolicyNumber": "INS-1",
        "capacity": 4
    }))
    .unwrap()
}

/// One passenger plus `size` drivers, each owning one Available vehicle.
async fn fleet(size: usize) -> Fleet {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let passenger = store
        .insert_passenger(NewPassenger {
            name: Name().fake(),
            contact_no: None,
            email: None,
            payment_details: None,
        })
        .await
        .unwrap();

    let registration = RegistrationService::new(store.clone());
    let mut drivers = Vec::new();
    let mut vehicles = Vec::new();
    for i in 0..size {
        let driver = store.insert_driver(new_driver(Name().fake())).await.unwrap();
        let vehicle = registration
            .register_vehicle(vehicle_request(driver, &format!("FLT-{i:03}")))
            .await
            .unwrap();
        drivers.push(driver);
        vehicles.push(vehicle);
    }

    Fleet {
        store,
        passenger,
        drivers,
        vehicles,
    }
}

fn booking(passenger: i64, driver: i64, vehicle: i64) -> BookRideRequest {
    BookRideRequest {
        pick_up_location: Some("Gulberg".to_string()),
        drop_off_location: Some("DHA".to_string()),
        passenger: Some(passenger),
        driver: Some(driver),
        vehicle: Some(vehicle),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_bookings_of_one_vehicle_have_a_single_winner() {
    let fleet = fleet(1).await;
    let (driver, vehicle) = (fleet.drivers[0], fleet.vehicles[0]);

    let attempts = (0..16).map(|_| {
        let service = BookingService::new(fleet.store.clone());
        let req = booking(fleet.passenger, driver, vehicle);
        tokio::spawn(async move { service.book(req).await })
    });
    let results: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let booked: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(booked.len(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, AppError::VehicleUnavailable)));

    let ride_id = booked[0].ride_id;
    assert!(fleet.store.find_ride(ride_id).await.unwrap().is_some());
    assert!(fleet.store.find_ride(ride_id + 1).await.unwrap().is_none());

    let vehicle = fleet.store.find_vehicle(vehicle).await.unwrap().unwrap();
    assert_eq!(vehicle.status, Availability::Unavailable);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_bookings_of_different_vehicles_all_succeed() {
    let fleet = fleet(6).await;

    let attempts = fleet.drivers.iter().zip(&fleet.vehicles).map(|(&driver, &vehicle)| {
        let service = BookingService::new(fleet.store.clone());
        let req = booking(fleet.passenger, driver, vehicle);
        tokio::spawn(async move { service.book(req).await })
    });
    let results = join_all(attempts).await;

    let mut ride_ids: Vec<i64> = results
        .into_iter()
        .map(|joined| joined.unwrap().unwrap().ride_id)
        .collect();
    ride_ids.sort_unstable();
    ride_ids.dedup();
    assert_eq!(ride_ids.len(), 6);

    for &driver in &fleet.drivers {
        let driver = fleet.store.find_driver(driver).await.unwrap().unwrap();
        assert_eq!(driver.status, Availability::Unavailable);
    }
}

#[tokio::test]
async fn every_booking_is_charged_the_same_fare() {
    let fleet = fleet(3).await;
    let service = BookingService::new(fleet.store.clone());

    for (&driver, &vehicle) in fleet.drivers.iter().zip(&fleet.vehicles) {
        let ride = service.book(booking(fleet.passenger, driver, vehicle)).await.unwrap();
        assert_eq!(ride.fare, 150.0);
        let stored = fleet.store.find_ride(ride.ride_id).await.unwrap().unwrap();
        assert_eq!(stored.fare, 150.0);
    }
}

#[tokio::test]
async fn rejected_booking_leaves_no_trace() {
    let fleet = fleet(1).await;
    let service = BookingService::new(fleet.store.clone());
    let (driver, vehicle) = (fleet.drivers[0], fleet.vehicles[0]);

    let err = service
        .book(booking(fleet.passenger + 100, driver, vehicle))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::PassengerNotFound));

    assert!(fleet.store.find_ride(1).await.unwrap().is_none());
    let vehicle = fleet.store.find_vehicle(vehicle).await.unwrap().unwrap();
    assert_eq!(vehicle.status, Availability::Available);
    let driver = fleet.store.find_driver(driver).await.unwrap().unwrap();
    assert_eq!(driver.status, Availability::Available);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_payments_for_one_ride_record_once() {
    let fleet = fleet(1).await;
    let ride = BookingService::new(fleet.store.clone())
        .book(booking(fleet.passenger, fleet.drivers[0], fleet.vehicles[0]))
        .await
        .unwrap();

    let attempts = (0..8).map(|_| {
        let service = PaymentService::new(fleet.store.clone());
        let req = RecordPaymentRequest {
            ride_id: Some(ride.ride_id),
            payment_method: Some("Cash".to_string()),
            amount: Some(ride.fare),
            payment_status: Some("Completed".to_string()),
        };
        tokio::spawn(async move { service.record(req).await })
    });
    let results: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, AppError::DuplicatePayment)));

    let completed = fleet.store.completed_rides().await.unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].ride_id, ride.ride_id);
}

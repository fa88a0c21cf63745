use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::sync::Arc;
use tokio::runtime::Runtime;

use ride_hailing::{
    models::{Availability, BookRideRequest, NewDriver, NewPassenger, NewVehicle},
    services::{booking::fare, BookingService},
    store::{MemoryStore, Store, VehicleRegistration},
};

fn request(passenger: i64, driver: i64, vehicle: i64) -> BookRideRequest {
    BookRideRequest {
        pick_up_location: Some("Model Town".to_string()),
        drop_off_location: Some("Johar Town".to_string()),
        passenger: Some(passenger),
        driver: Some(driver),
        vehicle: Some(vehicle),
    }
}

async fn seeded_store() -> (Arc<dyn Store>, BookRideRequest) {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let passenger = store
        .insert_passenger(NewPassenger {
            name: "Rider".to_string(),
            contact_no: None,
            email: None,
            payment_details: None,
        })
        .await
        .unwrap();
    let driver = store
        .insert_driver(NewDriver {
            name: "Driver".to_string(),
            contact_number: None,
            status: Availability::Available,
            schedule: None,
            rating: None,
            insurance_document: None,
            driving_license_number: None,
            preferred_payment_method: None,
        })
        .await
        .unwrap();
    let registration = store
        .register_vehicle(NewVehicle {
            driver_id: driver,
            make: "Toyota".to_string(),
            license_plate: "BEN-1".to_string(),
            color: "Black".to_string(),
            vehicle_type: "Car".to_string(),
            insurance_policy_number: "INS".to_string(),
            child_seat_available: false,
            capacity: 4,
        })
        .await
        .unwrap();
    let VehicleRegistration::Registered(vehicle) = registration else {
        panic!("seed vehicle rejected: {registration:?}");
    };
    (store, request(passenger, driver, vehicle))
}

fn bench_booking(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    c.bench_function("validate_booking_request", |b| {
        b.iter(|| black_box(request(1, 2, 3)).into_booking(fare()))
    });

    c.bench_function("book_ride_memory_store", |b| {
        b.iter_batched(
            || rt.block_on(seeded_store()),
            |(store, req)| {
                rt.block_on(async {
                    BookingService::new(store).book(req).await.unwrap();
                })
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("reject_unavailable_vehicle", |b| {
        let (store, req) = rt.block_on(async {
            let (store, req) = seeded_store().await;
            BookingService::new(store.clone()).book(req.clone()).await.unwrap();
            (store, req)
        });
        let service = BookingService::new(store);
        b.iter(|| rt.block_on(service.book(req.clone())).unwrap_err())
    });
}

criterion_group!(benches, bench_booking);
criterion_main!(benches);

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use ride_hailing::{
    app,
    config::DatabaseConfig,
    store::{MemoryStore, Store, MEMORY_URL},
    AppState,
};

pub fn memory_config() -> DatabaseConfig {
    DatabaseConfig {
        url: MEMORY_URL.to_string(),
        pool_size: 1,
        acquire_timeout_secs: 1,
    }
}

pub struct TestApp {
    pub store: Arc<dyn Store>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let router = app(AppState::with_store(store.clone()));
        Self { store, router }
    }

    /// Goes through the same store selection as the server binary.
    pub async fn from_config(config: &DatabaseConfig) -> Self {
        let state = AppState::new(config).await.unwrap();
        Self {
            store: state.store.clone(),
            router: app(state),
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    pub async fn register_driver(&self, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/drivers",
                json!({
                    "name": name,
                    "contactNo": "0300-0000000",
                    "status": "Available",
                    "schedule": "Mon-Fri",
                    "rating": 4.5
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["driverId"].as_i64().unwrap()
    }

    pub async fn register_passenger(&self, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/passengers",
                json!({ "name": name, "contactNo": "0311-1111111", "email": "p@example.com" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["passengerId"].as_i64().unwrap()
    }

    pub async fn register_vehicle(&self, driver_id: i64, plate: &str) -> i64 {
        let (status, body) = self.post("/api/vehicles", vehicle_body(driver_id, plate)).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["vehicleId"].as_i64().unwrap()
    }

    pub async fn book(&self, passenger: i64, driver: i64, vehicle: i64) -> (StatusCode, Value) {
        self.post(
            "/api/rides",
            json!({
                "pickUpLocation": "A",
                "dropOffLocation": "B",
                "passenger": passenger,
                "driver": driver,
                "vehicle": vehicle
            }),
        )
        .await
    }
}

pub fn vehicle_body(driver_id: i64, plate: &str) -> Value {
    json!({
        "driverID": driver_id,
        "make": "Toyota",
        "licensePlate": plate,
        "color": "White",
        "vehicleType": "Sedan",
        "insurancePolicyNumber": "INS-778",
        "childSeatAvailable": true,
        "capacity": 4
    })
}

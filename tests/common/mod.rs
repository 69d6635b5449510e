//! Common test utilities and helpers for integration tests
//! Provides isolated clients and builders for orders and passengers

#![allow(dead_code)]

use railbook::error::Result;
use railbook::models::{NewOrder, Order, SeatClass};
use railbook::{BookingClient, LocalStore, SessionConfig};
use std::sync::Arc;
use tempfile::TempDir;

/// Test context holding an isolated client and its temporary directory
pub struct TestContext {
    pub client: BookingClient,
    pub temp_dir: TempDir,
}

impl TestContext {
    /// Create a new test context with in-memory storage
    pub fn new_in_memory() -> Result<Self> {
        Self::with_session(SessionConfig::default())
    }

    /// In-memory context with custom session lifetimes
    pub fn with_session(session: SessionConfig) -> Result<Self> {
        let storage = Arc::new(LocalStore::in_memory()?);
        let client = BookingClient::with_storage(storage, session);
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        Ok(TestContext { client, temp_dir })
    }

    /// Create a new test context with file-based storage
    pub fn new_with_file_storage() -> Result<Self> {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test_railbook.db");
        let client = BookingClient::new_with_storage_path(db_path, SessionConfig::default())?;

        Ok(TestContext { client, temp_dir })
    }

    /// Register passengers and return their ids
    pub fn add_passengers(&self, count: usize) -> Result<Vec<String>> {
        (0..count)
            .map(|i| {
                self.client
                    .passengers()
                    .add(&format!("乘客{}", i), &format!("11010119900101{:04}", i))
                    .map(|p| p.id)
            })
            .collect()
    }

    pub fn remaining(&self, train_id: &str, class: SeatClass) -> i32 {
        self.client
            .trains()
            .get(train_id)
            .expect("catalog read failed")
            .expect("train missing")
            .seat(class)
            .expect("seat class missing")
            .remaining
    }
}

/// Helper for creating orders directly through the ledger
pub struct TestOrderBuilder {
    train_id: String,
    train_no: String,
    seat_class: SeatClass,
    passenger_ids: Vec<String>,
    total_price: u32,
}

impl Default for TestOrderBuilder {
    fn default() -> Self {
        TestOrderBuilder {
            train_id: "t_g101".to_string(),
            train_no: "G101".to_string(),
            seat_class: SeatClass::SecondClass,
            passenger_ids: vec!["p_test".to_string()],
            total_price: 553,
        }
    }
}

impl TestOrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn train(mut self, train_id: &str, train_no: &str) -> Self {
        self.train_id = train_id.to_string();
        self.train_no = train_no.to_string();
        self
    }

    pub fn seat_class(mut self, seat_class: SeatClass) -> Self {
        self.seat_class = seat_class;
        self
    }

    pub fn passengers(mut self, ids: Vec<String>) -> Self {
        self.passenger_ids = ids;
        self
    }

    pub fn total_price(mut self, total_price: u32) -> Self {
        self.total_price = total_price;
        self
    }

    pub fn input(self) -> NewOrder {
        NewOrder {
            train_id: self.train_id,
            train_no: self.train_no,
            seat_class: self.seat_class,
            passenger_ids: self.passenger_ids,
            total_price: self.total_price,
        }
    }

    pub fn create(self, client: &BookingClient) -> Result<Order> {
        client.orders().create(self.input())
    }
}

//! Booking client - wires every service to one local store
//!
//! This is the entry point used by the CLI and by integration tests. All
//! services share the same `LocalStore`, so a write through one (e.g. paying an
//! order) is visible to the others (e.g. the catalog's seat counts).

use crate::config::SessionConfig;
use crate::error::Result;
use crate::services::{AuthService, OrderService, PassengerService, TicketService, TrainCatalog};
use crate::storage::LocalStore;
use std::path::Path;
use std::sync::Arc;

pub struct BookingClient {
    storage: Arc<LocalStore>,
    auth: AuthService,
    passengers: Arc<PassengerService>,
    trains: Arc<TrainCatalog>,
    tickets: TicketService,
    orders: OrderService,
}

impl BookingClient {
    /// Open a client backed by the database file at `db_path`
    pub fn new_with_storage_path<P: AsRef<Path>>(db_path: P, session: SessionConfig) -> Result<Self> {
        let storage = Arc::new(LocalStore::new(db_path)?);
        log::info!("Using database {}", storage.path().display());
        Ok(Self::with_storage(storage, session))
    }

    /// Open a client backed by an in-memory database
    pub fn in_memory(session: SessionConfig) -> Result<Self> {
        Ok(Self::with_storage(Arc::new(LocalStore::in_memory()?), session))
    }

    pub fn with_storage(storage: Arc<LocalStore>, session: SessionConfig) -> Self {
        let trains = Arc::new(TrainCatalog::new(storage.clone()));
        let passengers = Arc::new(PassengerService::new(storage.clone()));

        BookingClient {
            auth: AuthService::new(storage.clone(), session),
            tickets: TicketService::new(trains.clone()),
            orders: OrderService::new(storage.clone(), trains.clone(), passengers.clone()),
            storage,
            passengers,
            trains,
        }
    }

    pub fn storage(&self) -> &Arc<LocalStore> {
        &self.storage
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn passengers(&self) -> &PassengerService {
        &self.passengers
    }

    pub fn trains(&self) -> &TrainCatalog {
        &self.trains
    }

    pub fn tickets(&self) -> &TicketService {
        &self.tickets
    }

    pub fn orders(&self) -> &OrderService {
        &self.orders
    }
}

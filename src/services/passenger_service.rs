/// Passenger registry.
/// Passengers are independent records keyed by id; they are not owned by a user.

use crate::error::{BookingError, Result};
use crate::models::{generate_id, Passenger};
use crate::storage::{keys, LocalStore};
use std::collections::BTreeMap;
use std::sync::Arc;

type PassengerMap = BTreeMap<String, Passenger>;

pub struct PassengerService {
    storage: Arc<LocalStore>,
}

impl PassengerService {
    pub fn new(storage: Arc<LocalStore>) -> Self {
        PassengerService { storage }
    }

    fn read(&self) -> Result<PassengerMap> {
        self.storage.read_json(keys::PASSENGERS)
    }

    fn write(&self, map: &PassengerMap) -> Result<()> {
        self.storage.write_json(keys::PASSENGERS, map)
    }

    pub fn list(&self) -> Result<Vec<Passenger>> {
        Ok(self.read()?.into_values().collect())
    }

    pub fn get(&self, id: &str) -> Result<Option<Passenger>> {
        Ok(self.read()?.remove(id))
    }

    pub fn add(&self, name: &str, identity_number: &str) -> Result<Passenger> {
        let name = name.trim();
        let identity_number = identity_number.trim();
        if name.is_empty() {
            return Err(BookingError::Validation("乘客姓名不能为空".to_string()));
        }
        if identity_number.is_empty() {
            return Err(BookingError::Validation("证件号不能为空".to_string()));
        }

        let passenger = Passenger::new(
            generate_id("p"),
            name.to_string(),
            identity_number.to_string(),
        );

        let mut map = self.read()?;
        map.insert(passenger.id.clone(), passenger.clone());
        self.write(&map)?;

        log::info!("Added passenger {} ({})", passenger.id, passenger.name);
        Ok(passenger)
    }

    /// Remove a passenger; removing an unknown id is a no-op
    pub fn remove(&self, id: &str) -> Result<()> {
        let mut map = self.read()?;
        if map.remove(id).is_some() {
            self.write(&map)?;
            log::info!("Removed passenger {}", id);
        }
        Ok(())
    }
}

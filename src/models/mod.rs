//! Data models for the booking engine.
//! Defines users, passengers, trains, and orders as they are persisted.

pub mod order;
pub mod passenger;
pub mod train;
pub mod user;

pub use order::{NewOrder, Order, OrderStatus};
pub use passenger::Passenger;
pub use train::{SeatAvailability, SeatClass, StationStop, Train, TrainItem};
pub use user::{ProfileUpdate, User, UserProfile};

use uuid::Uuid;

/// Generate a record id such as `o_4f1c...` from a prefix and a random UUID
pub fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

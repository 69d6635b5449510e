//! Railbook - train ticket booking against a local store
//! Provides registration, passenger management, search, and the order lifecycle

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use client::BookingClient;
pub use config::{Config, SessionConfig};
pub use error::{BookingError, Result};
pub use storage::LocalStore;

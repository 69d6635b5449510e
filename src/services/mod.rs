//! Service layer for the booking engine.
//! Each service is a thin read-modify-write layer over the shared local store.

pub mod auth_service;
pub mod order_service;
pub mod passenger_service;
pub mod ticket_service;
pub mod train_catalog;

pub use auth_service::{AuthService, AuthSession};
pub use order_service::OrderService;
pub use passenger_service::PassengerService;
pub use ticket_service::{SortBy, TicketQuery, TicketResult, TicketService};
pub use train_catalog::TrainCatalog;

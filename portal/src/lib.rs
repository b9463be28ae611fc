pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod flows;
pub mod routes;
pub mod sequence;

pub use client::ApiClient;
pub use config::{PortalConfig, StorageLocation};
pub use error::{PortalError, PortalResult};
pub use routes::{Action, Navigation, Requirement, View, guard, navigate};
pub use sequence::{RequestSlots, Ticket};

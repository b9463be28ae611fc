//! Typed wrappers over the backend's REST endpoints.
//!
//! Clinical and analytics payloads are FHIR-shaped or chart-shaped JSON owned
//! by the backend; they are passed through as [`serde_json::Value`].
pub mod admin;
pub mod analytics;
pub mod auth;
pub mod patient;

pub use auth::{Credentials, PatientDetails, Registration, RegistrationReceipt, Vitals};

use serde::{Deserialize, Serialize};

use session::UserIdentity;

use crate::auth::LOGIN_PATH;
use crate::client::ApiClient;
use crate::error::PortalResult;

pub const REGISTER_PATH: &str = "/auth/register";

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetails {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub birth_date: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub address: String,
}

/// Vital signs captured at registration; blank entries are skipped by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systolic: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// Patient self-registration form.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub patient_details: PatientDetails,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub vitals: Vitals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_provider: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    #[serde(default)]
    pub message: Option<String>,
    pub patient_id: String,
}

/// `POST /auth/login`. Exchanges credentials for an identity; does not touch
/// the session.
pub async fn login(client: &ApiClient, credentials: &Credentials) -> PortalResult<UserIdentity> {
    client.post(LOGIN_PATH, credentials).await
}

/// `POST /auth/register`.
pub async fn register(
    client: &ApiClient,
    registration: &Registration,
) -> PortalResult<RegistrationReceipt> {
    client.post(REGISTER_PATH, registration).await
}

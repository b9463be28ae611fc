//! Login, registration and logout as the portal's views perform them.
use tracing::{info, instrument, warn};

use session::{SessionStore, UserIdentity};

use crate::api::{self, Credentials, Registration, RegistrationReceipt};
use crate::client::ApiClient;
use crate::error::{PortalError, PortalResult};
use crate::routes::{View, home_view};

pub const ADMIN_ONLY_MESSAGE: &str = "Access Denied. Not an admin account.";

/// Which login form the credentials were entered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Portal {
    General,
    Admin,
}

/// Authenticates and starts the session, returning the landing view.
///
/// The admin portal refuses non-admin identities without starting a session.
/// Login failures reach the caller and never end an existing session.
#[instrument(skip(client, credentials), fields(username = %credentials.username))]
pub async fn login(client: &ApiClient, credentials: &Credentials, portal: Portal) -> PortalResult<View> {
    let identity: UserIdentity = api::auth::login(client, credentials).await?;

    if portal == Portal::Admin && !identity.is_admin() {
        warn!(role = %identity.role, "non-admin account used on admin portal");
        return Err(PortalError::AccessDenied(ADMIN_ONLY_MESSAGE.to_string()));
    }

    let landing = home_view(identity.role);

    client
        .session()
        .login(identity)
        .await
        .map_err(PortalError::Session)?;

    info!(landing = %landing, "logged in");
    Ok(landing)
}

/// Registers a new patient account. The caller still has to log in.
#[instrument(skip(client, registration), fields(username = %registration.username))]
pub async fn register(client: &ApiClient, registration: &Registration) -> PortalResult<RegistrationReceipt> {
    let receipt = api::auth::register(client, registration).await?;
    info!(patient_id = %receipt.patient_id, "patient registered");
    Ok(receipt)
}

/// Ends the session and returns the view to show next.
pub async fn logout(session: &SessionStore) -> PortalResult<View> {
    session.logout().await.map_err(PortalError::Session)?;
    Ok(View::Login)
}

use std::sync::Arc;

use portal::{ApiClient, PortalConfig};
use session::storage::MemoryStorage;
use session::{BearerToken, Role, SessionStore, UserIdentity};
use wiremock::MockServer;

pub fn identity(role: Role, token: &str) -> UserIdentity {
    UserIdentity {
        token: BearerToken::new(token),
        role,
        name: match role {
            Role::Admin => "System Admin".into(),
            Role::Patient => "Jane Doe".into(),
        },
        id: Some("6650a1".into()),
        patient_id: match role {
            Role::Admin => None,
            Role::Patient => Some("6650b2".into()),
        },
    }
}

pub fn client_for(server: &MockServer) -> ApiClient {
    client_at(server, "")
}

/// Client whose base URL carries `prefix` after the server root, e.g. `/api`.
pub fn client_at(server: &MockServer, prefix: &str) -> ApiClient {
    let cfg = PortalConfig::default().with_api_base_url(format!("{}{}", server.uri(), prefix));
    let store = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
    ApiClient::new(&cfg, store).expect("failed to create client")
}

pub async fn signed_in_client(server: &MockServer, role: Role, token: &str) -> ApiClient {
    signed_in_client_at(server, "", role, token).await
}

pub async fn signed_in_client_at(
    server: &MockServer,
    prefix: &str,
    role: Role,
    token: &str,
) -> ApiClient {
    let client = client_at(server, prefix);
    client
        .session()
        .login(identity(role, token))
        .await
        .expect("login failed");
    client
}

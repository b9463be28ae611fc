use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role tag issued by the backend at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Patient,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Admin => "admin",
            Role::Patient => "patient",
        };
        f.write_str(s)
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "patient" => Ok(Role::Patient),
            other => Err(anyhow::anyhow!("Invalid Role value: {}", other)),
        }
    }
}

/// Opaque bearer credential issued by the backend.
///
/// Never parsed or rewritten on the client. `Debug` is redacted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(v: impl Into<String>) -> Self {
        Self(v.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// The identity object returned by the login endpoint.
///
/// Field names follow the backend's JSON, and the persisted copy holds exactly
/// these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub token: BearerToken,
    pub role: Role,
    pub name: String,

    /// Backend user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Patient record id; only set for patients.
    #[serde(
        rename = "patientId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub patient_id: Option<String>,
}

impl UserIdentity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// The client-held record of who is logged in, if anyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub identity: Option<UserIdentity>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn signed_in(identity: UserIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn is_active(&self) -> bool {
        self.identity.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|i| i.role)
    }

    pub fn token(&self) -> Option<&BearerToken> {
        self.identity.as_ref().map(|i| &i.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient() -> UserIdentity {
        UserIdentity {
            token: BearerToken::new("eyJhbGciOi.payload.sig"),
            role: Role::Patient,
            name: "Ada Lovelace".into(),
            id: Some("u-1".into()),
            patient_id: Some("p-42".into()),
        }
    }

    #[test]
    fn role_display_and_parse_agree() {
        for role in [Role::Admin, Role::Patient] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert!("doctor".parse::<Role>().is_err());
    }

    #[test]
    fn identity_uses_backend_field_names() {
        let json = serde_json::to_value(patient()).unwrap();

        assert_eq!(json["token"], "eyJhbGciOi.payload.sig");
        assert_eq!(json["role"], "patient");
        assert_eq!(json["name"], "Ada Lovelace");
        assert_eq!(json["patientId"], "p-42");
        assert_eq!(json.as_object().unwrap().len(), 5);
    }

    #[test]
    fn admin_identity_omits_patient_id() {
        let raw = r#"{"token":"t","role":"admin","name":"Root","id":"u-0","patientId":null}"#;
        let admin: UserIdentity = serde_json::from_str(raw).unwrap();

        assert!(admin.is_admin());
        assert_eq!(admin.patient_id, None);

        let json = serde_json::to_value(&admin).unwrap();
        assert!(json.get("patientId").is_none());
    }

    #[test]
    fn token_debug_is_redacted() {
        let dbg = format!("{:?}", patient());
        assert!(!dbg.contains("payload"));
        assert!(dbg.contains("BearerToken(***)"));
    }

    #[test]
    fn token_is_passed_through_verbatim() {
        let t = BearerToken::new("  odd token  ");
        assert_eq!(t.as_str(), "  odd token  ");
        assert_eq!(t.header_value(), "Bearer   odd token  ");
    }

    #[test]
    fn session_accessors() {
        let s = Session::anonymous();
        assert!(!s.is_active());
        assert_eq!(s.role(), None);
        assert!(s.token().is_none());

        let s = Session::signed_in(patient());
        assert!(s.is_active());
        assert_eq!(s.role(), Some(Role::Patient));
        assert_eq!(s.token().unwrap().as_str(), "eyJhbGciOi.payload.sig");
    }
}

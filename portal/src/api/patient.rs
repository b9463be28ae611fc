//! Patient-facing clinical and insurance endpoints.
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::PortalResult;

/// Clinical resource collections that can be listed per patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Condition,
    Observation,
    Medication,
    Coverage,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Condition => "Condition",
            ResourceKind::Observation => "Observation",
            ResourceKind::Medication => "Medication",
            ResourceKind::Coverage => "Coverage",
        }
    }
}

/// `GET /Patient?id=`
pub async fn record(client: &ApiClient, patient_id: &str) -> PortalResult<Value> {
    client.get_with("/Patient", &[("id", patient_id)]).await
}

/// `PUT /Patient?id=`
pub async fn update_record(client: &ApiClient, patient_id: &str, patch: &Value) -> PortalResult<Value> {
    client.put_with("/Patient", &[("id", patient_id)], patch).await
}

/// `GET /{Condition|Observation|Medication|Coverage}?patient=`
pub async fn resources(client: &ApiClient, kind: ResourceKind, patient_id: &str) -> PortalResult<Value> {
    client
        .get_with(&format!("/{}", kind.as_str()), &[("patient", patient_id)])
        .await
}

/// `GET /Patient/{id}/risk`
pub async fn risk(client: &ApiClient, patient_id: &str) -> PortalResult<Value> {
    client.get(&format!("/Patient/{patient_id}/risk")).await
}

/// `GET /Patient/{id}/clinical-history`
pub async fn clinical_history(client: &ApiClient, patient_id: &str) -> PortalResult<Value> {
    client
        .get(&format!("/Patient/{patient_id}/clinical-history"))
        .await
}

/// `POST /Patient/{id}/clinical-update`
pub async fn clinical_update(client: &ApiClient, patient_id: &str, update: &Value) -> PortalResult<Value> {
    client
        .post(&format!("/Patient/{patient_id}/clinical-update"), update)
        .await
}

/// `GET /{type}/{id}/history` for a single resource's version history.
pub async fn resource_history(client: &ApiClient, resource_type: &str, id: &str) -> PortalResult<Value> {
    client.get(&format!("/{resource_type}/{id}/history")).await
}

/// `POST /recommendation/{id}`: insurance plan recommendation.
pub async fn recommend_plan(client: &ApiClient, patient_id: &str, preferences: &Value) -> PortalResult<Value> {
    client
        .post(&format!("/recommendation/{patient_id}"), preferences)
        .await
}

/// `POST /Consent`
pub async fn record_consent(client: &ApiClient, consent: &Value) -> PortalResult<Value> {
    client.post("/Consent", consent).await
}

/// `POST /Coverage`: enrol in a plan.
pub async fn enroll_coverage(client: &ApiClient, coverage: &Value) -> PortalResult<Value> {
    client.post("/Coverage", coverage).await
}

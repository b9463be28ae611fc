//! Administrator endpoints under `/admin`.
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::PortalResult;

/// Clinical collections browsable by administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClinicalKind {
    Conditions,
    Observations,
    Medications,
    RiskAssessments,
}

impl ClinicalKind {
    fn segment(self) -> &'static str {
        match self {
            ClinicalKind::Conditions => "conditions",
            ClinicalKind::Observations => "observations",
            ClinicalKind::Medications => "medications",
            ClinicalKind::RiskAssessments => "risk-assessments",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsuranceKind {
    Coverage,
    Consents,
}

pub async fn users(client: &ApiClient) -> PortalResult<Value> {
    client.get("/admin/users").await
}

pub async fn delete_user(client: &ApiClient, user_id: &str) -> PortalResult<Value> {
    client.delete(&format!("/admin/users/{user_id}")).await
}

pub async fn patients(client: &ApiClient) -> PortalResult<Value> {
    client.get("/admin/patients").await
}

/// Full FHIR bundle for one patient.
pub async fn patient_bundle(client: &ApiClient, patient_id: &str) -> PortalResult<Value> {
    client.get(&format!("/admin/patients/{patient_id}/fhir")).await
}

pub async fn delete_patient(client: &ApiClient, patient_id: &str) -> PortalResult<Value> {
    client.delete(&format!("/admin/patients/{patient_id}")).await
}

pub async fn plans(client: &ApiClient) -> PortalResult<Value> {
    client.get("/admin/plans").await
}

pub async fn create_plan(client: &ApiClient, plan: &Value) -> PortalResult<Value> {
    client.post("/admin/plans", plan).await
}

pub async fn update_plan(client: &ApiClient, plan_id: &str, plan: &Value) -> PortalResult<Value> {
    client.put(&format!("/admin/plans/{plan_id}"), plan).await
}

pub async fn delete_plan(client: &ApiClient, plan_id: &str) -> PortalResult<Value> {
    client.delete(&format!("/admin/plans/{plan_id}")).await
}

pub async fn system_logs(client: &ApiClient) -> PortalResult<Value> {
    client.get("/admin/system/logs").await
}

pub async fn risk_distribution(client: &ApiClient) -> PortalResult<Value> {
    client.get("/admin/stats/risk-distribution").await
}

pub async fn clinical(client: &ApiClient, kind: ClinicalKind) -> PortalResult<Value> {
    client
        .get(&format!("/admin/clinical/{}", kind.segment()))
        .await
}

pub async fn insurance(client: &ApiClient, kind: InsuranceKind) -> PortalResult<Value> {
    let path = match kind {
        InsuranceKind::Coverage => "/admin/insurance/coverage",
        InsuranceKind::Consents => "/admin/insurance/consents",
    };
    client.get(path).await
}

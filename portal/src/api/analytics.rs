//! Population analytics feeding the dashboard charts.
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::PortalResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Population {
    ChronicAcute,
    Vitals,
    Medications,
    DiseaseDistribution,
    Comorbidity,
}

impl Population {
    fn segment(self) -> &'static str {
        match self {
            Population::ChronicAcute => "chronic-acute",
            Population::Vitals => "vitals",
            Population::Medications => "medications",
            Population::DiseaseDistribution => "disease-distribution",
            Population::Comorbidity => "comorbidity",
        }
    }
}

/// `GET /analytics/population/{series}`
pub async fn population(client: &ApiClient, series: Population) -> PortalResult<Value> {
    client
        .get(&format!("/analytics/population/{}", series.segment()))
        .await
}

/// `GET /stats/trends`, optionally filtered by location.
pub async fn trends(client: &ApiClient, location: Option<&str>) -> PortalResult<Value> {
    match location {
        Some(loc) => client.get_with("/stats/trends", &[("location", loc)]).await,
        None => client.get("/stats/trends").await,
    }
}

pub async fn disease_trends_by_age(client: &ApiClient) -> PortalResult<Value> {
    client.get("/stats/disease-trends-by-age").await
}

//! Traffic report for a system.

use std::collections::HashMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::client::EdsmClient;
use crate::error::Result;
use crate::lazy::Lazy;

/// Query parameters for the `api-system-v1/traffic` endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficQuery {
    /// Name of the system whose traffic to report.
    pub system_name: String,
}

/// Ship movements recorded for one system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficReport {
    /// EDSM id of the system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// In-game id64 of the system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id64: Option<u64>,

    /// Name of the system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Total, weekly and daily ship counts.
    pub traffic: TrafficCounts,

    /// Ship counts keyed by ship type.
    #[serde(default)]
    pub breakdown: HashMap<String, u64>,
}

/// Total/weekly/daily ship counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TrafficCounts {
    pub total: u64,
    pub week: u64,
    pub day: u64,
}

/// A system's traffic record, fetched as one unit on first access.
///
/// The record starts unfetched; any counter accessor triggers a single
/// fetch, cached until [`refresh`](Traffic::refresh) replaces it.
#[derive(Debug, Clone, Default)]
pub struct Traffic {
    system_name: String,
    inner: Lazy<TrafficReport>,
}

impl Traffic {
    /// An unfetched record scoped to `system_name`.
    pub fn new(system_name: impl Into<String>) -> Self {
        Self {
            system_name: system_name.into(),
            inner: Lazy::new(),
        }
    }

    /// Name of the system this record belongs to.
    pub fn system_name(&self) -> &str {
        &self.system_name
    }

    /// True once the record has been fetched.
    pub fn is_fetched(&self) -> bool {
        self.inner.is_fetched()
    }

    /// The cached report, if fetched. Never triggers a network call.
    pub fn get(&self) -> Option<&TrafficReport> {
        self.inner.get()
    }

    /// The full report, fetching it on first access.
    pub async fn report(&mut self, client: &EdsmClient) -> Result<&TrafficReport> {
        let system_name = &self.system_name;
        self.inner
            .get_or_fetch(|| Self::fetch_report(client, system_name))
            .await
    }

    /// Ships ever recorded in the system.
    pub async fn total(&mut self, client: &EdsmClient) -> Result<u64> {
        Ok(self.report(client).await?.traffic.total)
    }

    /// Ships recorded over the last week.
    pub async fn week(&mut self, client: &EdsmClient) -> Result<u64> {
        Ok(self.report(client).await?.traffic.week)
    }

    /// Ships recorded over the last day.
    pub async fn day(&mut self, client: &EdsmClient) -> Result<u64> {
        Ok(self.report(client).await?.traffic.day)
    }

    /// Ship counts keyed by ship type.
    pub async fn breakdown(&mut self, client: &EdsmClient) -> Result<&HashMap<String, u64>> {
        Ok(&self.report(client).await?.breakdown)
    }

    /// Re-fetch the report, replacing the cached value whole.
    #[tracing::instrument(skip_all, fields(system = %self.system_name))]
    pub async fn refresh(&mut self, client: &EdsmClient) -> Result<()> {
        let report = Self::fetch_report(client, &self.system_name).await?;
        self.inner.set(report);
        Ok(())
    }

    async fn fetch_report(client: &EdsmClient, system_name: &str) -> Result<TrafficReport> {
        let query = TrafficQuery {
            system_name: system_name.to_string(),
        };
        client.fetch("api-system-v1/traffic", &query).await
    }
}

impl Serialize for Traffic {
    /// Serializes as the report, or `null` while unfetched.
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traffic_query_parameter_mapping() {
        let query = TrafficQuery {
            system_name: "Sol".to_string(),
        };

        let serialized = serde_qs::to_string(&query).expect("Failed to serialize query");
        assert_eq!(serialized, "systemName=Sol");
    }

    #[test]
    fn test_report_deserializes() {
        let report: TrafficReport = serde_json::from_value(serde_json::json!({
            "id": 27,
            "id64": 10477373803u64,
            "name": "Sol",
            "traffic": {"total": 564595, "week": 873, "day": 120},
            "breakdown": {"Anaconda": 32, "Python": 14}
        }))
        .unwrap();

        assert_eq!(report.traffic.total, 564595);
        assert_eq!(report.traffic.day, 120);
        assert_eq!(report.breakdown.get("Anaconda"), Some(&32));
    }

    #[test]
    fn test_unfetched_traffic_serializes_as_null() {
        let traffic = Traffic::new("Sol");
        assert_eq!(
            serde_json::to_value(&traffic).unwrap(),
            serde_json::Value::Null
        );
    }
}

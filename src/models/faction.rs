//! Faction listing for a system.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::EdsmClient;
use crate::error::Result;
use crate::traits::Fetch;

/// Query parameters for the `api-system-v1/factions` endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionsQuery {
    /// Name of the system whose factions to list.
    pub system_name: String,

    /// Include influence/state history for each faction.
    #[serde(serialize_with = "crate::models::flag")]
    pub show_history: bool,
}

impl FactionsQuery {
    /// List the factions of `name` without history.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            system_name: name.into(),
            show_history: false,
        }
    }

    /// List the factions of `name` with influence/state history.
    pub fn with_history(name: impl Into<String>) -> Self {
        Self {
            system_name: name.into(),
            show_history: true,
        }
    }
}

/// The minor factions present in one system, fetched as one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Factions {
    /// EDSM id of the system.
    #[serde(default)]
    pub id: Option<u64>,

    /// In-game id64 of the system.
    #[serde(default)]
    pub id64: Option<u64>,

    /// Name of the system.
    #[serde(default)]
    pub name: Option<String>,

    /// The faction currently in control of the system.
    #[serde(default)]
    pub controlling_faction: Option<ControllingFaction>,

    /// All factions with a presence in the system.
    #[serde(default)]
    pub factions: Vec<Faction>,
}

/// The faction in control of a system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllingFaction {
    #[serde(default)]
    pub id: Option<u64>,

    pub name: String,

    #[serde(default)]
    pub allegiance: Option<String>,

    #[serde(default)]
    pub government: Option<String>,
}

/// One minor faction and its current standing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faction {
    /// EDSM faction id.
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub allegiance: Option<String>,

    #[serde(default)]
    pub government: Option<String>,

    /// Share of influence in the system, 0.0 to 1.0.
    #[serde(default)]
    pub influence: f64,

    /// Influence keyed by timestamp; present only when history was
    /// requested. EDSM emits an empty array instead of an empty map, so
    /// this stays untyped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub influence_history: Option<Value>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_history: Option<Value>,

    #[serde(default)]
    pub active_states: Vec<FactionState>,

    #[serde(default)]
    pub pending_states: Vec<FactionState>,

    #[serde(default)]
    pub recovering_states: Vec<FactionState>,

    #[serde(default)]
    pub happiness: Option<String>,

    /// Whether this is a player faction.
    #[serde(default)]
    pub is_player: bool,

    /// When EDSM last saw an update for this faction, as unix seconds.
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub last_update: Option<DateTime<Utc>>,
}

/// An active, pending or recovering state entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactionState {
    pub state: String,

    #[serde(default)]
    pub trend: Option<i64>,
}

impl Factions {
    /// Look up a faction by name. Returns `None` when no faction matches.
    pub fn find(&self, name: &str) -> Option<&Faction> {
        self.factions.iter().find(|f| f.name == name)
    }

    /// True when `faction` currently controls the system.
    pub fn is_controlling(&self, faction: &Faction) -> bool {
        self.controlling_faction
            .as_ref()
            .map_or(false, |c| c.name == faction.name)
    }
}

#[async_trait]
impl Fetch for Factions {
    type Query = FactionsQuery;

    #[tracing::instrument(skip(client))]
    async fn fetch(client: &EdsmClient, query: &Self::Query) -> Result<Self> {
        client.fetch("api-system-v1/factions", query).await
    }
}

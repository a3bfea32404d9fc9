//! Market model and lookup queries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::EdsmClient;
use crate::error::Result;
use crate::traits::Fetch;

/// Query parameters for the `api-system-v1/stations/market` endpoint.
///
/// The endpoint accepts either a system/station name pair or a bare
/// in-game market id.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MarketQuery {
    /// Look up by system and station name.
    ByStation {
        #[serde(rename = "systemName")]
        system_name: String,
        #[serde(rename = "stationName")]
        station_name: String,
    },

    /// Look up by in-game market id.
    ById {
        #[serde(rename = "marketId")]
        market_id: u64,
    },
}

/// A station's market inventory.
///
/// The payload denormalizes its owners: `id`/`id64`/`name` identify the
/// system, `station_id`/`station_name` the station. Leaf entity with no
/// lazy fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// EDSM id of the owning system.
    #[serde(default)]
    pub id: Option<u64>,

    /// In-game id64 of the owning system.
    #[serde(default)]
    pub id64: Option<u64>,

    /// Name of the owning system.
    #[serde(default)]
    pub name: Option<String>,

    /// In-game market id.
    pub market_id: u64,

    /// EDSM id of the owning station.
    #[serde(rename = "sId", default)]
    pub station_id: Option<u64>,

    /// Name of the owning station.
    #[serde(rename = "sName", default)]
    pub station_name: Option<String>,

    /// Commodity listings currently on the market.
    #[serde(default)]
    pub commodities: Vec<Commodity>,
}

/// One commodity listing in a market.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commodity {
    /// EDSM commodity key, e.g. "ceramiccomposites".
    pub id: String,

    /// Display name.
    pub name: String,

    #[serde(default)]
    pub buy_price: i64,

    #[serde(default)]
    pub stock: i64,

    #[serde(default)]
    pub sell_price: i64,

    #[serde(default)]
    pub demand: i64,

    #[serde(default)]
    pub stock_bracket: i64,
}

impl Market {
    /// Fetch a market by in-game market id.
    pub async fn by_id(client: &EdsmClient, market_id: u64) -> Result<Self> {
        Self::fetch(client, &MarketQuery::ById { market_id }).await
    }

    /// Fetch a market by system and station name.
    pub async fn by_station(
        client: &EdsmClient,
        system_name: impl Into<String>,
        station_name: impl Into<String>,
    ) -> Result<Self> {
        Self::fetch(
            client,
            &MarketQuery::ByStation {
                system_name: system_name.into(),
                station_name: station_name.into(),
            },
        )
        .await
    }

    /// Look up a commodity by its display name. Returns `None` when the
    /// market does not list it.
    pub fn commodity(&self, name: &str) -> Option<&Commodity> {
        self.commodities.iter().find(|c| c.name == name)
    }
}

#[async_trait]
impl Fetch for Market {
    type Query = MarketQuery;

    #[tracing::instrument(skip(client))]
    async fn fetch(client: &EdsmClient, query: &Self::Query) -> Result<Self> {
        client.fetch("api-system-v1/stations/market", query).await
    }
}

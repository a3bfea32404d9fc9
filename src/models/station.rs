//! Stations collection and station model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};

use crate::client::EdsmClient;
use crate::error::Result;
use crate::lazy::Lazy;
use crate::models::market::Market;

/// Query parameters for the `api-system-v1/stations` endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationsQuery {
    /// Name of the system whose stations to list.
    pub system_name: String,
}

/// API response wrapper for the stations endpoint.
#[derive(Debug, Deserialize)]
struct StationsResponse {
    #[serde(default)]
    stations: Vec<Station>,
}

/// The stations of one system, fetched together on first access.
///
/// The collection starts unfetched; reading its contents (or looking up a
/// station by name) triggers a single fetch of the whole set, which is then
/// cached until [`refresh`](Stations::refresh) replaces it.
#[derive(Debug, Clone, Default)]
pub struct Stations {
    system_name: String,
    inner: Lazy<Vec<Station>>,
}

impl Stations {
    /// An unfetched collection scoped to `system_name`.
    pub fn new(system_name: impl Into<String>) -> Self {
        Self {
            system_name: system_name.into(),
            inner: Lazy::new(),
        }
    }

    /// Name of the system this collection belongs to.
    pub fn system_name(&self) -> &str {
        &self.system_name
    }

    /// True once the collection has been fetched.
    pub fn is_fetched(&self) -> bool {
        self.inner.is_fetched()
    }

    /// The cached stations, if fetched. Never triggers a network call.
    pub fn get(&self) -> Option<&[Station]> {
        self.inner.get().map(Vec::as_slice)
    }

    /// All stations in the system, fetching them on first access.
    pub async fn entries(&mut self, client: &EdsmClient) -> Result<&[Station]> {
        let system_name = &self.system_name;
        let stations = self
            .inner
            .get_or_fetch(|| Self::fetch_stations(client, system_name))
            .await?;
        Ok(stations.as_slice())
    }

    /// Look up a station by name, fetching the collection first if needed.
    ///
    /// Returns `Ok(None)` when no station matches; "no match" is not an
    /// error.
    pub async fn find(&mut self, client: &EdsmClient, name: &str) -> Result<Option<&Station>> {
        let entries = self.entries(client).await?;
        Ok(entries.iter().find(|s| s.name == name))
    }

    /// Mutable variant of [`find`](Stations::find), for reaching a
    /// station's lazy market.
    pub async fn find_mut(
        &mut self,
        client: &EdsmClient,
        name: &str,
    ) -> Result<Option<&mut Station>> {
        if !self.inner.is_fetched() {
            self.refresh(client).await?;
        }
        Ok(self
            .inner
            .get_mut()
            .and_then(|stations| stations.iter_mut().find(|s| s.name == name)))
    }

    /// Re-fetch the collection, replacing the cached value whole.
    #[tracing::instrument(skip_all, fields(system = %self.system_name))]
    pub async fn refresh(&mut self, client: &EdsmClient) -> Result<()> {
        let stations = Self::fetch_stations(client, &self.system_name).await?;
        self.inner.set(stations);
        Ok(())
    }

    async fn fetch_stations(client: &EdsmClient, system_name: &str) -> Result<Vec<Station>> {
        let query = StationsQuery {
            system_name: system_name.to_string(),
        };
        let response: StationsResponse = client.fetch("api-system-v1/stations", &query).await?;
        Ok(response.stations)
    }
}

impl Serialize for Stations {
    /// Serializes as the station list, or `null` while unfetched.
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}

/// A station within a system.
///
/// Carries the descriptive attributes and service flags from the stations
/// endpoint. The market inventory lives behind a separate endpoint and is
/// fetched lazily through [`Station::market`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// EDSM station id.
    pub id: u64,

    /// In-game market id; absent for stations without a market.
    #[serde(default)]
    pub market_id: Option<u64>,

    /// Station kind, e.g. "Coriolis Starport".
    #[serde(rename = "type", default)]
    pub station_type: Option<String>,

    /// The station name.
    pub name: String,

    /// Distance from the main star, in lightseconds.
    #[serde(default)]
    pub distance_to_arrival: Option<f64>,

    #[serde(default)]
    pub allegiance: Option<String>,

    #[serde(default)]
    pub government: Option<String>,

    #[serde(default)]
    pub economy: Option<String>,

    #[serde(default)]
    pub second_economy: Option<String>,

    /// Whether the station trades commodities.
    #[serde(default)]
    pub have_market: bool,

    #[serde(default)]
    pub have_shipyard: bool,

    #[serde(default)]
    pub have_outfitting: bool,

    /// Additional services, e.g. "Refuel" or "Black Market".
    #[serde(default)]
    pub other_services: Vec<String>,

    /// When EDSM last saw each data block for this station.
    #[serde(default)]
    pub update_time: Option<UpdateTimes>,

    /// Market inventory, fetched on first access when the station has one.
    /// Serialized flattened to its commodities, never as an object handle.
    #[serde(
        skip_deserializing,
        rename = "market",
        serialize_with = "market_commodities"
    )]
    market: Lazy<Market>,
}

/// Flatten a fetched market to its commodities; unfetched markets
/// serialize as `null`.
fn market_commodities<S: Serializer>(
    market: &Lazy<Market>,
    serializer: S,
) -> core::result::Result<S::Ok, S::Error> {
    match market.get() {
        Some(market) => market.commodities.serialize(serializer),
        None => serializer.serialize_none(),
    }
}

impl Station {
    /// The market inventory, fetching it on first access.
    ///
    /// Stations without a market yield `Ok(None)` without touching the
    /// network.
    pub async fn market(&mut self, client: &EdsmClient) -> Result<Option<&Market>> {
        let market_id = match (self.have_market, self.market_id) {
            (true, Some(id)) => id,
            _ => return Ok(None),
        };

        let market = self
            .market
            .get_or_fetch(|| Market::by_id(client, market_id))
            .await?;
        Ok(Some(market))
    }

    /// The cached market, if fetched. Never triggers a network call.
    pub fn cached_market(&self) -> Option<&Market> {
        self.market.get()
    }

    /// True once the market has been fetched.
    pub fn market_is_fetched(&self) -> bool {
        self.market.is_fetched()
    }

    /// Re-fetch the market inventory, replacing the cached value whole.
    ///
    /// A no-op for stations without a market.
    pub async fn refresh_market(&mut self, client: &EdsmClient) -> Result<()> {
        if let (true, Some(market_id)) = (self.have_market, self.market_id) {
            let market = Market::by_id(client, market_id).await?;
            self.market.set(market);
        }
        Ok(())
    }
}

/// Last-update timestamps reported by EDSM, as UTC `YYYY-MM-DD HH:MM:SS`
/// strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimes {
    #[serde(default, with = "edsm_datetime")]
    pub information: Option<NaiveDateTime>,

    #[serde(default, with = "edsm_datetime")]
    pub market: Option<NaiveDateTime>,

    #[serde(default, with = "edsm_datetime")]
    pub shipyard: Option<NaiveDateTime>,

    #[serde(default, with = "edsm_datetime")]
    pub outfitting: Option<NaiveDateTime>,
}

mod edsm_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let value: Option<String> = Option::deserialize(deserializer)?;
        value
            .map(|s| NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}

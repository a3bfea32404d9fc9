//! System model, lookup queries and sphere search.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::EdsmClient;
use crate::error::Result;
use crate::models::station::Stations;
use crate::models::traffic::Traffic;
use crate::traits::Fetch;

/// Optional detail flags shared by the system lookup endpoints.
///
/// EDSM expects these as `0`/`1` integers and omits the corresponding
/// response fields when a flag is off, so every flag defaults to off.
/// `show_all` is not sent on the wire; when set it turns on every flag
/// above it, overriding their individual settings.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailFlags {
    /// Include the system's EDSM id and in-game id64.
    #[serde(serialize_with = "crate::models::flag")]
    pub show_id: bool,

    /// Include galactic coordinates.
    #[serde(serialize_with = "crate::models::flag")]
    pub show_coordinates: bool,

    /// Include permit requirements.
    #[serde(serialize_with = "crate::models::flag")]
    pub show_permit: bool,

    /// Include allegiance, government and economy details.
    #[serde(serialize_with = "crate::models::flag")]
    pub show_information: bool,

    /// Include the primary star.
    #[serde(serialize_with = "crate::models::flag")]
    pub show_primary_star: bool,

    /// Include systems normally hidden as duplicates.
    #[serde(serialize_with = "crate::models::flag")]
    pub include_hidden: bool,

    /// Turn on every flag above, regardless of its individual setting.
    #[serde(skip)]
    pub show_all: bool,
}

impl DetailFlags {
    /// Request every optional field.
    pub fn all() -> Self {
        Self {
            show_all: true,
            ..Self::default()
        }
    }

    /// The flag set actually sent on the wire: `show_all` wins over any
    /// individually-set flag.
    #[must_use]
    pub fn resolved(&self) -> Self {
        if self.show_all {
            Self {
                show_id: true,
                show_coordinates: true,
                show_permit: true,
                show_information: true,
                show_primary_star: true,
                include_hidden: true,
                show_all: false,
            }
        } else {
            *self
        }
    }
}

/// Query parameters for the `api-v1/system` endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemQuery {
    /// Name of the system to look up.
    pub system_name: String,

    #[serde(flatten)]
    pub flags: DetailFlags,
}

impl SystemQuery {
    /// Look up `name` with every optional field off.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            system_name: name.into(),
            flags: DetailFlags::default(),
        }
    }

    /// Look up `name` with every optional field on.
    pub fn with_all_info(name: impl Into<String>) -> Self {
        Self {
            system_name: name.into(),
            flags: DetailFlags::all(),
        }
    }

    /// The query as sent on the wire, with `show_all` applied.
    #[must_use]
    pub fn resolved(&self) -> Self {
        Self {
            system_name: self.system_name.clone(),
            flags: self.flags.resolved(),
        }
    }
}

/// Query parameters for the `api-v1/sphere-systems` endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SphereQuery {
    /// Name of the system at the center of the sphere.
    pub system_name: String,

    /// Radius of the search sphere, in lightyears.
    pub radius: u32,

    #[serde(flatten)]
    pub flags: DetailFlags,
}

impl SphereQuery {
    /// Search `radius` lightyears around `name` with every optional field
    /// off.
    pub fn around(name: impl Into<String>, radius: u32) -> Self {
        Self {
            system_name: name.into(),
            radius,
            flags: DetailFlags::default(),
        }
    }

    /// The query as sent on the wire, with `show_all` applied.
    #[must_use]
    pub fn resolved(&self) -> Self {
        Self {
            system_name: self.system_name.clone(),
            radius: self.radius,
            flags: self.flags.resolved(),
        }
    }
}

/// An EDSM star system.
///
/// Every field besides `name` is only present when the corresponding
/// [`DetailFlags`] flag was requested, and stays `None` otherwise. A system
/// owns a lazy [`Stations`] collection and [`Traffic`] record scoped to its
/// own name; both populate themselves on first access and are excluded from
/// equality with the wire payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    /// The system name.
    pub name: String,

    /// EDSM internal id.
    #[serde(default)]
    pub id: Option<u64>,

    /// In-game 64-bit id.
    #[serde(default)]
    pub id64: Option<u64>,

    /// Galactic coordinates.
    #[serde(default)]
    pub coords: Option<Coords>,

    /// Whether the coordinates are confirmed.
    #[serde(default)]
    pub coords_locked: Option<bool>,

    /// Whether a permit is required to enter the system.
    #[serde(default)]
    pub require_permit: Option<bool>,

    /// Name of the required permit, if any.
    #[serde(default)]
    pub permit_name: Option<String>,

    /// Allegiance, government and economy details.
    #[serde(default)]
    pub information: Option<SystemInformation>,

    /// The system's main star.
    #[serde(default)]
    pub primary_star: Option<PrimaryStar>,

    /// Whether the system is hidden as a duplicate.
    #[serde(default)]
    pub hidden: Option<bool>,

    /// Distance from the search center, on sphere results only.
    #[serde(default)]
    pub distance: Option<f64>,

    /// Stations in this system, fetched on first access.
    #[serde(skip_deserializing)]
    pub stations: Stations,

    /// Traffic report for this system, fetched on first access.
    #[serde(skip_deserializing)]
    pub traffic: Traffic,
}

/// Galactic coordinates, in lightyears relative to Sol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Population, government and economy details of a system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInformation {
    #[serde(default)]
    pub allegiance: Option<String>,

    #[serde(default)]
    pub government: Option<String>,

    /// Name of the controlling faction.
    #[serde(default)]
    pub faction: Option<String>,

    #[serde(default)]
    pub faction_state: Option<String>,

    #[serde(default)]
    pub population: Option<u64>,

    #[serde(default)]
    pub security: Option<String>,

    #[serde(default)]
    pub economy: Option<String>,

    #[serde(default)]
    pub second_economy: Option<String>,

    #[serde(default)]
    pub reserve: Option<String>,
}

/// The main star of a system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryStar {
    /// Star class, e.g. "G (White-Yellow) Star".
    #[serde(rename = "type", default)]
    pub star_type: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub is_scoopable: Option<bool>,
}

impl System {
    /// Build a system from a raw payload, binding its lazy sub-objects to
    /// the system name.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the payload does not match the system
    /// schema.
    pub fn from_payload(payload: serde_json::Value) -> Result<Self> {
        let system: System = serde_json::from_value(payload)?;
        Ok(system.bind())
    }

    /// Search for systems within a sphere radius of a center system.
    ///
    /// An empty result is a valid outcome and yields an empty vector.
    #[tracing::instrument(skip(client))]
    pub async fn sphere(client: &EdsmClient, query: &SphereQuery) -> Result<Vec<Self>> {
        let systems: Vec<System> = client
            .fetch("api-v1/sphere-systems", &query.resolved())
            .await?;
        Ok(systems.into_iter().map(System::bind).collect())
    }

    /// Eagerly populate the lazy stations and traffic sub-objects in one
    /// pass, for callers that prefer a fully-loaded system over on-demand
    /// fetches.
    pub async fn hydrate(&mut self, client: &EdsmClient) -> Result<()> {
        self.stations.refresh(client).await?;
        self.traffic.refresh(client).await?;
        Ok(())
    }

    /// Point the lazy sub-objects at this system's name.
    fn bind(mut self) -> Self {
        self.stations = Stations::new(&self.name);
        self.traffic = Traffic::new(&self.name);
        self
    }
}

#[async_trait]
impl Fetch for System {
    type Query = SystemQuery;

    #[tracing::instrument(skip(client))]
    async fn fetch(client: &EdsmClient, query: &Self::Query) -> Result<Self> {
        let system: System = client.fetch("api-v1/system", &query.resolved()).await?;
        Ok(system.bind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_query_parameter_mapping() {
        let query = SystemQuery {
            system_name: "Sol".to_string(),
            flags: DetailFlags {
                show_coordinates: true,
                ..Default::default()
            },
        };

        let serialized = serde_qs::to_string(&query.resolved()).expect("Failed to serialize query");
        assert_eq!(
            serialized,
            "systemName=Sol&showId=0&showCoordinates=1&showPermit=0\
             &showInformation=0&showPrimaryStar=0&includeHidden=0"
        );
    }

    #[test]
    fn test_show_all_overrides_individual_flags() {
        let flags = DetailFlags {
            show_id: false,
            show_coordinates: true,
            show_all: true,
            ..Default::default()
        };

        let resolved = flags.resolved();
        assert!(resolved.show_id);
        assert!(resolved.show_coordinates);
        assert!(resolved.show_permit);
        assert!(resolved.show_information);
        assert!(resolved.show_primary_star);
        assert!(resolved.include_hidden);
        assert!(!resolved.show_all);
    }

    #[test]
    fn test_resolution_without_show_all_is_identity() {
        let flags = DetailFlags {
            show_permit: true,
            ..Default::default()
        };

        let resolved = flags.resolved();
        assert!(resolved.show_permit);
        assert!(!resolved.show_id);
        assert!(!resolved.include_hidden);
    }

    #[test]
    fn test_sphere_query_parameter_mapping() {
        let query = SphereQuery::around("Sol", 20);

        let serialized = serde_qs::to_string(&query.resolved()).expect("Failed to serialize query");
        assert_eq!(
            serialized,
            "systemName=Sol&radius=20&showId=0&showCoordinates=0&showPermit=0\
             &showInformation=0&showPrimaryStar=0&includeHidden=0"
        );
    }

    #[test]
    fn test_system_deserializes_with_optional_fields() {
        let system = System::from_payload(serde_json::json!({
            "name": "Sol",
            "id": 27,
            "id64": 10477373803u64,
            "coords": {"x": 0.0, "y": 0.0, "z": 0.0},
            "coordsLocked": true,
            "requirePermit": true,
            "permitName": "Sol",
            "information": {
                "allegiance": "Federation",
                "government": "Democracy",
                "population": 22780919531u64
            },
            "primaryStar": {
                "type": "G (White-Yellow) Star",
                "name": "Sol",
                "isScoopable": true
            }
        }))
        .unwrap();

        assert_eq!(system.name, "Sol");
        assert_eq!(system.id, Some(27));
        assert_eq!(system.coords, Some(Coords { x: 0.0, y: 0.0, z: 0.0 }));
        assert_eq!(system.require_permit, Some(true));
        let info = system.information.unwrap();
        assert_eq!(info.allegiance.as_deref(), Some("Federation"));
        assert_eq!(info.population, Some(22780919531));

        // Lazy sub-objects are bound to the system name and start unfetched.
        assert_eq!(system.stations.system_name(), "Sol");
        assert_eq!(system.traffic.system_name(), "Sol");
        assert!(!system.stations.is_fetched());
        assert!(!system.traffic.is_fetched());
    }

    #[test]
    fn test_minimal_system_payload() {
        let system = System::from_payload(serde_json::json!({"name": "Alioth"})).unwrap();

        assert_eq!(system.name, "Alioth");
        assert!(system.id.is_none());
        assert!(system.coords.is_none());
        assert!(system.information.is_none());
        assert!(system.primary_star.is_none());
    }
}

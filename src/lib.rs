//! EDSM API client library.
//!
//! A Rust library for interacting with the EDSM (Elite Dangerous Star Map)
//! REST API. Endpoint lookups are typed query structs behind a [`Fetch`]
//! trait, and dependent data (stations, markets, traffic) hangs off the
//! owning entity as lazy sub-objects fetched on first access.
//!
//! # Quick Start
//!
//! ```no_run
//! use edsm::{EdsmClient, Fetch, System, SystemQuery};
//!
//! #[tokio::main]
//! async fn main() -> edsm::Result<()> {
//!     // Create client from environment variables
//!     let client = EdsmClient::from_env()?;
//!
//!     // Look up a system with coordinates
//!     let mut query = SystemQuery::named("Sol");
//!     query.flags.show_coordinates = true;
//!     let mut system = System::fetch(&client, &query).await?;
//!     println!("System: {}", system.name);
//!
//!     // First access fetches the stations; later reads hit the cache
//!     let stations = system.stations.entries(&client).await?;
//!     println!("Found {} stations", stations.len());
//!
//!     // Lookups by name return None instead of erroring
//!     if let Some(station) = system.stations.find(&client, "Daedalus").await? {
//!         println!("Daedalus is {:?} ls out", station.distance_to_arrival);
//!     }
//!
//!     // Traffic is fetched the same way, as one unit
//!     let report = system.traffic.report(&client).await?;
//!     println!("{} ships in the last day", report.traffic.day);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around a small set of layers:
//!
//! - [`EdsmClient`] - request assembly, response conventions ("empty object"
//!   means not found), optional disk cache
//! - [`Fetch`] - one implementation per single-entity endpoint
//! - lazy models - [`Stations`], [`Traffic`] and per-station markets cache
//!   their first fetch on the owning object until explicitly refreshed
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `EDSM_API_URL` (optional) - Base URL (defaults to `https://www.edsm.net`)
//! - `EDSM_CACHE_DIR` (optional) - When set, enables the disk response cache

mod cache;
mod client;
mod error;
mod lazy;
mod models;
mod traits;

pub mod cli;
pub mod output;

// Re-export core types
pub use cache::ResponseCache;
pub use client::EdsmClient;
pub use error::{EdsmError, Result};
pub use lazy::Lazy;

// Re-export traits
pub use traits::Fetch;

// Re-export models
pub use models::{
    // System types
    Coords,
    DetailFlags,
    PrimaryStar,
    SphereQuery,
    System,
    SystemInformation,
    SystemQuery,
    // Station types
    Station,
    Stations,
    StationsQuery,
    UpdateTimes,
    // Market types
    Commodity,
    Market,
    MarketQuery,
    // Traffic types
    Traffic,
    TrafficCounts,
    TrafficQuery,
    TrafficReport,
    // Faction types
    ControllingFaction,
    Faction,
    Factions,
    FactionsQuery,
    FactionState,
};

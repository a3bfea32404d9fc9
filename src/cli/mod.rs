//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the edsm
//! binary.

use clap::{Parser, Subcommand};

/// EDSM command-line interface.
#[derive(Parser, Debug)]
#[command(name = "edsm", about = "EDSM API CLI", version)]
pub struct Cli {
    /// Output results as raw JSON instead of formatted text.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up a single system.
    System {
        /// Name of the system.
        name: String,

        /// Request every optional field.
        #[arg(long)]
        all: bool,

        /// Include the system's EDSM ids.
        #[arg(long)]
        ids: bool,

        /// Include galactic coordinates.
        #[arg(long)]
        coords: bool,

        /// Include permit requirements.
        #[arg(long)]
        permit: bool,

        /// Include allegiance, government and economy details.
        #[arg(long)]
        information: bool,

        /// Include the primary star.
        #[arg(long)]
        primary_star: bool,

        /// Include systems normally hidden as duplicates.
        #[arg(long)]
        include_hidden: bool,
    },

    /// Search for systems within a radius of a center system.
    Sphere {
        /// Name of the system at the center of the sphere.
        name: String,

        /// Search radius in lightyears.
        #[arg(long, default_value_t = 50)]
        radius: u32,

        /// Request every optional field for each result.
        #[arg(long)]
        all: bool,
    },

    /// List the stations of a system.
    Stations {
        /// Name of the system.
        system: String,
    },

    /// Show a station's market inventory.
    Market {
        /// Name of the system.
        #[arg(required_unless_present = "id")]
        system: Option<String>,

        /// Name of the station.
        #[arg(required_unless_present = "id")]
        station: Option<String>,

        /// Look up by in-game market id instead of names.
        #[arg(long, conflicts_with_all = ["system", "station"])]
        id: Option<u64>,
    },

    /// Show the traffic report of a system.
    Traffic {
        /// Name of the system.
        system: String,
    },

    /// List the minor factions of a system.
    Factions {
        /// Name of the system.
        system: String,

        /// Include influence/state history.
        #[arg(long)]
        history: bool,
    },
}

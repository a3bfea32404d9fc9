//! EDSM API CLI binary.
//!
//! A command-line interface for interacting with the EDSM API.

use clap::Parser;
use edsm::cli::{Cli, Command};
use edsm::output::PrettyPrint;
use edsm::{
    DetailFlags, EdsmClient, Factions, FactionsQuery, Fetch, Market, SphereQuery, System,
    SystemQuery,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let client = match EdsmClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: EDSM_API_URL must be a valid URL if set");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &EdsmClient, cli: Cli) -> edsm::Result<()> {
    match cli.command {
        Command::System {
            name,
            all,
            ids,
            coords,
            permit,
            information,
            primary_star,
            include_hidden,
        } => {
            let query = SystemQuery {
                system_name: name,
                flags: DetailFlags {
                    show_id: ids,
                    show_coordinates: coords,
                    show_permit: permit,
                    show_information: information,
                    show_primary_star: primary_star,
                    include_hidden,
                    show_all: all,
                },
            };
            let system = System::fetch(client, &query).await?;
            output_single(&system, cli.json)
        }

        Command::Sphere { name, radius, all } => {
            let query = SphereQuery {
                system_name: name,
                radius,
                flags: if all {
                    DetailFlags::all()
                } else {
                    DetailFlags::default()
                },
            };
            let systems = System::sphere(client, &query).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&systems)?);
            } else {
                let rows: Vec<SphereRow> = systems.iter().map(SphereRow::from).collect();
                println!("{}", Table::new(rows));
                println!("\n{} systems within {} ly", systems.len(), radius);
            }
            Ok(())
        }

        Command::Stations { system } => {
            let mut stations = edsm::Stations::new(system);
            let entries = stations.entries(client).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(entries)?);
            } else {
                let rows: Vec<StationRow> = entries.iter().map(StationRow::from).collect();
                println!("{}", Table::new(rows));
            }
            Ok(())
        }

        Command::Market {
            system,
            station,
            id,
        } => {
            let market = match (id, system, station) {
                (Some(market_id), _, _) => Market::by_id(client, market_id).await?,
                (None, Some(system), Some(station)) => {
                    Market::by_station(client, system, station).await?
                }
                // clap's required_unless_present rules out the rest
                _ => return Ok(()),
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&market)?);
            } else {
                println!("{}", market.pretty_print());
                let rows: Vec<CommodityRow> =
                    market.commodities.iter().map(CommodityRow::from).collect();
                println!("{}", Table::new(rows));
            }
            Ok(())
        }

        Command::Traffic { system } => {
            let mut traffic = edsm::Traffic::new(system);
            let report = traffic.report(client).await?;
            output_single(report, cli.json)
        }

        Command::Factions { system, history } => {
            let query = if history {
                FactionsQuery::with_history(system)
            } else {
                FactionsQuery::named(system)
            };
            let factions = Factions::fetch(client, &query).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&factions)?);
            } else {
                println!("{}", factions.pretty_print());
                let rows: Vec<FactionRow> =
                    factions.factions.iter().map(FactionRow::from).collect();
                println!("{}", Table::new(rows));
            }
            Ok(())
        }
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> edsm::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct SphereRow {
    name: String,
    #[tabled(rename = "distance (ly)")]
    distance: String,
}

impl From<&System> for SphereRow {
    fn from(s: &System) -> Self {
        Self {
            name: s.name.clone(),
            distance: s
                .distance
                .map(|d| format!("{d:.2}"))
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct StationRow {
    name: String,
    #[tabled(rename = "type")]
    station_type: String,
    #[tabled(rename = "distance (ls)")]
    distance: String,
    services: String,
}

impl From<&edsm::Station> for StationRow {
    fn from(s: &edsm::Station) -> Self {
        let mut services = Vec::new();
        if s.have_market {
            services.push("market");
        }
        if s.have_shipyard {
            services.push("shipyard");
        }
        if s.have_outfitting {
            services.push("outfitting");
        }
        Self {
            name: s.name.clone(),
            station_type: s.station_type.clone().unwrap_or_default(),
            distance: s
                .distance_to_arrival
                .map(|d| format!("{d:.0}"))
                .unwrap_or_default(),
            services: services.join(", "),
        }
    }
}

#[derive(Tabled)]
struct CommodityRow {
    name: String,
    buy: i64,
    sell: i64,
    stock: i64,
    demand: i64,
}

impl From<&edsm::Commodity> for CommodityRow {
    fn from(c: &edsm::Commodity) -> Self {
        Self {
            name: c.name.clone(),
            buy: c.buy_price,
            sell: c.sell_price,
            stock: c.stock,
            demand: c.demand,
        }
    }
}

#[derive(Tabled)]
struct FactionRow {
    name: String,
    #[tabled(rename = "influence")]
    influence: String,
    state: String,
    allegiance: String,
}

impl From<&edsm::Faction> for FactionRow {
    fn from(f: &edsm::Faction) -> Self {
        Self {
            name: f.name.clone(),
            influence: format!("{:.1}%", f.influence * 100.0),
            state: f.state.clone().unwrap_or_default(),
            allegiance: f.allegiance.clone().unwrap_or_default(),
        }
    }
}

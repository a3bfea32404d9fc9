//! Basic example demonstrating the EDSM API client.
//!
//! Run with:
//! ```
//! cargo run --example basic
//! ```

use edsm::{EdsmClient, Factions, FactionsQuery, Fetch, SphereQuery, System, SystemQuery};

#[tokio::main]
async fn main() -> edsm::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating EDSM client...");
    let client = EdsmClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // Look up Sol with every optional field
    println!("\n--- Looking up Sol ---");
    let mut sol = System::fetch(&client, &SystemQuery::with_all_info("Sol")).await?;
    println!("System: {}", sol.name);
    println!("  Ids: {:?} / {:?}", sol.id, sol.id64);
    if let Some(info) = &sol.information {
        println!("  Allegiance: {:?}", info.allegiance);
        println!("  Population: {:?}", info.population);
    }

    // First access fetches the stations in one call
    println!("\n--- Listing Stations ---");
    let stations = sol.stations.entries(&client).await?;
    println!("Found {} stations", stations.len());
    for station in stations.iter().take(5) {
        println!(
            "  - {} ({})",
            station.name,
            station.station_type.as_deref().unwrap_or("unknown")
        );
    }

    // Reach one station's market through the collection
    if let Some(station) = sol.stations.find_mut(&client, "Daedalus").await? {
        println!("\n--- Market at Daedalus ---");
        if let Some(market) = station.market(&client).await? {
            println!("{} commodities listed", market.commodities.len());
        } else {
            println!("No market at this station");
        }
    }

    // Traffic for the same system
    println!("\n--- Traffic ---");
    let report = sol.traffic.report(&client).await?;
    println!(
        "{} total / {} this week / {} today",
        report.traffic.total, report.traffic.week, report.traffic.day
    );

    // Nearby systems
    println!("\n--- Systems within 10 ly ---");
    let nearby = System::sphere(&client, &SphereQuery::around("Sol", 10)).await?;
    for system in &nearby {
        println!("  - {} ({:?} ly)", system.name, system.distance);
    }

    // Factions
    println!("\n--- Factions ---");
    let factions = Factions::fetch(&client, &FactionsQuery::named("Sol")).await?;
    for faction in factions.factions.iter().take(5) {
        println!(
            "  - {} ({:.1}% influence)",
            faction.name,
            faction.influence * 100.0
        );
    }

    Ok(())
}

//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Factions, Market, System, TrafficReport};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for System {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.name.len().max(30));

        let mut lines = vec![format!("System: {}", self.name), divider];

        if let (Some(id), Some(id64)) = (self.id, self.id64) {
            lines.push(format!("Ids:            {} / {}", id, id64));
        }

        if let Some(coords) = &self.coords {
            lines.push(format!(
                "Coordinates:    {:.2} / {:.2} / {:.2}",
                coords.x, coords.y, coords.z
            ));
        }

        if self.require_permit == Some(true) {
            let permit = self.permit_name.as_deref().unwrap_or("unnamed");
            lines.push(format!("Permit:         required ({permit})"));
        }

        if let Some(info) = &self.information {
            if let Some(faction) = &info.faction {
                lines.push(format!("Controlled by:  {}", faction));
            }
            if let Some(allegiance) = &info.allegiance {
                lines.push(format!("Allegiance:     {}", allegiance));
            }
            if let Some(government) = &info.government {
                lines.push(format!("Government:     {}", government));
            }
            if let Some(population) = info.population {
                lines.push(format!("Population:     {}", population));
            }
            if let Some(security) = &info.security {
                lines.push(format!("Security:       {}", security));
            }
            if let Some(economy) = &info.economy {
                lines.push(format!("Economy:        {}", economy));
            }
        }

        if let Some(star) = &self.primary_star {
            let scoopable = match star.is_scoopable {
                Some(true) => " (scoopable)",
                _ => "",
            };
            lines.push(format!(
                "Primary star:   {}{}",
                star.star_type.as_deref().unwrap_or("unknown"),
                scoopable
            ));
        }

        if let Some(distance) = self.distance {
            lines.push(format!("Distance:       {:.2} ly", distance));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for TrafficReport {
    fn pretty_print(&self) -> String {
        let name = self.name.as_deref().unwrap_or("system");
        let divider = "─".repeat(name.len().max(30));

        let mut lines = vec![
            format!("Traffic: {}", name),
            divider,
            format!("Total:          {}", self.traffic.total),
            format!("Last 7 days:    {}", self.traffic.week),
            format!("Last 24 hours:  {}", self.traffic.day),
        ];

        if !self.breakdown.is_empty() {
            let mut ships: Vec<_> = self.breakdown.iter().collect();
            ships.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
            lines.push("Breakdown:".to_string());
            for (ship, count) in ships {
                lines.push(format!("  {:<24} {}", ship, count));
            }
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Factions {
    fn pretty_print(&self) -> String {
        let name = self.name.as_deref().unwrap_or("system");
        let divider = "─".repeat(name.len().max(30));

        let mut lines = vec![format!("Factions: {}", name), divider];

        if let Some(controlling) = &self.controlling_faction {
            lines.push(format!("Controlled by:  {}", controlling.name));
        }
        lines.push(format!("Factions:       {}", self.factions.len()));

        lines.join("\n")
    }
}

impl PrettyPrint for Market {
    fn pretty_print(&self) -> String {
        let station = self.station_name.as_deref().unwrap_or("station");
        let divider = "─".repeat(station.len().max(30));

        let mut lines = vec![format!("Market: {}", station), divider];

        if let Some(system) = &self.name {
            lines.push(format!("System:         {}", system));
        }
        lines.push(format!("Market id:      {}", self.market_id));
        lines.push(format!("Commodities:    {}", self.commodities.len()));

        lines.join("\n")
    }
}

//! CLI argument parsing tests.

use clap::Parser;
use edsm::cli::{Cli, Command};

#[test]
fn test_cli_parses_system_subcommand() {
    let cli = Cli::parse_from(["edsm", "system", "Sol", "--coords"]);

    assert!(!cli.json);
    match cli.command {
        Command::System {
            name, coords, all, ..
        } => {
            assert_eq!(name, "Sol");
            assert!(coords);
            assert!(!all);
        }
        _ => panic!("Expected System command"),
    }
}

#[test]
fn test_cli_parses_sphere_with_default_radius() {
    let cli = Cli::parse_from(["edsm", "sphere", "Sol"]);

    match cli.command {
        Command::Sphere { name, radius, .. } => {
            assert_eq!(name, "Sol");
            assert_eq!(radius, 50);
        }
        _ => panic!("Expected Sphere command"),
    }
}

#[test]
fn test_cli_parses_market_by_names() {
    let cli = Cli::parse_from(["edsm", "market", "Sol", "Daedalus"]);

    match cli.command {
        Command::Market {
            system,
            station,
            id,
        } => {
            assert_eq!(system.as_deref(), Some("Sol"));
            assert_eq!(station.as_deref(), Some("Daedalus"));
            assert!(id.is_none());
        }
        _ => panic!("Expected Market command"),
    }
}

#[test]
fn test_cli_parses_market_by_id() {
    let cli = Cli::parse_from(["edsm", "market", "--id", "128016640"]);

    match cli.command {
        Command::Market { system, id, .. } => {
            assert!(system.is_none());
            assert_eq!(id, Some(128016640));
        }
        _ => panic!("Expected Market command"),
    }
}

#[test]
fn test_cli_rejects_market_without_target() {
    let result = Cli::try_parse_from(["edsm", "market"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_rejects_market_with_names_and_id() {
    let result = Cli::try_parse_from(["edsm", "market", "Sol", "Daedalus", "--id", "1"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_global_json_flag() {
    let cli = Cli::parse_from(["edsm", "traffic", "Sol", "--json"]);

    assert!(cli.json);
    match cli.command {
        Command::Traffic { system } => assert_eq!(system, "Sol"),
        _ => panic!("Expected Traffic command"),
    }
}

#[test]
fn test_cli_parses_factions_with_history() {
    let cli = Cli::parse_from(["edsm", "factions", "Sol", "--history"]);

    match cli.command {
        Command::Factions { system, history } => {
            assert_eq!(system, "Sol");
            assert!(history);
        }
        _ => panic!("Expected Factions command"),
    }
}

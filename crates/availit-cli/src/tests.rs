use super::*;

use availit_core::{default_sources, LocationResult};

#[test]
fn parses_sources_command() {
    let cli = Cli::try_parse_from(["availit-cli", "sources"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Sources)));
}

#[test]
fn parses_scrape_command_defaults_to_raw() {
    let cli =
        Cli::try_parse_from(["availit-cli", "scrape", "delhi"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Scrape { ref key, canonical: false }) if key == "delhi"
    ));
}

#[test]
fn parses_scrape_canonical_flag() {
    let cli = Cli::try_parse_from(["availit-cli", "scrape", "bangalore", "--canonical"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Scrape { canonical: true, .. })
    ));
}

#[test]
fn scrape_requires_key() {
    assert!(Cli::try_parse_from(["availit-cli", "scrape"]).is_err());
}

#[test]
fn parses_locate_command() {
    let cli = Cli::try_parse_from(["availit-cli", "locate", "New Delhi"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Locate { ref city }) if city == "New Delhi"
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["availit-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn source_lines_list_key_kind_and_url() {
    let lines = commands::source_lines(&default_sources());
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("bangalore\tcard\thttp"));
    assert!(lines[1].starts_with("delhi\ttable\thttp"));
}

#[test]
fn describe_location_prints_first_match() {
    let matches: Vec<LocationResult> = serde_json::from_str(
        r#"[{"lat": "28.6139", "lon": "77.209"}, {"lat": "1", "lon": "2"}]"#,
    )
    .expect("location json");
    assert_eq!(commands::describe_location(&matches), "28.6139,77.209");
}

#[test]
fn describe_location_reports_unknown_for_empty_result() {
    assert_eq!(commands::describe_location(&[]), "location unknown");
}

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["storemap"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(!cli.json);
}

#[test]
fn parses_list_command() {
    let cli = Cli::try_parse_from(["storemap", "list"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::List)));
}

#[test]
fn parses_filter_key() {
    let cli = Cli::try_parse_from(["storemap", "filter", "Bank"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Filter { ref key }) if key == "Bank"
    ));
}

#[test]
fn filter_requires_key() {
    assert!(Cli::try_parse_from(["storemap", "filter"]).is_err());
}

#[test]
fn parses_geocode_without_description() {
    let cli = Cli::try_parse_from([
        "storemap",
        "geocode",
        "--address",
        "1 Main St",
        "--title",
        "Home",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Geocode {
            ref address,
            ref title,
            description: None,
        }) if address == "1 Main St" && title == "Home"
    ));
}

#[test]
fn geocode_requires_title() {
    assert!(Cli::try_parse_from(["storemap", "geocode", "--address", "1 Main St"]).is_err());
}

#[test]
fn parses_route_endpoints() {
    let cli = Cli::try_parse_from([
        "storemap",
        "route",
        "--origin",
        "43.25,-79.88",
        "--destination",
        "43.26,-79.87",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Route { ref origin, ref destination })
            if origin == "43.25,-79.88" && destination == "43.26,-79.87"
    ));
}

#[test]
fn global_flags_apply_after_subcommand() {
    let cli = Cli::try_parse_from([
        "storemap",
        "session",
        "--catalog",
        "https://example.com/location-info.json",
        "--json",
    ])
    .unwrap();
    assert!(matches!(cli.command, Some(Commands::Session)));
    assert_eq!(
        cli.catalog.as_deref(),
        Some("https://example.com/location-info.json")
    );
    assert!(cli.json);
}

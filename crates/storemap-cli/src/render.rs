//! Text and JSON output for the CLI.

use serde_json::json;
use storemap_locator::{AppState, MapProvider, OpenPopup, RouteOption};

/// Print the grouped listing.
pub(crate) fn print_listing<P: MapProvider>(app: &AppState<P>, as_json: bool) -> anyhow::Result<()> {
    let listing = app.listing();
    if as_json {
        println!("{}", serde_json::to_string_pretty(listing)?);
        return Ok(());
    }

    if listing.groups.is_empty() {
        println!("no locations loaded");
        return Ok(());
    }

    for group in &listing.groups {
        println!("{}  [{}]", group.heading(), group.collapse_id());
        for entry in &group.entries {
            let address = match entry.address_href() {
                Some(href) => format!("{} <{href}>", entry.address),
                None => entry.address.clone(),
            };
            println!(
                "  {:>3}  {:<28}{:<32}{}",
                entry.id.0,
                entry.name,
                entry.position.key(),
                address
            );
        }
    }
    Ok(())
}

/// Print markers visible under the current filter.
pub(crate) fn print_visible<P: MapProvider>(app: &AppState<P>, as_json: bool) -> anyhow::Result<()> {
    let visible: Vec<_> = app.visible_records().collect();
    if as_json {
        let body = json!({
            "filter": app.filter().key(),
            "visible": visible,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!(
        "filter '{}': {} of {} markers visible",
        app.filter().key(),
        visible.len(),
        app.records().len()
    );
    for record in visible {
        println!("  {:>3}  {:<40}{}", record.id.0, record.label, record.key());
    }
    Ok(())
}

/// Print the rendered route, if any.
pub(crate) fn print_route<P: MapProvider>(app: &AppState<P>, as_json: bool) -> anyhow::Result<()> {
    let Some(route) = app.route().rendered() else {
        if !as_json {
            println!("no route rendered");
        }
        return Ok(());
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(route)?);
        return Ok(());
    }

    println!("Route via {}", route.summary);
    for leg in &route.legs {
        println!(
            "  {} -> {}: {}, {}",
            leg.start_address, leg.end_address, leg.distance_text, leg.duration_text
        );
    }
    println!(
        "Total: {:.1} km, {} min",
        meters_to_km(route.total_distance_meters()),
        route.total_duration_secs() / 60
    );
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn meters_to_km(meters: u64) -> f64 {
    meters as f64 / 1000.0
}

/// Print the map viewport, the open popup and the route selectors.
pub(crate) fn print_view<P: MapProvider>(app: &AppState<P>, as_json: bool) -> anyhow::Result<()> {
    let view = app.view();
    if as_json {
        let body = json!({
            "view": view,
            "popup": app.popup(),
            "route_phase": app.route_phase(),
            "origin": app.route().origin(),
            "destination": app.route().destination(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("center {} zoom {}", view.center.key(), view.zoom);
    match app.popup() {
        Some(popup) => print_popup(popup),
        None => println!("no popup open"),
    }
    println!("route: {:?}", app.route_phase());
    print_options("origin", &app.route().options().origin);
    print_options("destination", &app.route().options().destination);
    Ok(())
}

pub(crate) fn print_popup(popup: &OpenPopup) {
    println!("popup for marker {}:", popup.marker.0);
    for line in popup.content.to_lines() {
        println!("  {line}");
    }
}

fn print_options(name: &str, options: &[RouteOption]) {
    println!("{name} options:");
    for option in options {
        let flag = if option.disabled { " (disabled)" } else { "" };
        if option.is_placeholder() {
            println!("  {}", option.label);
        } else {
            println!("  {:<24}{}{flag}", option.value, option.label);
        }
    }
}

/// Drain queued notifications to stderr.
pub(crate) fn print_notifications<P: MapProvider>(app: &mut AppState<P>) {
    for message in app.take_notifications() {
        eprintln!("! {message}");
    }
}

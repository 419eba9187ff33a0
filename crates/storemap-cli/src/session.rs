//! Interactive session: one command per stdin line.

use anyhow::{bail, Context};
use storemap_core::{MarkerId, Position};
use storemap_locator::{AppState, Command, MapProvider, Slot};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

const HELP: &str = "\
commands:
  filter <category|all>             show one category
  button <caption>                  e.g. button Show Bank Stores
  locate <lat,lng>                  device position
  add <address> | <title> [| <description>]
  focus <id>                        center on a listing entry
  open <id>                         open a marker popup
  close                             click the map background
  origin [<lat,lng>]                select (or clear) the route origin
  dest [<lat,lng>]                  select (or clear) the route destination
  route                             request driving directions
  list                              print the listing
  view                              print map view, popup and selectors
  quit";

/// A parsed session line.
#[derive(Debug, PartialEq)]
pub(crate) enum SessionLine {
    Dispatch(Command),
    List,
    View,
    Help,
    Quit,
    Empty,
}

/// Parse one input line.
///
/// # Errors
///
/// Returns an error for unknown commands or malformed arguments.
pub(crate) fn parse_line(line: &str) -> anyhow::Result<SessionLine> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(SessionLine::Empty);
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match verb {
        "filter" => Command::Filter(required(rest, "filter")?.to_string()),
        "button" => Command::FilterButton(required(rest, "button")?.to_string()),
        "locate" => {
            let position: Position = required(rest, "locate")?
                .parse()
                .with_context(|| format!("invalid position '{rest}'"))?;
            Command::Geolocate(position)
        }
        "add" => parse_add(rest)?,
        "focus" => Command::Focus(parse_id(rest)?),
        "open" => Command::OpenInfo(parse_id(rest)?),
        "close" => Command::MapClick,
        "origin" => Command::Select(Slot::Origin, optional(rest)),
        "dest" => Command::Select(Slot::Destination, optional(rest)),
        "route" => Command::RequestRoute,
        "list" => return Ok(SessionLine::List),
        "view" => return Ok(SessionLine::View),
        "help" => return Ok(SessionLine::Help),
        "quit" | "exit" => return Ok(SessionLine::Quit),
        other => bail!("unknown command '{other}'; type 'help'"),
    };
    Ok(SessionLine::Dispatch(command))
}

fn required<'a>(rest: &'a str, verb: &str) -> anyhow::Result<&'a str> {
    if rest.is_empty() {
        bail!("'{verb}' needs an argument");
    }
    Ok(rest)
}

fn optional(rest: &str) -> Option<String> {
    (!rest.is_empty()).then(|| rest.to_string())
}

fn parse_id(rest: &str) -> anyhow::Result<MarkerId> {
    let id = rest
        .parse::<usize>()
        .with_context(|| format!("invalid marker id '{rest}'"))?;
    Ok(MarkerId(id))
}

fn parse_add(rest: &str) -> anyhow::Result<Command> {
    let mut parts = rest.split('|').map(str::trim);
    let address = parts.next().unwrap_or_default();
    let title = parts.next().unwrap_or_default();
    if address.is_empty() || title.is_empty() {
        bail!("usage: add <address> | <title> [| <description>]");
    }
    let description = parts.next().filter(|d| !d.is_empty()).map(str::to_string);
    Ok(Command::AddMarker {
        address: address.to_string(),
        title: title.to_string(),
        description,
    })
}

/// Read commands from stdin until EOF or `quit`.
pub(crate) async fn run<P: MapProvider>(app: &mut AppState<P>, as_json: bool) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("storemap session; type 'help' for commands");

    while let Some(line) = lines.next_line().await? {
        let parsed = match parse_line(&line) {
            Ok(parsed) => parsed,
            Err(err) => {
                eprintln!("error: {err:#}");
                continue;
            }
        };

        match parsed {
            SessionLine::Empty => {}
            SessionLine::Quit => break,
            SessionLine::Help => println!("{HELP}"),
            SessionLine::List => render::print_listing(app, as_json)?,
            SessionLine::View => render::print_view(app, as_json)?,
            SessionLine::Dispatch(command) => {
                let shows_popup = matches!(command, Command::OpenInfo(_));
                let shows_route = matches!(command, Command::RequestRoute);
                app.dispatch(command).await;
                render::print_notifications(app);
                if shows_popup {
                    if let Some(popup) = app.popup() {
                        render::print_popup(popup);
                    }
                }
                if shows_route {
                    render::print_route(app, as_json)?;
                }
            }
        }
    }

    tracing::debug!("session ended");
    Ok(())
}

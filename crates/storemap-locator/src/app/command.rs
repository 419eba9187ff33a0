use storemap_core::{MarkerId, Position};

use super::AppState;
use crate::provider::MapProvider;
use crate::route::Slot;

/// One user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Filter by category key (`"all"` shows everything).
    Filter(String),
    /// Filter from a button caption such as `"Show Bank Stores"`.
    FilterButton(String),
    /// The device reported its position.
    Geolocate(Position),
    /// Submit of the add-marker form.
    AddMarker {
        address: String,
        title: String,
        description: Option<String>,
    },
    /// Click on a listing entry.
    Focus(MarkerId),
    /// Click on a marker.
    OpenInfo(MarkerId),
    /// Click on the map background.
    MapClick,
    /// Change of a route selector; `None` picks the placeholder.
    Select(Slot, Option<String>),
    RequestRoute,
}

impl<P: MapProvider> AppState<P> {
    /// Apply one command. Failures surface as notifications; nothing here is
    /// fatal to the session.
    pub async fn dispatch(&mut self, command: Command) {
        tracing::debug!(?command, "dispatching command");
        match command {
            Command::Filter(key) => self.set_filter(&key),
            Command::FilterButton(label) => self.press_filter_button(&label),
            Command::Geolocate(position) => {
                self.geolocate(position).await;
            }
            Command::AddMarker {
                address,
                title,
                description,
            } => {
                self.add_marker(&address, &title, description.as_deref())
                    .await;
            }
            Command::Focus(id) => {
                if self.focus(id).is_none() {
                    tracing::warn!(id = id.0, "focus requested for unknown marker");
                }
            }
            Command::OpenInfo(id) => {
                if self.open_info(id).is_none() {
                    tracing::warn!(id = id.0, "popup requested for unknown marker");
                }
            }
            Command::MapClick => self.close_info(),
            Command::Select(slot, key) => {
                // Rejections are already queued as notifications.
                let _ = self.select(slot, key.as_deref());
            }
            Command::RequestRoute => {
                self.request_route().await;
            }
        }
    }
}

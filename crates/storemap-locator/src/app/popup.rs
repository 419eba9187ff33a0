//! Info popup content for a marker.

use serde::Serialize;
use storemap_core::{MarkerDetails, MarkerId, MarkerRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PopupContent {
    /// Catalog store location.
    Store {
        icon: Option<String>,
        heading: String,
        message: Option<String>,
        address: String,
        /// Address link target, `None` for the `"#"` placeholder.
        link: Option<String>,
        website: Option<String>,
        /// Caption for the website link: the store category.
        website_label: String,
    },
    /// User-added or geolocated marker.
    Custom {
        title: String,
        address: String,
        description: Option<String>,
    },
}

/// The popup currently open on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenPopup {
    pub marker: MarkerId,
    pub content: PopupContent,
}

impl PopupContent {
    #[must_use]
    pub fn for_record(record: &MarkerRecord) -> Self {
        match &record.details {
            MarkerDetails::Store {
                icon,
                message,
                website,
            } => PopupContent::Store {
                icon: icon.clone(),
                heading: record.label.clone(),
                message: message.clone(),
                address: record.display_address().to_string(),
                link: record.has_link().then(|| record.link.clone()),
                website: website.clone(),
                website_label: record.category.clone(),
            },
            MarkerDetails::Custom { description } => PopupContent::Custom {
                title: record.name.clone(),
                address: record.display_address().to_string(),
                description: description.clone(),
            },
        }
    }

    /// Plain-text rendering, one line per field.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        match self {
            PopupContent::Store {
                icon,
                heading,
                message,
                address,
                link,
                website,
                website_label,
            } => {
                let mut lines = Vec::new();
                if let Some(icon) = icon {
                    lines.push(format!("[{icon}]"));
                }
                lines.push(heading.clone());
                if let Some(message) = message {
                    lines.push(message.clone());
                }
                match link {
                    Some(link) => lines.push(format!("Address: {address} <{link}>")),
                    None => lines.push(format!("Address: {address}")),
                }
                if let Some(website) = website {
                    lines.push(format!("Visit their website: {website_label} <{website}>"));
                }
                lines
            }
            PopupContent::Custom {
                title,
                address,
                description,
            } => {
                let mut lines = vec![title.clone(), format!("Address: {address}")];
                if let Some(description) = description {
                    lines.push(description.clone());
                }
                lines
            }
        }
    }
}

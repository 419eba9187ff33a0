//! Low-level I/O helpers for reading the catalog document.

use std::path::Path;

use crate::error::LocatorError;

/// Perform a GET and return the body text, failing on non-2xx statuses.
pub(crate) async fn fetch_text(
    client: &reqwest::Client,
    url: &str,
    user_agent: &str,
) -> Result<String, LocatorError> {
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, user_agent)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(LocatorError::HttpStatus {
            status: response.status().as_u16(),
            url: url.to_owned(),
        });
    }
    Ok(response.text().await?)
}

/// Read a catalog file from disk.
pub(crate) async fn read_file(path: &Path) -> Result<String, LocatorError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LocatorError::Io {
            path: path.display().to_string(),
            source,
        })
}

//! Remote index client

use crate::application::errors::IndexError;
use crate::domain::traits::KnownRepo;
use reqwest::Client;
use serde::Deserialize;

/// Fetches a published repository index over HTTP.
pub struct RemoteIndex {
    client: Client,
    url: String,
}

/// Published indexes come either as a bare array of entries or as an
/// object wrapping one.
#[derive(Deserialize)]
#[serde(untagged)]
enum IndexPayload {
    List(Vec<KnownRepo>),
    Wrapped { repositories: Vec<KnownRepo> },
}

impl RemoteIndex {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Download and decode the index.
    pub async fn fetch(&self) -> Result<Vec<KnownRepo>, IndexError> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| IndexError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(IndexError::Http(format!("status: {}, body: {}", status, body)));
        }

        let payload: IndexPayload = response
            .json()
            .await
            .map_err(|e| IndexError::Http(format!("Failed to decode index: {}", e)))?;

        Ok(match payload {
            IndexPayload::List(repos) => repos,
            IndexPayload::Wrapped { repositories } => repositories,
        })
    }
}

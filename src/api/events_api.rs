use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::calendar::Event;
use crate::storage::Config;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server returned status {0}")]
    Status(StatusCode),
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    events: Vec<Event>,
}

/// Thin client for the events collection endpoint
/// (`GET/POST/PUT/DELETE` under `/api/events`).
pub struct EventsApi {
    base_url: String,
    client: reqwest::Client,
}

impl EventsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.api.timeout_seconds as u64))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { base_url: config.api.base_url.clone(), client }
    }

    pub async fn fetch_events(&self) -> Result<Vec<Event>, ApiError> {
        let url = format!("{}/api/events", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let body: EventsResponse = response.json().await?;
        tracing::debug!(count = body.events.len(), "fetched events");
        Ok(body.events)
    }

    pub async fn create_event(&self, event: &Event) -> Result<Event, ApiError> {
        let url = format!("{}/api/events", self.base_url);
        let response = self.client.post(&url).json(event).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    pub async fn update_event(&self, event: &Event) -> Result<Event, ApiError> {
        let url = format!("{}/api/events/{}", self.base_url, event.id);
        let response = self.client.put(&url).json(event).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    pub async fn delete_event(&self, event_id: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/events/{}", self.base_url, event_id);
        let response = self.client.delete(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(())
    }
}

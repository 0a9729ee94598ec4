//! Typed client for the outage events API.
//!
//! Two read endpoints are covered: the paginated event list and the feed of
//! outages in progress. Every call issues a fresh request; caching, retries
//! and deadlines are left to the caller.

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use serde::de::DeserializeOwned;
use shared::protocol::{EventListResponse, EventsNowParams, ListEventsParams};
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod error;

pub use config::{ApiConfig, DEFAULT_API_URL};
pub use error::EventsClientError;

const EVENTS_PATH: &str = "/v1/events";
const EVENTS_NOW_PATH: &str = "/v1/events/now";

#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn fetch_events(
        &self,
        params: &ListEventsParams,
    ) -> Result<EventListResponse, EventsClientError>;

    async fn fetch_events_now(
        &self,
        params: &EventsNowParams,
    ) -> Result<EventListResponse, EventsClientError>;
}

#[derive(Debug, Clone)]
pub struct EventsClient {
    http: Client,
    config: ApiConfig,
}

impl EventsClient {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_http(config, Client::new())
    }

    pub fn with_http(config: ApiConfig, http: Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn events_url(&self, params: &ListEventsParams) -> Result<Url, EventsClientError> {
        self.build_url(EVENTS_PATH, &params.query_pairs())
    }

    pub fn events_now_url(&self, params: &EventsNowParams) -> Result<Url, EventsClientError> {
        self.build_url(EVENTS_NOW_PATH, &params.query_pairs())
    }

    fn build_url(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Url, EventsClientError> {
        let path = path.trim_start_matches('/');
        let mut url = Url::parse(&format!("{}/{path}", self.config.base_url()))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, EventsClientError> {
        debug!(%url, "requesting events api");
        let response = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "events api returned error status");
            let body = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(EventsClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl EventsApi for EventsClient {
    async fn fetch_events(
        &self,
        params: &ListEventsParams,
    ) -> Result<EventListResponse, EventsClientError> {
        let url = self.events_url(params)?;
        self.get_json(url).await
    }

    async fn fetch_events_now(
        &self,
        params: &EventsNowParams,
    ) -> Result<EventListResponse, EventsClientError> {
        let url = self.events_now_url(params)?;
        self.get_json(url).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

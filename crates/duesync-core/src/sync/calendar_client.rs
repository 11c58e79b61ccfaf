//! Google Calendar API adapter for the sync engine.
//!
//! Events are tagged with the assignment's external identifier in a private
//! extended property, which Google's list API can filter on server-side;
//! that makes the upsert idempotent across runs and safe to re-run after a
//! partial failure.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::auth::GoogleAuth;
use crate::sync::store::{CalendarStore, EventHandle, EventPayload};
use crate::sync::types::SyncError;

const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Extended-property key carrying the stable external identifier.
pub const EXTERNAL_ID_PROPERTY: &str = "assignment_uid";

/// Google Calendar API client.
pub struct GoogleCalendarStore {
    http: Client,
    auth: GoogleAuth,
    calendar_id: String,
    base_url: String,
}

impl GoogleCalendarStore {
    pub fn new(auth: GoogleAuth, calendar_id: impl Into<String>) -> Self {
        Self::with_base_url(auth, calendar_id, GOOGLE_CALENDAR_API_BASE)
    }

    /// Create a client against a specific API base URL (for testing).
    pub fn with_base_url(
        auth: GoogleAuth,
        calendar_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            auth,
            calendar_id: calendar_id.into(),
            base_url: base_url.into(),
        }
    }

    fn events_url(&self) -> String {
        format!("{}/calendars/{}/events", self.base_url, self.calendar_id)
    }

    async fn check(
        response: reqwest::Response,
        operation: &str,
    ) -> Result<reqwest::Response, SyncError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(SyncError::CalendarApi(format!(
            "{operation} failed ({status}): {body}"
        )))
    }
}

/// Convert an event payload to the Google Calendar wire format.
pub fn to_gcal_event(payload: &EventPayload) -> serde_json::Value {
    json!({
        "summary": payload.summary,
        "start": {"date": payload.start_date.format("%Y-%m-%d").to_string()},
        "end": {"date": payload.end_date.format("%Y-%m-%d").to_string()},
        "description": payload.description,
        "extendedProperties": {
            "private": {
                (EXTERNAL_ID_PROPERTY): payload.external_id,
            }
        }
    })
}

#[derive(Debug, Deserialize)]
struct EventsListResponse {
    #[serde(default)]
    items: Vec<StoredEvent>,
}

#[derive(Debug, Deserialize)]
struct StoredEvent {
    id: String,
}

#[async_trait]
impl CalendarStore for GoogleCalendarStore {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<EventHandle>, SyncError> {
        let token = self.auth.access_token().await?;

        let response = self
            .http
            .get(self.events_url())
            .bearer_auth(&token)
            .query(&[
                (
                    "privateExtendedProperty",
                    format!("{EXTERNAL_ID_PROPERTY}={external_id}"),
                ),
                ("maxResults", "1".to_string()),
                ("fields", "items(id)".to_string()),
            ])
            .send()
            .await?;

        let response = Self::check(response, "event lookup").await?;
        let list: EventsListResponse = response.json().await?;
        Ok(list.items.into_iter().next().map(|e| EventHandle(e.id)))
    }

    async fn insert(&self, payload: &EventPayload) -> Result<EventHandle, SyncError> {
        let token = self.auth.access_token().await?;

        let response = self
            .http
            .post(self.events_url())
            .bearer_auth(&token)
            .json(&to_gcal_event(payload))
            .send()
            .await?;

        let response = Self::check(response, "event insert").await?;
        let stored: StoredEvent = response.json().await?;
        Ok(EventHandle(stored.id))
    }

    async fn update(
        &self,
        handle: &EventHandle,
        payload: &EventPayload,
    ) -> Result<EventHandle, SyncError> {
        let token = self.auth.access_token().await?;
        let url = format!("{}/{}", self.events_url(), handle.0);

        let response = self
            .http
            .put(url)
            .bearer_auth(&token)
            .json(&to_gcal_event(payload))
            .send()
            .await?;

        let response = Self::check(response, "event update").await?;
        let stored: StoredEvent = response.json().await?;
        Ok(EventHandle(stored.id))
    }
}

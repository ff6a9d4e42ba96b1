//! Google Calendar API v3 provider.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use slot_engine::BusyInterval;
use std::collections::BTreeMap;
use tracing::{debug, error, warn};
use url::Url;

use crate::error::{Result, SuggestError};
use crate::provider::{
    CalendarBusy, CalendarEntry, CalendarProvider, FreeBusyQuery, FreeBusyResult,
};
use crate::session::Session;

pub const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Page size requested from the calendar list endpoint.
const CALENDAR_LIST_PAGE_SIZE: &str = "250";

/// Longest response body quoted in an upstream error.
const BODY_SNIPPET_LEN: usize = 512;

/// Google Calendar provider
#[derive(Debug, Clone)]
pub struct GoogleCalendarClient {
    http: Client,
    base_url: String,
}

impl GoogleCalendarClient {
    pub fn new(base_url: &Url) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        context: &'static str,
    ) -> Result<T> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!(%status, context, "Google API rejected the access token");
            return Err(SuggestError::NotAuthenticated);
        }

        let body = response.text().await.map_err(|e| {
            error!(context, error = %e, "failed to read Google API response");
            SuggestError::upstream(context, e.to_string())
        })?;

        if !status.is_success() {
            error!(%status, context, "Google API error");
            return Err(SuggestError::upstream(
                context,
                format!("Google API error ({}): {}", status, snippet(&body)),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(context, error = %e, "unexpected Google API response shape");
            SuggestError::upstream(context, format!("failed to parse Google response: {}", e))
        })
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendarClient {
    async fn list_calendars(&self, session: &Session) -> Result<Vec<CalendarEntry>> {
        let token = session.access_token()?;
        let url = format!("{}/users/me/calendarList", self.base_url);

        let mut calendars = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut query = vec![("maxResults", CALENDAR_LIST_PAGE_SIZE.to_string())];
            if let Some(page) = page_token.take() {
                query.push(("pageToken", page));
            }

            let response = self
                .http
                .get(&url)
                .bearer_auth(token)
                .query(&query)
                .send()
                .await
                .map_err(|e| {
                    error!(error = %e, "Google calendar list request failed");
                    SuggestError::upstream("calendar list", e.to_string())
                })?;

            let page: CalendarListResponse = Self::read_json(response, "calendar list").await?;
            debug!(items = page.items.len(), "fetched calendar list page");
            calendars.extend(page.items);

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        Ok(calendars)
    }

    async fn free_busy(&self, session: &Session, query: &FreeBusyQuery) -> Result<FreeBusyResult> {
        let token = session.access_token()?;
        let url = format!("{}/freeBusy", self.base_url);

        let request = FreeBusyRequest {
            time_min: query.time_min.to_rfc3339(),
            time_max: query.time_max.to_rfc3339(),
            time_zone: &query.time_zone,
            items: query
                .calendar_ids
                .iter()
                .map(|id| FreeBusyItem { id: id.as_str() })
                .collect(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Google free/busy request failed");
                SuggestError::upstream("calendar data", e.to_string())
            })?;

        let answer: FreeBusyResponse = Self::read_json(response, "calendar data").await?;

        let calendars = answer
            .calendars
            .unwrap_or_default()
            .into_iter()
            .map(|(id, cal)| {
                let errors: Vec<String> = cal
                    .errors
                    .into_iter()
                    .map(|e| e.reason.unwrap_or_else(|| "unknown".to_string()))
                    .collect();
                if !errors.is_empty() {
                    warn!(calendar = %id, ?errors, "calendar could not be read");
                }
                (
                    id,
                    CalendarBusy {
                        busy: cal.busy,
                        errors,
                    },
                )
            })
            .collect();

        Ok(calendars)
    }
}

fn snippet(body: &str) -> &str {
    match body.char_indices().nth(BODY_SNIPPET_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarListResponse {
    #[serde(default)]
    items: Vec<CalendarEntry>,
    next_page_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeBusyRequest<'a> {
    time_min: String,
    time_max: String,
    time_zone: &'a str,
    items: Vec<FreeBusyItem<'a>>,
}

#[derive(Debug, Serialize)]
struct FreeBusyItem<'a> {
    id: &'a str,
}

#[derive(Debug, Deserialize)]
struct FreeBusyResponse {
    calendars: Option<BTreeMap<String, GoogleCalendarBusy>>,
}

#[derive(Debug, Deserialize)]
struct GoogleCalendarBusy {
    #[serde(default)]
    busy: Vec<BusyInterval>,
    #[serde(default)]
    errors: Vec<GoogleError>,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    reason: Option<String>,
}

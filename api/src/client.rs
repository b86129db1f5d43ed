use crate::wire::{ErrorBody, EventsResponse, WireEvent};
use crate::{Event, EventGroup, EventList, SetupResult};
use reqwest::Client;
use reqwest::multipart::Form;
use std::fmt;

pub type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Scouting backend client for the setup endpoints.
#[derive(Debug, Clone)]
pub struct ScoutApi {
    client: Client,
    base_url: String,
}

impl Default for ScoutApi {
    fn default() -> Self {
        let base_url = std::env::var("PITCREW_API_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self {
            client: Client::builder()
                .user_agent("pitcrew/0.1 (terminal setup wizard)")
                .build()
                .unwrap_or_default(),
            base_url,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    /// 200 OK envelope whose `status` field was not "success".
    Backend(String),
    /// Non-2xx setup submission; carries the body's `detail` when present.
    Rejected(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Backend(msg) => write!(f, "Backend error: {msg}"),
            ApiError::Rejected(msg) => write!(f, "Setup rejected: {msg}"),
        }
    }
}

impl ScoutApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            ..Self::default()
        }
    }

    /// Fetch the competition events for one season year, flat and grouped
    /// by category. Group order follows the response verbatim.
    pub async fn fetch_events(&self, year: u16) -> ApiResult<EventList> {
        let url = format!("{}/api/setup/events?year={year}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.clone()))?;

        let raw: EventsResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e, url))?;

        if raw.status != "success" {
            return Err(ApiError::Backend(
                raw.message
                    .unwrap_or_else(|| "Failed to load events".to_owned()),
            ));
        }

        Ok(map_event_list(raw))
    }

    /// Submit one setup run. `year` is always sent; `event_key` and
    /// `manual_url` only when present and non-empty.
    pub async fn start_setup(
        &self,
        year: u16,
        event_key: Option<&str>,
        manual_url: Option<&str>,
    ) -> ApiResult<SetupResult> {
        let url = format!("{}/api/setup/start", self.base_url);

        let mut form = Form::new();
        for (name, value) in setup_fields(year, event_key, manual_url) {
            form = form.text(name, value);
        }

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        if !response.status().is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .filter(|d| !d.is_empty());
            return Err(ApiError::Rejected(
                detail.unwrap_or_else(|| "Setup request failed".to_owned()),
            ));
        }

        response
            .json::<SetupResult>()
            .await
            .map_err(|e| ApiError::Parsing(e, url))
    }
}

/// Multipart field list for a setup submission. Pure so the presence rules
/// stay testable: `year` always, the optional fields only when non-empty.
fn setup_fields(
    year: u16,
    event_key: Option<&str>,
    manual_url: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut fields = vec![("year", year.to_string())];
    if let Some(key) = event_key.map(str::trim).filter(|k| !k.is_empty()) {
        fields.push(("event_key", key.to_owned()));
    }
    if let Some(url) = manual_url.map(str::trim).filter(|u| !u.is_empty()) {
        fields.push(("manual_url", url.to_owned()));
    }
    fields
}

// ---------------------------------------------------------------------------
// Mapping: wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_event_list(raw: EventsResponse) -> EventList {
    let events = raw
        .all_events
        .unwrap_or_default()
        .into_iter()
        .map(map_event)
        .collect();

    let groups = raw
        .grouped_events
        .unwrap_or_default()
        .into_iter()
        .map(|(label, events)| EventGroup {
            label,
            events: events.into_iter().map(map_event).collect(),
        })
        .collect();

    EventList { events, groups }
}

fn map_event(w: WireEvent) -> Event {
    Event {
        key: w.key.unwrap_or_default(),
        name: w.name.unwrap_or_default(),
        code: w.code.unwrap_or_default(),
        location: w.location.unwrap_or_default(),
        dates: w.dates.unwrap_or_default(),
        event_type: w.event_type.unwrap_or_default(),
        week: w.week,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn wire_event(key: &str, name: &str, event_type: &str) -> WireEvent {
        WireEvent {
            key: Some(key.to_owned()),
            name: Some(name.to_owned()),
            code: Some(key.trim_start_matches(char::is_numeric).to_owned()),
            location: Some("Anytown, CA".to_owned()),
            dates: Some("Mar 5 - Mar 8".to_owned()),
            event_type: Some(event_type.to_owned()),
            week: Some(1),
        }
    }

    #[test]
    fn setup_fields_year_only_when_optionals_empty() {
        let fields = setup_fields(2024, Some(""), Some("   "));
        assert_eq!(fields, vec![("year", "2024".to_owned())]);
    }

    #[test]
    fn setup_fields_includes_selection_and_url() {
        let fields = setup_fields(2025, Some("2025casj"), Some("https://frc.example/manual.pdf"));
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], ("year", "2025".to_owned()));
        assert_eq!(fields[1], ("event_key", "2025casj".to_owned()));
        assert_eq!(fields[2], ("manual_url", "https://frc.example/manual.pdf".to_owned()));
    }

    #[test]
    fn map_event_list_preserves_group_order() {
        let mut grouped = indexmap::IndexMap::new();
        grouped.insert(
            "Regional".to_owned(),
            vec![wire_event("2024casj", "Silicon Valley Regional", "Regional")],
        );
        grouped.insert(
            "District".to_owned(),
            vec![
                wire_event("2024txwac", "Waco District", "District"),
                wire_event("2024txbel", "Belton District", "District"),
            ],
        );
        let raw = EventsResponse {
            status: "success".to_owned(),
            all_events: Some(vec![
                wire_event("2024casj", "Silicon Valley Regional", "Regional"),
                wire_event("2024txwac", "Waco District", "District"),
                wire_event("2024txbel", "Belton District", "District"),
            ]),
            grouped_events: Some(grouped),
            message: None,
        };

        let list = map_event_list(raw);
        assert_eq!(list.events.len(), 3);
        assert_eq!(list.groups.len(), 2);
        assert_eq!(list.groups[0].label, "Regional");
        assert_eq!(list.groups[1].label, "District");
        assert_eq!(list.groups[1].events[0].key, "2024txwac");
        assert_eq!(list.grouped_len(), 3);
        assert_eq!(list.grouped_get(2).map(|e| e.key.as_str()), Some("2024txbel"));
        assert_eq!(list.name_for("2024casj"), Some("Silicon Valley Regional"));
    }

    #[test]
    fn map_event_list_defaults_to_empty_on_missing_fields() {
        let raw = EventsResponse {
            status: "success".to_owned(),
            all_events: None,
            grouped_events: None,
            message: None,
        };
        let list = map_event_list(raw);
        assert!(list.events.is_empty());
        assert!(list.groups.is_empty());
        assert!(list.grouped_get(0).is_none());
    }

    #[tokio::test]
    async fn fetch_events_success_round_trips_grouping() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "status": "success",
            "all_events": [
                {"key": "2024casj", "name": "Silicon Valley Regional", "code": "casj",
                 "location": "San Jose, CA", "dates": "Mar 5 - Mar 8",
                 "type": "Regional", "week": 1},
                {"key": "2024txwac", "name": "Waco District", "code": "txwac",
                 "location": "Waco, TX", "dates": "Mar 12 - Mar 15",
                 "type": "District", "week": 2}
            ],
            "grouped_events": {
                "Regional": [
                    {"key": "2024casj", "name": "Silicon Valley Regional", "code": "casj",
                     "location": "San Jose, CA", "dates": "Mar 5 - Mar 8",
                     "type": "Regional", "week": 1}
                ],
                "District": [
                    {"key": "2024txwac", "name": "Waco District", "code": "txwac",
                     "location": "Waco, TX", "dates": "Mar 12 - Mar 15",
                     "type": "District", "week": 2}
                ]
            }
        });
        let mock = server
            .mock("GET", "/api/setup/events")
            .match_query(Matcher::UrlEncoded("year".into(), "2024".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let api = ScoutApi::with_base_url(server.url());
        let list = api.fetch_events(2024).await.expect("fetch should succeed");
        mock.assert_async().await;

        assert_eq!(list.events.len(), 2);
        assert_eq!(list.groups[0].label, "Regional");
        assert_eq!(list.groups[1].label, "District");
        assert_eq!(list.events[1].week, Some(2));
    }

    #[tokio::test]
    async fn fetch_events_non_success_status_carries_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/setup/events")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "error", "message": "TBA is unavailable"}"#)
            .create_async()
            .await;

        let api = ScoutApi::with_base_url(server.url());
        let err = api.fetch_events(2025).await.expect_err("should fail");
        match err {
            ApiError::Backend(msg) => assert_eq!(msg, "TBA is unavailable"),
            other => panic!("expected Backend error, got: {other}"),
        }
    }

    #[tokio::test]
    async fn fetch_events_non_success_without_message_uses_fallback() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/setup/events")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "error"}"#)
            .create_async()
            .await;

        let api = ScoutApi::with_base_url(server.url());
        match api.fetch_events(2025).await.expect_err("should fail") {
            ApiError::Backend(msg) => assert_eq!(msg, "Failed to load events"),
            other => panic!("expected Backend error, got: {other}"),
        }
    }

    #[tokio::test]
    async fn fetch_events_http_error_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/setup/events")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let api = ScoutApi::with_base_url(server.url());
        assert!(matches!(
            api.fetch_events(2024).await,
            Err(ApiError::Api(_, _))
        ));
    }

    #[tokio::test]
    async fn start_setup_parses_result_body() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "event_key": "2024casj",
            "game_analysis": {
                "game_name": "Crescendo",
                "field_elements": ["Speaker", "Amp", "Stage", "Source"],
                "scouting_variables": {
                    "autonomous": ["leave", "notes_scored"],
                    "teleop": ["amp_notes", "speaker_notes", "trap"],
                    "endgame": "not-a-list"
                }
            },
            "manual_info": {"text_length": 91234, "analysis_complete": true},
            "sample_teams": [
                {"team_number": 254, "team_name": "The Cheesy Poofs", "epa_total": 42.17},
                {"team_number": 1678, "team_name": "Citrus Circuits"}
            ]
        });
        let _mock = server
            .mock("POST", "/api/setup/start")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let api = ScoutApi::with_base_url(server.url());
        let result = api
            .start_setup(2024, Some("2024casj"), None)
            .await
            .expect("setup should succeed");

        assert_eq!(result.event_key.as_deref(), Some("2024casj"));
        assert_eq!(result.game_analysis.game_name, "Crescendo");
        assert_eq!(result.game_analysis.field_elements.len(), 4);
        let counts = result.game_analysis.variable_counts();
        assert_eq!(counts[0], ("autonomous", 2));
        assert_eq!(counts[1], ("teleop", 3));
        // Non-array category values tally as zero.
        assert_eq!(counts[2], ("endgame", 0));
        assert_eq!(result.sample_teams.len(), 2);
        assert_eq!(result.sample_teams[1].epa_total, None);
    }

    #[tokio::test]
    async fn start_setup_surfaces_rejection_detail_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/setup/start")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail": "bad url"}"#)
            .create_async()
            .await;

        let api = ScoutApi::with_base_url(server.url());
        match api.start_setup(2024, None, Some("nope")).await {
            Err(ApiError::Rejected(msg)) => assert_eq!(msg, "bad url"),
            other => panic!("expected Rejected, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn start_setup_rejection_without_detail_uses_fallback() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/setup/start")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let api = ScoutApi::with_base_url(server.url());
        match api.start_setup(2024, None, None).await {
            Err(ApiError::Rejected(msg)) => assert_eq!(msg, "Setup request failed"),
            other => panic!("expected Rejected, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn start_setup_missing_sample_teams_fails_to_parse() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "event_key": "2024casj",
            "game_analysis": {"game_name": "Crescendo"}
        });
        let _mock = server
            .mock("POST", "/api/setup/start")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let api = ScoutApi::with_base_url(server.url());
        assert!(matches!(
            api.start_setup(2024, Some("2024casj"), None).await,
            Err(ApiError::Parsing(_, _))
        ));
    }
}

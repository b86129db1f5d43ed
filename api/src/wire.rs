/// Setup backend raw wire types — serde shapes for the two setup endpoints.
/// These map to the clean domain types via the mapping functions in client.rs.
use indexmap::IndexMap;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// GET /api/setup/events?year={year}
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EventsResponse {
    /// "success" or an error marker; anything else carries `message`.
    #[serde(default)]
    pub status: String,
    pub all_events: Option<Vec<WireEvent>>,
    /// Category label → events. IndexMap keeps the backend's category order,
    /// which the grouped selector must preserve verbatim.
    pub grouped_events: Option<IndexMap<String, Vec<WireEvent>>>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireEvent {
    pub key: Option<String>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub location: Option<String>,
    pub dates: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub week: Option<u8>,
}

// ---------------------------------------------------------------------------
// POST /api/setup/start — failure body
// ---------------------------------------------------------------------------

/// Non-2xx responses carry a FastAPI-style detail string.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ErrorBody {
    pub detail: Option<String>,
}

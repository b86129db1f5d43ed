pub mod client;
pub mod wire;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the backend wire format
// ---------------------------------------------------------------------------

/// A scouting competition instance for one season.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub key: String,
    pub name: String,
    pub code: String,
    pub location: String,
    /// Display string, e.g. "Mar 5 - Mar 8". Never parsed locally.
    pub dates: String,
    /// Category label, e.g. "Regional", "District", "Championship".
    pub event_type: String,
    pub week: Option<u8>,
}

/// Events bucketed under one category label, in backend order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventGroup {
    pub label: String,
    pub events: Vec<Event>,
}

/// One season's events, flat and grouped. Both views come from the same
/// response and are always replaced together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventList {
    pub events: Vec<Event>,
    pub groups: Vec<EventGroup>,
}

impl EventList {
    /// Look up an event's display name by key.
    pub fn name_for(&self, key: &str) -> Option<&str> {
        self.events
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.name.as_str())
    }

    /// Total entries across all groups (section headers excluded).
    pub fn grouped_len(&self) -> usize {
        self.groups.iter().map(|g| g.events.len()).sum()
    }

    /// The event at a flattened grouped-list position, walking groups in order.
    pub fn grouped_get(&self, index: usize) -> Option<&Event> {
        let mut remaining = index;
        for group in &self.groups {
            if remaining < group.events.len() {
                return group.events.get(remaining);
            }
            remaining -= group.events.len();
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Setup result — returned by POST /api/setup/start
// ---------------------------------------------------------------------------

/// Outcome of a setup run. `game_analysis` and `sample_teams` are required
/// by the backend contract: a 2xx body missing either fails to parse and is
/// surfaced as a submission error instead of a half-rendered summary.
#[derive(Debug, Clone, Deserialize)]
pub struct SetupResult {
    #[serde(default)]
    pub event_key: Option<String>,
    pub game_analysis: GameAnalysis,
    #[serde(default)]
    pub manual_info: Option<ManualInfo>,
    pub sample_teams: Vec<SampleTeam>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameAnalysis {
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub field_elements: Vec<String>,
    /// Category label → entries. Values that are not arrays count as zero
    /// entries when tallied.
    #[serde(default)]
    pub scouting_variables: IndexMap<String, serde_json::Value>,
}

impl GameAnalysis {
    /// Entry count per category, in backend order.
    pub fn variable_counts(&self) -> Vec<(&str, usize)> {
        self.scouting_variables
            .iter()
            .map(|(label, value)| {
                let count = value.as_array().map(Vec::len).unwrap_or(0);
                (label.as_str(), count)
            })
            .collect()
    }
}

/// How the backend processed the game manual. Every field is optional on
/// the wire; an absent or empty record classifies as an unknown outcome.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManualInfo {
    #[serde(default)]
    pub no_manual_warning: bool,
    #[serde(default)]
    pub using_cached_manual: bool,
    #[serde(default)]
    pub analysis_method: Option<String>,
    #[serde(default)]
    pub analysis_error: Option<String>,
    #[serde(default)]
    pub text_length: u64,
    #[serde(default)]
    pub analysis_complete: bool,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleTeam {
    pub team_number: u32,
    #[serde(default)]
    pub team_name: String,
    /// EPA estimate; shown to one decimal place, "N/A" when absent.
    #[serde(default)]
    pub epa_total: Option<f64>,
}

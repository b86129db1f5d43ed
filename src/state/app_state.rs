use crate::app::MenuItem;
use chrono::Local;
use scout_api::{Event, EventList, SetupResult};

/// Seasons selectable in the wizard, newest first. The first entry is the
/// default on launch.
pub const SEASONS: [u16; 3] = [2026, 2025, 2024];

// ---------------------------------------------------------------------------
// Focus — which control keystrokes land on
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Year,
    Events,
    ManualUrl,
    Submit,
    Archive,
    Sheets,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Year,
        Focus::Events,
        Focus::ManualUrl,
        Focus::Submit,
        Focus::Archive,
        Focus::Sheets,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

// ---------------------------------------------------------------------------
// Setup phase — the form/result state machine, made explicit
// ---------------------------------------------------------------------------

/// One tagged variant instead of result/error/loading nullability: the
/// result view renders iff `Complete`, everything else is the form.
#[derive(Debug, Default)]
pub enum SetupPhase {
    #[default]
    Idle,
    Submitting,
    Complete(Box<SetupResult>),
    Failed(String),
}

impl SetupPhase {
    pub fn result(&self) -> Option<&SetupResult> {
        match self {
            SetupPhase::Complete(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SetupPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SetupPhase::Submitting)
    }
}

// ---------------------------------------------------------------------------
// Wizard state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct WizardState {
    pub year: u16,
    /// Monotonic event-fetch counter; responses tagged with an older seq
    /// are discarded so a slow stale fetch can never overwrite a newer one.
    pub fetch_seq: u64,
    pub list: EventList,
    pub events_loading: bool,
    pub events_error: Option<String>,
    /// Index into the flattened grouped list, None = no selection.
    pub selected: Option<usize>,
    pub manual_url: String,
    pub editing_url: bool,
    pub phase: SetupPhase,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            year: SEASONS[0],
            fetch_seq: 0,
            list: EventList::default(),
            events_loading: false,
            events_error: None,
            selected: None,
            manual_url: String::new(),
            editing_url: false,
            phase: SetupPhase::Idle,
        }
    }
}

impl WizardState {
    /// Arm a new event fetch: bump the sequence, raise the loading flag,
    /// clear any stale inline error. Returns the seq to tag the request with.
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.events_loading = true;
        self.events_error = None;
        self.fetch_seq
    }

    /// Step to the next/previous season. Clears the event selection; the
    /// caller issues the matching fetch.
    pub fn cycle_year(&mut self, step: i8) {
        let idx = SEASONS.iter().position(|y| *y == self.year).unwrap_or(0);
        let len = SEASONS.len() as i8;
        let next = (idx as i8 + step).rem_euclid(len) as usize;
        self.year = SEASONS[next];
        self.selected = None;
    }

    /// Store a fetch result. Both views are replaced together; a response
    /// from a superseded request is ignored.
    pub fn apply_events(&mut self, seq: u64, list: EventList) -> bool {
        if seq != self.fetch_seq {
            return false;
        }
        self.events_loading = false;
        self.events_error = None;
        self.list = list;
        if let Some(idx) = self.selected
            && idx >= self.list.grouped_len()
        {
            self.selected = None;
        }
        true
    }

    /// Record a fetch failure. Prior events stay untouched (stale-on-error).
    pub fn apply_events_error(&mut self, seq: u64, message: String) -> bool {
        if seq != self.fetch_seq {
            return false;
        }
        self.events_loading = false;
        self.events_error = Some(message);
        true
    }

    pub fn select_down(&mut self) {
        let len = self.list.grouped_len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(idx) => (idx + 1).min(len - 1),
            None => 0,
        });
    }

    pub fn select_up(&mut self) {
        if let Some(idx) = self.selected {
            self.selected = Some(idx.saturating_sub(1));
        }
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.list.grouped_get(self.selected?)
    }

    /// The event key the side panels operate on: current selection when
    /// present, else the key the setup result came back with.
    pub fn effective_event_key(&self) -> Option<&str> {
        self.selected_event()
            .map(|e| e.key.as_str())
            .or_else(|| self.phase.result().and_then(|r| r.event_key.as_deref()))
    }

    /// Submission is blocked while an event fetch or a submit is in flight.
    pub fn can_submit(&self) -> bool {
        !self.events_loading && !self.phase.is_submitting()
    }

    pub fn manual_url_trimmed(&self) -> Option<&str> {
        let url = self.manual_url.trim();
        (!url.is_empty()).then_some(url)
    }
}

// ---------------------------------------------------------------------------
// Result view + management panel state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ResultViewState {
    pub scroll_offset: u16,
}

/// Display state for the embedded archive manager. The manager itself is
/// external; this records what it last reported, for the panel body.
#[derive(Debug, Default)]
pub struct ArchivePanelState {
    pub last_action: Option<String>,
}

impl ArchivePanelState {
    pub fn record(&mut self, what: &str) {
        self.last_action = Some(format!("{} {}", Local::now().format("%H:%M"), what));
    }
}

#[derive(Debug, Default)]
pub struct SheetsPanelState {
    pub last_change: Option<String>,
}

impl SheetsPanelState {
    pub fn record_change(&mut self) {
        self.last_change = Some(Local::now().format("%H:%M").to_string());
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub focus: Focus,
    pub wizard: WizardState,
    pub result_view: ResultViewState,
    pub archive: ArchivePanelState,
    pub sheets: SheetsPanelState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_api::EventGroup;

    fn event(key: &str, event_type: &str) -> Event {
        Event {
            key: key.to_owned(),
            name: format!("Event {key}"),
            event_type: event_type.to_owned(),
            ..Default::default()
        }
    }

    fn list_of(groups: Vec<(&str, Vec<Event>)>) -> EventList {
        let events = groups
            .iter()
            .flat_map(|(_, evts)| evts.iter().cloned())
            .collect();
        EventList {
            events,
            groups: groups
                .into_iter()
                .map(|(label, events)| EventGroup { label: label.to_owned(), events })
                .collect(),
        }
    }

    #[test]
    fn cycle_year_walks_the_fixed_set_and_clears_selection() {
        let mut wizard = WizardState::default();
        wizard.selected = Some(2);
        assert_eq!(wizard.year, SEASONS[0]);

        wizard.cycle_year(1);
        assert_eq!(wizard.year, SEASONS[1]);
        assert_eq!(wizard.selected, None);

        wizard.cycle_year(1);
        wizard.cycle_year(1);
        assert_eq!(wizard.year, SEASONS[0], "cycling wraps around");

        wizard.cycle_year(-1);
        assert_eq!(wizard.year, SEASONS[2]);
    }

    #[test]
    fn apply_events_replaces_both_views_together() {
        let mut wizard = WizardState::default();
        let seq = wizard.begin_fetch();
        assert!(wizard.events_loading);

        let list = list_of(vec![("Regional", vec![event("2024casj", "Regional")])]);
        assert!(wizard.apply_events(seq, list.clone()));
        assert!(!wizard.events_loading);
        assert_eq!(wizard.list, list);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut wizard = WizardState::default();
        let stale_seq = wizard.begin_fetch();
        let fresh_seq = wizard.begin_fetch();

        let fresh = list_of(vec![("District", vec![event("2025txwac", "District")])]);
        assert!(wizard.apply_events(fresh_seq, fresh.clone()));

        let stale = list_of(vec![("Regional", vec![event("2024casj", "Regional")])]);
        assert!(!wizard.apply_events(stale_seq, stale));
        assert_eq!(wizard.list, fresh, "stale fetch must not overwrite");

        assert!(!wizard.apply_events_error(stale_seq, "late failure".to_owned()));
        assert_eq!(wizard.events_error, None);
    }

    #[test]
    fn fetch_failure_keeps_prior_events() {
        let mut wizard = WizardState::default();
        let seq = wizard.begin_fetch();
        let list = list_of(vec![("Regional", vec![event("2024casj", "Regional")])]);
        assert!(wizard.apply_events(seq, list.clone()));

        let seq = wizard.begin_fetch();
        assert!(wizard.apply_events_error(seq, "TBA is unavailable".to_owned()));
        assert_eq!(wizard.list, list);
        assert_eq!(wizard.events_error.as_deref(), Some("TBA is unavailable"));
        assert!(!wizard.events_loading);
    }

    #[test]
    fn selection_moves_over_the_flattened_grouped_list() {
        let mut wizard = WizardState::default();
        let seq = wizard.begin_fetch();
        wizard.apply_events(
            seq,
            list_of(vec![
                ("Regional", vec![event("2024casj", "Regional")]),
                (
                    "District",
                    vec![event("2024txwac", "District"), event("2024txbel", "District")],
                ),
            ]),
        );

        assert_eq!(wizard.selected_event(), None);
        wizard.select_down();
        assert_eq!(wizard.selected_event().map(|e| e.key.as_str()), Some("2024casj"));
        wizard.select_down();
        assert_eq!(wizard.selected_event().map(|e| e.key.as_str()), Some("2024txwac"));
        wizard.select_down();
        wizard.select_down();
        assert_eq!(
            wizard.selected_event().map(|e| e.key.as_str()),
            Some("2024txbel"),
            "selection clamps at the end"
        );
        wizard.select_up();
        assert_eq!(wizard.selected_event().map(|e| e.key.as_str()), Some("2024txwac"));
    }

    #[test]
    fn effective_key_prefers_selection_then_result() {
        let mut wizard = WizardState::default();
        assert_eq!(wizard.effective_event_key(), None);

        wizard.phase = SetupPhase::Complete(Box::new(SetupResult {
            event_key: Some("2024from_result".to_owned()),
            game_analysis: Default::default(),
            manual_info: None,
            sample_teams: Vec::new(),
        }));
        assert_eq!(wizard.effective_event_key(), Some("2024from_result"));

        let seq = wizard.begin_fetch();
        wizard.apply_events(
            seq,
            list_of(vec![("Regional", vec![event("2024casj", "Regional")])]),
        );
        wizard.select_down();
        assert_eq!(wizard.effective_event_key(), Some("2024casj"));
    }

    #[test]
    fn submission_is_blocked_while_a_fetch_is_in_flight() {
        let mut wizard = WizardState::default();
        assert!(wizard.can_submit());
        wizard.begin_fetch();
        assert!(!wizard.can_submit());

        let mut wizard = WizardState::default();
        wizard.phase = SetupPhase::Submitting;
        assert!(!wizard.can_submit());
    }

    #[test]
    fn manual_url_is_trimmed_and_empty_means_absent() {
        let mut wizard = WizardState::default();
        assert_eq!(wizard.manual_url_trimmed(), None);
        wizard.manual_url = "   ".to_owned();
        assert_eq!(wizard.manual_url_trimmed(), None);
        wizard.manual_url = "  https://frc.example/manual.pdf ".to_owned();
        assert_eq!(wizard.manual_url_trimmed(), Some("https://frc.example/manual.pdf"));
    }
}

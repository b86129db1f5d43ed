use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use scout_api::{EventList, SetupResult};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    /// Fetch the event list for one season. `seq` tags the request so the
    /// app can discard responses superseded by a later year change.
    LoadEvents { year: u16, seq: u64 },
    StartSetup {
        year: u16,
        event_key: Option<String>,
        manual_url: Option<String>,
    },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    EventsLoaded { seq: u64, list: EventList },
    /// Event fetch failed; prior events stay on screen, the selector shows
    /// the message inline.
    EventsFailed { seq: u64, message: String },
    SetupComplete { result: Box<SetupResult> },
    SetupFailed { message: String },
}

/// Completion notifications from the embedded management panels. One typed
/// event set instead of per-panel callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerEvent {
    ArchiveSuccess,
    RestoreSuccess,
    ConfigurationChange,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    Manager(ManagerEvent),
}

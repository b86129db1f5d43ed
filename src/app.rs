use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, Focus, SetupPhase};
use crate::state::messages::{ManagerEvent, NetworkRequest};
use log::info;
use scout_api::{EventList, SetupResult};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    SetupWizard,
    FieldMap,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_events_loaded(&mut self, seq: u64, list: EventList) {
        if !self.state.wizard.apply_events(seq, list) {
            info!("discarding superseded event fetch (seq {seq})");
        }
    }

    pub fn on_events_failed(&mut self, seq: u64, message: String) {
        if !self.state.wizard.apply_events_error(seq, message) {
            info!("discarding superseded event fetch failure (seq {seq})");
        }
    }

    pub fn on_setup_complete(&mut self, result: SetupResult) {
        self.state.wizard.phase = SetupPhase::Complete(Box::new(result));
        self.state.result_view.scroll_offset = 0;
    }

    pub fn on_setup_failed(&mut self, message: String) {
        self.state.wizard.phase = SetupPhase::Failed(message);
    }

    /// Completion notifications from the embedded management panels.
    /// Archive success drops the result back to the form; restore success
    /// is a full reload: wizard state reset plus a fresh event fetch.
    pub fn on_manager_event(&mut self, event: ManagerEvent) -> Option<NetworkRequest> {
        match event {
            ManagerEvent::ArchiveSuccess => {
                self.state.wizard.phase = SetupPhase::Idle;
                self.state.archive.record("archived");
                None
            }
            ManagerEvent::RestoreSuccess => {
                self.state.archive.record("restored");
                self.state.wizard = Default::default();
                self.state.result_view.scroll_offset = 0;
                Some(self.begin_event_fetch())
            }
            ManagerEvent::ConfigurationChange => {
                info!("sheet configuration changed");
                self.state.sheets.record_change();
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Wizard actions — called from keys.rs; returned requests go on the wire
    // -----------------------------------------------------------------------

    /// Issue one event fetch for the current season.
    pub fn begin_event_fetch(&mut self) -> NetworkRequest {
        let year = self.state.wizard.year;
        let seq = self.state.wizard.begin_fetch();
        NetworkRequest::LoadEvents { year, seq }
    }

    /// Step the season selector. Each change clears the event selection and
    /// triggers exactly one fetch for the new year.
    pub fn cycle_year(&mut self, step: i8) -> NetworkRequest {
        self.state.wizard.cycle_year(step);
        self.begin_event_fetch()
    }

    /// Build and arm a setup submission, or None while one is blocked.
    pub fn submit_setup(&mut self) -> Option<NetworkRequest> {
        if !self.state.wizard.can_submit() {
            return None;
        }
        let request = NetworkRequest::StartSetup {
            year: self.state.wizard.year,
            event_key: self
                .state
                .wizard
                .selected_event()
                .map(|e| e.key.clone()),
            manual_url: self.state.wizard.manual_url_trimmed().map(str::to_owned),
        };
        self.state.wizard.phase = SetupPhase::Submitting;
        Some(request)
    }

    /// Continue past the summary to the next setup step.
    pub fn continue_to_field_map(&mut self) {
        if self.state.wizard.phase.result().is_some() {
            self.update_tab(MenuItem::FieldMap);
        }
    }

    // -----------------------------------------------------------------------
    // Tab and focus management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn focus_next(&mut self) {
        self.state.focus = self.state.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.state.focus = self.state.focus.prev();
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // URL editing
    // -----------------------------------------------------------------------

    pub fn start_url_edit(&mut self) {
        self.state.focus = Focus::ManualUrl;
        self.state.wizard.editing_url = true;
    }

    pub fn stop_url_edit(&mut self) {
        self.state.wizard.editing_url = false;
    }

    pub fn url_push(&mut self, c: char) {
        self.state.wizard.manual_url.push(c);
    }

    pub fn url_pop(&mut self) {
        self.state.wizard.manual_url.pop();
    }
}

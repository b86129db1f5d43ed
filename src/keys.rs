use crate::app::{App, MenuItem};
use crate::state::app_state::Focus;
use crate::state::messages::{ManagerEvent, NetworkRequest, UiEvent};
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    ui_events: &mpsc::Sender<UiEvent>,
) {
    let mut guard = app.lock().await;
    let mut request: Option<NetworkRequest> = None;
    let mut manager_event: Option<ManagerEvent> = None;

    // URL editing captures everything except Enter/Esc.
    if guard.state.wizard.editing_url {
        match key_event.code {
            KeyCode::Enter | KeyCode::Esc => guard.stop_url_edit(),
            KeyCode::Backspace => guard.url_pop(),
            Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                guard.url_push(c);
            }
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, guard.state.focus, key_event.code) {
        // Quit
        (_, _, Char('q')) => quit(),
        (_, _, Char('c')) if key_event.modifiers == KeyModifiers::CONTROL => quit(),

        // Tabs and help
        (_, _, Char('1')) => guard.update_tab(MenuItem::SetupWizard),
        (_, _, Char('2')) => guard.update_tab(MenuItem::FieldMap),
        (_, _, Char('?')) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, _, KeyCode::Esc) => guard.exit_help(),

        // Focus cycling across the form and the side panels
        (MenuItem::SetupWizard, _, KeyCode::Tab) => guard.focus_next(),
        (MenuItem::SetupWizard, _, KeyCode::BackTab) => guard.focus_prev(),

        // Season selector
        (MenuItem::SetupWizard, Focus::Year, Char('l') | KeyCode::Right) => {
            request = Some(guard.cycle_year(1));
        }
        (MenuItem::SetupWizard, Focus::Year, Char('h') | KeyCode::Left) => {
            request = Some(guard.cycle_year(-1));
        }

        // Result view: Enter/c continues to the field-mapping step, j/k
        // scrolls the summary. These arms outrank the form bindings below.
        (MenuItem::SetupWizard, _, KeyCode::Enter | Char('c'))
            if guard.state.wizard.phase.result().is_some() =>
        {
            guard.continue_to_field_map();
        }
        (MenuItem::SetupWizard, _, Char('j') | KeyCode::Down)
            if guard.state.wizard.phase.result().is_some() =>
        {
            guard.state.result_view.scroll_offset =
                guard.state.result_view.scroll_offset.saturating_add(1);
        }
        (MenuItem::SetupWizard, _, Char('k') | KeyCode::Up)
            if guard.state.wizard.phase.result().is_some() =>
        {
            guard.state.result_view.scroll_offset =
                guard.state.result_view.scroll_offset.saturating_sub(1);
        }

        // Event selector
        (MenuItem::SetupWizard, Focus::Events, Char('j') | KeyCode::Down) => {
            guard.state.wizard.select_down();
        }
        (MenuItem::SetupWizard, Focus::Events, Char('k') | KeyCode::Up) => {
            guard.state.wizard.select_up();
        }

        // Manual URL field
        (MenuItem::SetupWizard, Focus::ManualUrl, KeyCode::Enter | Char('i')) => {
            guard.start_url_edit();
        }

        // Submission — unreachable from the result view (guards above).
        (MenuItem::SetupWizard, Focus::Submit, KeyCode::Enter) => {
            request = guard.submit_setup();
        }
        (MenuItem::SetupWizard, _, Char('s'))
            if guard.state.wizard.phase.result().is_none() =>
        {
            request = guard.submit_setup();
        }

        // Archive manager panel: archive the current event / restore one.
        // The manager runs its own flow; we only see the completion events.
        (MenuItem::SetupWizard, Focus::Archive, Char('a')) => {
            manager_event = Some(ManagerEvent::ArchiveSuccess);
        }
        (MenuItem::SetupWizard, Focus::Archive, Char('o')) => {
            manager_event = Some(ManagerEvent::RestoreSuccess);
        }

        // Sheet configuration panel
        (MenuItem::SetupWizard, Focus::Sheets, Char('g')) => {
            manager_event = Some(ManagerEvent::ConfigurationChange);
        }

        // Global
        (_, _, Char('f')) => guard.toggle_full_screen(),
        (_, _, Char('"')) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);

    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
    if let Some(event) = manager_event {
        let _ = ui_events.send(UiEvent::Manager(event)).await;
    }
}

fn quit() -> ! {
    crate::cleanup_terminal();
    std::process::exit(0);
}

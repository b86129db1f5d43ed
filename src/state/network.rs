use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use scout_api::client::{ApiError, ScoutApi};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Runs the two backend calls off the UI loop. Requests are handled one at
/// a time; every request produces exactly one typed response, so the
/// loading flag drops on every exit path.
pub struct NetworkWorker {
    client: ScoutApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: ScoutApi::new(),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let (response, is_ok) = match request {
                NetworkRequest::LoadEvents { year, seq } => self.handle_load_events(year, seq).await,
                NetworkRequest::StartSetup { year, event_key, manual_url } => {
                    self.handle_start_setup(year, event_key, manual_url).await
                }
            };

            debug!("network request complete");
            self.stop_loading_animation(is_ok).await;

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_events(&self, year: u16, seq: u64) -> (NetworkResponse, bool) {
        debug!("loading events for season {year} (seq {seq})");
        match self.client.fetch_events(year).await {
            Ok(list) => (NetworkResponse::EventsLoaded { seq, list }, true),
            Err(err) => {
                error!("event fetch failed: {err}");
                let message = events_error_message(&err);
                (NetworkResponse::EventsFailed { seq, message }, false)
            }
        }
    }

    async fn handle_start_setup(
        &self,
        year: u16,
        event_key: Option<String>,
        manual_url: Option<String>,
    ) -> (NetworkResponse, bool) {
        debug!(
            "starting setup: year {year}, event {}, manual {}",
            event_key.as_deref().unwrap_or("-"),
            manual_url.as_deref().unwrap_or("-")
        );
        match self
            .client
            .start_setup(year, event_key.as_deref(), manual_url.as_deref())
            .await
        {
            Ok(result) => (
                NetworkResponse::SetupComplete { result: Box::new(result) },
                true,
            ),
            Err(err) => {
                error!("setup submission failed: {err}");
                let message = setup_error_message(&err);
                (NetworkResponse::SetupFailed { message }, false)
            }
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

/// Inline text for the event selector: backend envelope messages verbatim,
/// transport and parse problems as a generic line (details go to the log).
fn events_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Backend(message) => message.clone(),
        _ => "Failed to load events".to_owned(),
    }
}

/// Banner text for a failed submission: rejection details verbatim,
/// connectivity problems as a generic line.
fn setup_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Rejected(message) => message.clone(),
        ApiError::Network(_, _) => "Could not connect to the scouting backend".to_owned(),
        _ => "Setup request failed".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_passes_through_for_event_fetches() {
        let err = ApiError::Backend("TBA is unavailable".to_owned());
        assert_eq!(events_error_message(&err), "TBA is unavailable");
    }

    #[test]
    fn backend_detail_passes_through_for_setup() {
        let err = ApiError::Rejected("bad url".to_owned());
        assert_eq!(setup_error_message(&err), "bad url");
    }

    #[test]
    fn other_setup_errors_are_generic() {
        let err = ApiError::Backend("internal".to_owned());
        assert_eq!(setup_error_message(&err), "Setup request failed");
    }
}

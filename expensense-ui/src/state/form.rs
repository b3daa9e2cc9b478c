//! Form State
//!
//! Reactive state shared by the form glue. One instance is created at
//! start-up and cloned into every event handler.

use leptos::*;
use std::rc::Rc;

use expensense::{ClientConfig, InFlight, LoadState, RequestSequence, RequestTicket};

/// State shared by the receipt scanner and the team selector
#[derive(Clone)]
pub struct FormState {
    /// Page configuration, CSRF token included
    pub config: Rc<ClientConfig>,
    /// Receipt OCR lifecycle
    pub ocr: RwSignal<LoadState>,
    /// Team lookup lifecycle
    pub teams: RwSignal<LoadState>,
    /// Whether the blocking loader is shown
    pub loader_visible: RwSignal<bool>,
    /// Inline message under the receipt input
    pub notice: RwSignal<Option<String>>,
    uploads: Rc<InFlight>,
    ocr_sequence: Rc<RequestSequence>,
    team_sequence: Rc<RequestSequence>,
}

impl FormState {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config: Rc::new(config),
            ocr: create_rw_signal(LoadState::Idle),
            teams: create_rw_signal(LoadState::Idle),
            loader_visible: create_rw_signal(false),
            notice: create_rw_signal(None),
            uploads: Rc::new(InFlight::new()),
            ocr_sequence: Rc::new(RequestSequence::new()),
            team_sequence: Rc::new(RequestSequence::new()),
        }
    }

    /// Mark an upload as started and show the loader
    pub fn begin_upload(&self) -> RequestTicket {
        if self.uploads.enter() {
            self.loader_visible.set(true);
        }
        self.notice.set(None);
        self.ocr.set(LoadState::Loading);
        self.ocr_sequence.begin()
    }

    /// Settle an upload. Returns false, and changes nothing but the loader,
    /// when a newer upload has started since `ticket` was issued.
    pub fn finish_upload(&self, ticket: RequestTicket, outcome: Result<(), String>) -> bool {
        if self.uploads.leave() {
            self.loader_visible.set(false);
        }

        if !self.ocr_sequence.is_current(ticket) {
            return false;
        }

        match outcome {
            Ok(()) => self.ocr.set(LoadState::Succeeded),
            Err(message) => {
                self.show_error(&message);
                self.ocr.set(LoadState::Failed(message));
            }
        }
        true
    }

    /// Whether `ticket` is still the latest upload
    pub fn is_current_upload(&self, ticket: RequestTicket) -> bool {
        self.ocr_sequence.is_current(ticket)
    }

    /// Mark a team lookup as started
    pub fn begin_team_lookup(&self) -> RequestTicket {
        self.teams.set(LoadState::Loading);
        self.team_sequence.begin()
    }

    /// Whether `ticket` is still the latest team lookup
    pub fn is_current_team_lookup(&self, ticket: RequestTicket) -> bool {
        self.team_sequence.is_current(ticket)
    }

    /// Show an inline error (auto-clears after the configured timeout)
    pub fn show_error(&self, message: &str) {
        self.notice.set(Some(message.to_string()));

        let notice = self.notice;
        let shown = message.to_string();
        gloo_timers::callback::Timeout::new(self.config.notices.error_timeout_ms, move || {
            // A newer message owns its own timeout
            if notice.get_untracked().as_deref() == Some(shown.as_str()) {
                notice.set(None);
            }
        })
        .forget();
    }
}

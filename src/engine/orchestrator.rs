use log::{debug, info, warn};

use crate::engine::dispatcher::{AlertOutcome, DirectiveDispatcher};
use crate::engine::error::ApiError;
use crate::engine::game_client::GameApi;
use crate::engine::reconciler::HistoryReconciler;
use crate::engine::word_fill::parse_word_fill_form;
use crate::model::game_view::GameView;
use crate::model::payloads::{GuessOutcome, SubmitResponse};
use crate::model::prompt::PromptInput;

/// Result of a write the player triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    Accepted,
    /// The server refused the value; the message is shown next to the input.
    Rejected(String),
    /// The request never completed. Only the disconnected indicator shows it.
    Unreachable,
    /// Refused locally, e.g. the prompt was replaced in the meantime.
    Discarded,
}

/// Owns all poll state: the current view, the history table and the
/// prompt session. Only one cycle or action runs at a time because every
/// method takes `&mut self`.
pub struct PollOrchestrator<A: GameApi> {
    api: A,
    reconciler: HistoryReconciler,
    dispatcher: DirectiveDispatcher,
    view: GameView,
    broadcasts: Vec<String>,
}

impl<A: GameApi> PollOrchestrator<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            reconciler: HistoryReconciler::new(),
            dispatcher: DirectiveDispatcher::new(),
            view: GameView::default(),
            broadcasts: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Snapshot of everything the UI draws.
    pub fn view(&self) -> GameView {
        GameView {
            history: self.reconciler.rows().to_vec(),
            prompt: self.dispatcher.session().cloned(),
            client_addr: self.reconciler.client_addr().map(str::to_string),
            ..self.view.clone()
        }
    }

    /// Broadcast texts received since the last call.
    pub fn take_broadcasts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.broadcasts)
    }

    /// One poll cycle. Steps run in a fixed order and stop at the first
    /// failure; the cycle succeeds only if all of them did.
    pub fn run_cycle(&mut self) -> bool {
        let success = self.refresh_word()
            && self.refresh_history()
            && self.refresh_percentage()
            && self.refresh_letters()
            && self.refresh_alert();

        if success != self.view.connected {
            if success {
                info!("connected to game server");
            } else {
                warn!("lost connection to game server");
            }
        }
        self.view.connected = success;
        self.view.cycles += 1;
        success
    }

    pub fn guess_letter(&mut self, letter: char) -> Option<GuessOutcome> {
        let outcome = match self.api.guess_letter(letter) {
            Ok(outcome) => {
                debug!("guess '{}': {} {}", letter, outcome.title(), outcome.message);
                Some(outcome)
            }
            Err(e) => {
                warn!("{}", e);
                None
            }
        };
        self.run_cycle();
        outcome
    }

    pub fn choose_word(&mut self, word: &str) -> SubmitStatus {
        let status = submit_status(self.api.choose_word(word));
        self.run_cycle();
        status
    }

    pub fn submit_prompt(&mut self, session_id: u64, input: PromptInput) -> SubmitStatus {
        let response = match self.dispatcher.collect(session_id, input) {
            Ok(response) => response,
            Err(e) => {
                warn!("prompt #{} not submitted: {}", session_id, e);
                return SubmitStatus::Discarded;
            }
        };

        let status = submit_status(self.api.submit_response(
            &response.target_url,
            &response.field,
            &response.value,
        ));
        match &status {
            SubmitStatus::Accepted => self.dispatcher.accepted(session_id),
            SubmitStatus::Rejected(message) => self.dispatcher.rejected(session_id, message.clone()),
            SubmitStatus::Unreachable | SubmitStatus::Discarded => {}
        }

        self.run_cycle();
        status
    }

    pub fn dismiss_prompt(&mut self, session_id: u64) {
        self.dispatcher.dismiss(session_id);
    }

    fn refresh_word(&mut self) -> bool {
        match self.api.blanked_word() {
            Ok(word) => {
                self.view.blanked = word.blanked;
                self.view.word_length = word.length;
                true
            }
            Err(e) => step_failed(e),
        }
    }

    fn refresh_history(&mut self) -> bool {
        match self.api.game_info() {
            Ok(info) => {
                self.reconciler.apply(&info.round);
                self.view.waiting_for_word = info.waiting_for_word;
                true
            }
            Err(e) => step_failed(e),
        }
    }

    fn refresh_percentage(&mut self) -> bool {
        match self.api.guess_percentage() {
            Ok(percentage) => {
                self.view.percentage = percentage.clamp(0.0, 100.0);
                true
            }
            Err(e) => step_failed(e),
        }
    }

    fn refresh_letters(&mut self) -> bool {
        match self.api.extant_letters() {
            Ok(letters) => {
                self.view.letters = letters;
                true
            }
            Err(e) => step_failed(e),
        }
    }

    fn refresh_alert(&mut self) -> bool {
        let alert = match self.api.latest_alert() {
            Ok(alert) => alert,
            Err(e) => return step_failed(e),
        };

        match self.dispatcher.on_alert(&alert) {
            AlertOutcome::Broadcast(text) => self.broadcasts.push(text),
            AlertOutcome::Opened { session_id, mode } => {
                info!("server opened {} prompt #{}", mode, session_id)
            }
            AlertOutcome::Unchanged | AlertOutcome::Idle => {}
        }

        if self.dispatcher.needs_form() {
            self.load_word_fill_form();
        }
        true
    }

    // Not one of the five poll steps: a failure leaves the session waiting
    // and the next cycle tries again.
    fn load_word_fill_form(&mut self) {
        match self.api.word_fill_form() {
            Ok(markup) => self.dispatcher.attach_form(parse_word_fill_form(&markup)),
            Err(e) => warn!("word-fill form unavailable: {}", e),
        }
    }
}

fn step_failed(e: ApiError) -> bool {
    warn!("{}", e);
    false
}

fn submit_status(result: Result<SubmitResponse, ApiError>) -> SubmitStatus {
    match result {
        Ok(resp) if resp.success => SubmitStatus::Accepted,
        Ok(resp) => SubmitStatus::Rejected(resp.error),
        Err(e) => {
            warn!("{}", e);
            SubmitStatus::Unreachable
        }
    }
}

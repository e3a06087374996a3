use log::{debug, warn};

use crate::engine::directive_parser::parse_alert;
use crate::engine::error::DispatchError;
use crate::model::directive::{DirectiveCall, ParsedAlert};
use crate::model::prompt::{
    PromptArgs, PromptInput, PromptMode, PromptResponse, PromptSession, WordFillForm,
};

/// What a polled alert did to the prompt state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    /// Byte-equal to the alert already handled.
    Unchanged,
    /// No prompt is active any more (empty alert, or directives without a prompt).
    Idle,
    /// Plain text to show as a server broadcast; any prompt was closed.
    Broadcast(String),
    /// A new session replaced whatever was active.
    Opened { session_id: u64, mode: &'static str },
}

/// Turns alert strings into at most one active [`PromptSession`] and
/// resolves the player's input into a write request.
#[derive(Debug, Default)]
pub struct DirectiveDispatcher {
    last_alert: Option<String>,
    session: Option<PromptSession>,
    opened: u64,
}

impl DirectiveDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&PromptSession> {
        self.session.as_ref()
    }

    pub fn on_alert(&mut self, alert: &str) -> AlertOutcome {
        if self.last_alert.as_deref() == Some(alert) {
            return AlertOutcome::Unchanged;
        }

        let parsed = parse_alert(alert);
        self.last_alert = match parsed {
            // Forget the alert so a later identical prompt opens again.
            ParsedAlert::Empty => None,
            _ => Some(alert.to_string()),
        };

        match parsed {
            ParsedAlert::Empty => {
                self.close("alert cleared");
                AlertOutcome::Idle
            }
            ParsedAlert::Broadcast(text) => {
                self.close("broadcast received");
                AlertOutcome::Broadcast(text)
            }
            ParsedAlert::Directives(calls) => match last_prompt(&calls) {
                Some(args) => {
                    self.opened += 1;
                    let session = PromptSession::open(self.opened, args);
                    let mode = session.mode.name();
                    debug!(
                        "opening {} prompt #{} '{}' -> {}",
                        mode, session.id, session.args.title, session.args.target_url
                    );
                    self.session = Some(session);
                    AlertOutcome::Opened {
                        session_id: self.opened,
                        mode,
                    }
                }
                None => {
                    self.close("alert carries no prompt");
                    AlertOutcome::Idle
                }
            },
        }
    }

    /// True while a word-fill session is waiting for its form markup.
    pub fn needs_form(&self) -> bool {
        matches!(
            self.session,
            Some(PromptSession { mode: PromptMode::WordFill { form: None }, .. })
        )
    }

    pub fn attach_form(&mut self, form: WordFillForm) {
        if let Some(PromptSession { mode: PromptMode::WordFill { form: slot }, .. }) = &mut self.session {
            *slot = Some(form);
        }
    }

    /// Resolve the player's input against the active session.
    pub fn collect(&self, session_id: u64, input: PromptInput) -> Result<PromptResponse, DispatchError> {
        let session = self.active(session_id)?;

        let value = match (&session.mode, input) {
            (PromptMode::FreeText { .. }, PromptInput::Text(text)) => text,
            (PromptMode::Choice { .. }, PromptInput::Choice(label)) => label.to_lowercase(),
            (PromptMode::WordFill { form: None }, PromptInput::WordFill(_)) => {
                return Err(DispatchError::FormNotLoaded)
            }
            (PromptMode::WordFill { form: Some(form) }, PromptInput::WordFill(values)) => {
                form.assemble(&values).ok_or(DispatchError::BlankCountMismatch {
                    expected: form.blank_count(),
                    got: values.len(),
                })?
            }
            (mode, input) => {
                return Err(DispatchError::ModeMismatch {
                    input: input_name(&input),
                    mode: mode.name(),
                })
            }
        };

        Ok(PromptResponse {
            session_id,
            target_url: session.args.target_url.clone(),
            field: session.args.field.clone(),
            value,
        })
    }

    /// The server accepted the response: the session ends.
    pub fn accepted(&mut self, session_id: u64) {
        if self.active(session_id).is_ok() {
            self.session = None;
        }
    }

    /// The server refused the response: keep the session and show why.
    pub fn rejected(&mut self, session_id: u64, message: String) {
        if let Some(session) = self.session.as_mut().filter(|s| s.id == session_id) {
            session.error = Some(message);
        }
    }

    /// Closed locally by the player. The alert stays remembered so the same
    /// alert does not reopen it on the next poll.
    pub fn dismiss(&mut self, session_id: u64) {
        if self.active(session_id).is_ok() {
            self.close("dismissed");
        }
    }

    fn active(&self, session_id: u64) -> Result<&PromptSession, DispatchError> {
        match &self.session {
            None => Err(DispatchError::NoActiveSession),
            Some(s) if s.id != session_id => Err(DispatchError::StaleSession {
                submitted: session_id,
                active: s.id,
            }),
            Some(s) => Ok(s),
        }
    }

    fn close(&mut self, reason: &str) {
        if let Some(session) = self.session.take() {
            debug!("closing prompt #{}: {}", session.id, reason);
        }
    }
}

fn last_prompt(calls: &[DirectiveCall]) -> Option<PromptArgs> {
    let mut found = None;
    for call in calls {
        if call.name != "prompt" {
            debug!("ignoring unknown directive %{}", call.name);
            continue;
        }
        match PromptArgs::from_call(call) {
            Some(args) => found = Some(args),
            None => warn!(
                "ignoring %prompt with {} arguments (expected {})",
                call.args.len(),
                PromptArgs::ARITY
            ),
        }
    }
    found
}

fn input_name(input: &PromptInput) -> &'static str {
    match input {
        PromptInput::Text(_) => "text",
        PromptInput::Choice(_) => "choice",
        PromptInput::WordFill(_) => "word-fill",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::prompt::WordFillPart;

    const TEXT_PROMPT: &str = "%prompt(Number of letters in word, /setWordLength, length, Length, number)";
    const CHOICE_PROMPT: &str = "%prompt(Computer Guesses: E, /setLetterInWord, in_word, Is E In Your Word?, choice)";
    const FILL_PROMPT: &str = "%prompt(Letter's Location in Word, /setWordLocations, word, Where is E?, wordFill)";

    fn opened_id(outcome: AlertOutcome) -> u64 {
        match outcome {
            AlertOutcome::Opened { session_id, .. } => session_id,
            other => panic!("expected a prompt to open, got {:?}", other),
        }
    }

    #[test]
    fn prompt_alert_opens_free_text_session() {
        let mut dispatcher = DirectiveDispatcher::new();
        let id = opened_id(dispatcher.on_alert(TEXT_PROMPT));

        let session = dispatcher.session().unwrap();
        assert_eq!(session.id, id);
        assert_eq!(session.args.title, "Number of letters in word");
        assert_eq!(session.mode, PromptMode::FreeText { input_type: "number".into() });
    }

    #[test]
    fn identical_alert_is_a_no_op() {
        let mut dispatcher = DirectiveDispatcher::new();
        let id = opened_id(dispatcher.on_alert(TEXT_PROMPT));

        assert_eq!(dispatcher.on_alert(TEXT_PROMPT), AlertOutcome::Unchanged);
        assert_eq!(dispatcher.session().unwrap().id, id);
    }

    #[test]
    fn identical_alert_does_not_reopen_dismissed_session() {
        let mut dispatcher = DirectiveDispatcher::new();
        let id = opened_id(dispatcher.on_alert(CHOICE_PROMPT));

        dispatcher.dismiss(id);
        assert!(dispatcher.session().is_none());

        assert_eq!(dispatcher.on_alert(CHOICE_PROMPT), AlertOutcome::Unchanged);
        assert!(dispatcher.session().is_none());
    }

    #[test]
    fn new_alert_supersedes_active_session() {
        let mut dispatcher = DirectiveDispatcher::new();
        let first = opened_id(dispatcher.on_alert(TEXT_PROMPT));
        let second = opened_id(dispatcher.on_alert(CHOICE_PROMPT));

        assert!(second > first);
        assert!(matches!(dispatcher.session().unwrap().mode, PromptMode::Choice { .. }));
    }

    #[test]
    fn empty_alert_closes_and_forgets() {
        let mut dispatcher = DirectiveDispatcher::new();
        let first = opened_id(dispatcher.on_alert(TEXT_PROMPT));

        assert_eq!(dispatcher.on_alert(""), AlertOutcome::Idle);
        assert!(dispatcher.session().is_none());

        // Same prompt in a later round opens a fresh session.
        let second = opened_id(dispatcher.on_alert(TEXT_PROMPT));
        assert_ne!(first, second);
    }

    #[test]
    fn repeated_empty_alerts_stay_idle() {
        let mut dispatcher = DirectiveDispatcher::new();
        assert_eq!(dispatcher.on_alert(""), AlertOutcome::Idle);
        assert_eq!(dispatcher.on_alert(""), AlertOutcome::Idle);
        assert!(dispatcher.session().is_none());
    }

    #[test]
    fn broadcast_closes_session() {
        let mut dispatcher = DirectiveDispatcher::new();
        dispatcher.on_alert(TEXT_PROMPT);

        let outcome = dispatcher.on_alert("Computer won! The word was 'otter'.");
        assert_eq!(
            outcome,
            AlertOutcome::Broadcast("Computer won! The word was 'otter'.".into())
        );
        assert!(dispatcher.session().is_none());
    }

    #[test]
    fn unknown_directives_and_bad_arity_are_ignored() {
        let mut dispatcher = DirectiveDispatcher::new();

        assert_eq!(dispatcher.on_alert("%confetti(red, blue)"), AlertOutcome::Idle);
        assert_eq!(dispatcher.on_alert("%prompt(a, /b, c, d)"), AlertOutcome::Idle);
        assert!(dispatcher.session().is_none());
    }

    #[test]
    fn free_text_value_is_verbatim() {
        let mut dispatcher = DirectiveDispatcher::new();
        let id = opened_id(dispatcher.on_alert(TEXT_PROMPT));

        let response = dispatcher.collect(id, PromptInput::Text(" 7 ".into())).unwrap();
        assert_eq!(response.target_url, "/setWordLength");
        assert_eq!(response.field, "length");
        assert_eq!(response.value, " 7 ");
    }

    #[test]
    fn choice_value_is_lowercased_label() {
        let mut dispatcher = DirectiveDispatcher::new();
        let id = opened_id(dispatcher.on_alert(CHOICE_PROMPT));

        let response = dispatcher.collect(id, PromptInput::Choice("Yes".into())).unwrap();
        assert_eq!(response.field, "in_word");
        assert_eq!(response.value, "yes");
    }

    #[test]
    fn word_fill_needs_form_before_collecting() {
        let mut dispatcher = DirectiveDispatcher::new();
        let id = opened_id(dispatcher.on_alert(FILL_PROMPT));

        assert!(dispatcher.needs_form());
        assert_eq!(
            dispatcher.collect(id, PromptInput::WordFill(vec![])),
            Err(DispatchError::FormNotLoaded)
        );

        dispatcher.attach_form(WordFillForm {
            parts: vec![
                WordFillPart::Fixed("o".into()),
                WordFillPart::Blank { width: 2, default: "--".into() },
                WordFillPart::Fixed("er".into()),
            ],
        });
        assert!(!dispatcher.needs_form());

        let response = dispatcher.collect(id, PromptInput::WordFill(vec!["tt".into()])).unwrap();
        assert_eq!(response.value, "otter");

        let untouched = dispatcher.collect(id, PromptInput::WordFill(vec![String::new()])).unwrap();
        assert_eq!(untouched.value, "o--er");
    }

    #[test]
    fn mismatched_or_stale_input_is_refused() {
        let mut dispatcher = DirectiveDispatcher::new();
        assert_eq!(
            dispatcher.collect(1, PromptInput::Text("x".into())),
            Err(DispatchError::NoActiveSession)
        );

        let id = opened_id(dispatcher.on_alert(TEXT_PROMPT));
        assert!(matches!(
            dispatcher.collect(id, PromptInput::Choice("Yes".into())),
            Err(DispatchError::ModeMismatch { .. })
        ));
        assert!(matches!(
            dispatcher.collect(id + 1, PromptInput::Text("x".into())),
            Err(DispatchError::StaleSession { .. })
        ));
    }

    #[test]
    fn rejection_keeps_session_and_acceptance_ends_it() {
        let mut dispatcher = DirectiveDispatcher::new();
        let id = opened_id(dispatcher.on_alert(TEXT_PROMPT));

        dispatcher.rejected(id, "Length too short!".into());
        let session = dispatcher.session().unwrap();
        assert_eq!(session.error.as_deref(), Some("Length too short!"));
        assert!(matches!(session.mode, PromptMode::FreeText { .. }));

        dispatcher.accepted(id);
        assert!(dispatcher.session().is_none());
        assert_eq!(dispatcher.on_alert(TEXT_PROMPT), AlertOutcome::Unchanged);
    }
}

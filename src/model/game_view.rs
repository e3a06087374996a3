use crate::model::history::HistoryEntry;
use crate::model::prompt::PromptSession;

/// Everything the UI draws, published by the engine after each poll cycle.
/// This is READ-ONLY outside the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameView {
    pub blanked: String,
    pub word_length: u32,

    /// Share of the incorrect-guess budget already used, 0-100.
    pub percentage: f32,

    /// Letters nobody has guessed yet, lower-case.
    pub letters: Vec<char>,

    pub history: Vec<HistoryEntry>,

    /// Outcome of the most recent poll cycle.
    pub connected: bool,
    pub waiting_for_word: bool,
    pub prompt: Option<PromptSession>,

    /// Address the server says this client connects from.
    pub client_addr: Option<String>,
    pub cycles: u64,
}

impl GameView {
    pub fn is_letter_available(&self, letter: char) -> bool {
        self.letters.contains(&letter.to_ascii_lowercase())
    }
}

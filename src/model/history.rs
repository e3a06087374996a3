use crate::model::round::{RoundResult, RoundSnapshot, LEVEL_UNBOUNDED, SCORE_UNSET};

/// A rendered row of the round history table.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub level: String,
    pub word: String,
    pub result: RoundResult,
    pub score: String,

    /// Set when a newer round showed up before this one was finalized.
    pub abandoned: bool,
}

impl HistoryEntry {
    pub fn from_snapshot(snapshot: &RoundSnapshot) -> Self {
        Self {
            level: snapshot.level.display(LEVEL_UNBOUNDED),
            word: display_word(&snapshot.word),
            result: snapshot.result,
            score: snapshot.score.display(SCORE_UNSET),
            abandoned: false,
        }
    }

    pub fn is_ongoing(&self) -> bool {
        self.result.is_ongoing() && !self.abandoned
    }

    pub fn result_label(&self) -> &'static str {
        if self.abandoned {
            "(unknown)"
        } else {
            self.result.label()
        }
    }
}

pub fn display_word(word: &str) -> String {
    if word.is_empty() {
        "TBD".to_string()
    } else {
        word.to_string()
    }
}

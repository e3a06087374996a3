use log::debug;

use crate::model::history::HistoryEntry;
use crate::model::round::{RoundSnapshot, LEVEL_UNBOUNDED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// The server's round counter restarted: table cleared, then appended.
    Reset,
    Append,
    /// The ongoing last row was finalized in place.
    ReplaceLast,
    NoOp,
}

/// Keeps the history table consistent with an at-least-once stream of
/// round snapshots. The same index may arrive several times, first
/// ongoing and then finalized; it only ever produces one row.
#[derive(Debug, Default)]
pub struct HistoryReconciler {
    rows: Vec<HistoryEntry>,
    last_index: Option<u64>,
    client_addr: Option<String>,
}

impl HistoryReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[HistoryEntry] {
        &self.rows
    }

    #[cfg(test)]
    pub fn last_index(&self) -> Option<u64> {
        self.last_index
    }

    pub fn client_addr(&self) -> Option<&str> {
        self.client_addr.as_deref()
    }

    pub fn apply(&mut self, snapshot: &RoundSnapshot) -> ReconcileAction {
        let action = match self.last_index {
            Some(0) if self.restarted_at_zero(snapshot) => self.reset(snapshot),
            Some(last) if snapshot.index == last => self.finalize_last(snapshot),
            Some(last) if snapshot.index > last => self.append(snapshot),
            Some(_) if snapshot.index == 0 => self.reset(snapshot),
            Some(_) => ReconcileAction::NoOp,
            None => self.append(snapshot),
        };

        if action != ReconcileAction::NoOp {
            debug!(
                "history {:?} at index {} ({} rows)",
                action,
                snapshot.index,
                self.rows.len()
            );
            if !snapshot.ip_addr.is_empty() {
                self.client_addr = Some(snapshot.ip_addr.clone());
            }
        }
        action
    }

    // A finished round never turns ongoing again, so an ongoing round 0 on
    // top of a finished round 0 comes from a restarted server.
    fn restarted_at_zero(&self, snapshot: &RoundSnapshot) -> bool {
        snapshot.index == 0
            && snapshot.result.is_ongoing()
            && self.rows.last().is_some_and(|row| !row.is_ongoing())
    }

    fn reset(&mut self, snapshot: &RoundSnapshot) -> ReconcileAction {
        self.rows.clear();
        self.append(snapshot);
        ReconcileAction::Reset
    }

    fn append(&mut self, snapshot: &RoundSnapshot) -> ReconcileAction {
        // A newer round means the previous one will never be finalized for us.
        if let Some(last) = self.rows.last_mut().filter(|row| row.is_ongoing()) {
            last.abandoned = true;
        }
        self.rows.push(HistoryEntry::from_snapshot(snapshot));
        self.last_index = Some(snapshot.index);
        ReconcileAction::Append
    }

    fn finalize_last(&mut self, snapshot: &RoundSnapshot) -> ReconcileAction {
        let Some(last) = self.rows.last_mut() else {
            return ReconcileAction::NoOp;
        };
        if !last.is_ongoing() || snapshot.result.is_ongoing() {
            return ReconcileAction::NoOp;
        }

        let mut finalized = HistoryEntry::from_snapshot(snapshot);
        // Finalized broadcasts may omit the level the ongoing one carried.
        if snapshot.level.is_sentinel(LEVEL_UNBOUNDED) {
            finalized.level = last.level.clone();
        }
        *last = finalized;
        ReconcileAction::ReplaceLast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::round::{ReportedValue, RoundResult, SCORE_UNSET};

    fn snapshot(index: u64, result: RoundResult) -> RoundSnapshot {
        RoundSnapshot {
            index,
            ip_addr: "192.168.1.20".into(),
            result,
            level: ReportedValue::Number(2),
            word: String::new(),
            score: ReportedValue::Number(10),
        }
    }

    #[test]
    fn ongoing_then_finalized_collapses_into_one_row() {
        let mut history = HistoryReconciler::new();

        assert_eq!(history.apply(&snapshot(0, RoundResult::Ongoing)), ReconcileAction::Append);
        let mut won = snapshot(0, RoundResult::Won);
        won.word = "otter".into();
        assert_eq!(history.apply(&won), ReconcileAction::ReplaceLast);

        assert_eq!(history.rows().len(), 1);
        assert_eq!(history.rows()[0].result, RoundResult::Won);
        assert_eq!(history.rows()[0].word, "otter");
    }

    #[test]
    fn repeated_polls_do_not_duplicate_rows() {
        let mut history = HistoryReconciler::new();

        history.apply(&snapshot(0, RoundResult::Ongoing));
        assert_eq!(history.apply(&snapshot(0, RoundResult::Ongoing)), ReconcileAction::NoOp);
        history.apply(&snapshot(0, RoundResult::Lost));
        assert_eq!(history.apply(&snapshot(0, RoundResult::Lost)), ReconcileAction::NoOp);

        assert_eq!(history.rows().len(), 1);
    }

    #[test]
    fn stale_snapshot_is_ignored() {
        let mut history = HistoryReconciler::new();
        history.apply(&snapshot(3, RoundResult::Won));
        history.apply(&snapshot(5, RoundResult::Ongoing));
        let before = history.rows().to_vec();

        assert_eq!(history.apply(&snapshot(4, RoundResult::Won)), ReconcileAction::NoOp);
        assert_eq!(history.rows(), before.as_slice());
        assert_eq!(history.last_index(), Some(5));
    }

    #[test]
    fn index_zero_after_history_resets_table() {
        let mut history = HistoryReconciler::new();
        history.apply(&snapshot(1, RoundResult::Won));
        history.apply(&snapshot(2, RoundResult::Lost));
        history.apply(&snapshot(3, RoundResult::Ongoing));

        assert_eq!(history.apply(&snapshot(0, RoundResult::Ongoing)), ReconcileAction::Reset);
        assert_eq!(history.rows().len(), 1);
        assert_eq!(history.last_index(), Some(0));
    }

    #[test]
    fn ongoing_zero_after_finished_zero_is_a_restart() {
        let mut history = HistoryReconciler::new();
        history.apply(&snapshot(0, RoundResult::Ongoing));
        let mut won = snapshot(0, RoundResult::Won);
        won.word = "otter".into();
        history.apply(&won);

        assert_eq!(history.apply(&snapshot(0, RoundResult::Ongoing)), ReconcileAction::Reset);
        assert_eq!(history.rows().len(), 1);
        assert!(history.rows()[0].is_ongoing());

        // The restarted round can still be finalized.
        assert_eq!(history.apply(&snapshot(0, RoundResult::Lost)), ReconcileAction::ReplaceLast);
        assert_eq!(history.rows()[0].result, RoundResult::Lost);
        assert_eq!(history.rows().len(), 1);
    }

    #[test]
    fn finalized_row_keeps_level_when_update_lacks_one() {
        let mut history = HistoryReconciler::new();
        history.apply(&snapshot(4, RoundResult::Ongoing));

        let mut finished = snapshot(4, RoundResult::Won);
        finished.level = ReportedValue::Number(LEVEL_UNBOUNDED);
        history.apply(&finished);

        assert_eq!(history.rows()[0].level, "2");
        assert_eq!(history.rows()[0].result, RoundResult::Won);
    }

    #[test]
    fn finalized_row_is_never_replaced_again() {
        let mut history = HistoryReconciler::new();
        history.apply(&snapshot(1, RoundResult::Ongoing));
        history.apply(&snapshot(1, RoundResult::Won));

        assert_eq!(history.apply(&snapshot(1, RoundResult::Lost)), ReconcileAction::NoOp);
        assert_eq!(history.rows()[0].result, RoundResult::Won);
    }

    #[test]
    fn at_most_one_ongoing_row() {
        let mut history = HistoryReconciler::new();
        history.apply(&snapshot(1, RoundResult::Ongoing));
        history.apply(&snapshot(2, RoundResult::Ongoing));

        let ongoing: Vec<_> = history.rows().iter().filter(|r| r.is_ongoing()).collect();
        assert_eq!(ongoing.len(), 1);
        assert!(history.rows()[1].is_ongoing());
        assert_eq!(history.rows()[0].result_label(), "(unknown)");
    }

    #[test]
    fn sentinels_render_as_placeholders() {
        let mut history = HistoryReconciler::new();
        let mut snap = snapshot(0, RoundResult::Ongoing);
        snap.level = ReportedValue::Number(LEVEL_UNBOUNDED);
        snap.score = ReportedValue::Number(SCORE_UNSET);
        history.apply(&snap);

        let row = &history.rows()[0];
        assert_eq!(row.level, "N/A");
        assert_eq!(row.score, "N/A");
        assert_eq!(row.word, "TBD");
        assert_eq!(history.client_addr(), Some("192.168.1.20"));
    }
}

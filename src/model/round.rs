use serde::{Deserialize, Serialize};

/// Level the server reports when the current mode has no level.
pub const LEVEL_UNBOUNDED: i64 = 1_000_000_000;

/// Score the server reports before a score exists.
pub const SCORE_UNSET: i64 = -1_000_000_000;

/// Outcome of a round as reported by the server (-1 / 0 / 1 on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum RoundResult {
    Ongoing,
    Lost,
    Won,
}

impl TryFrom<i64> for RoundResult {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(RoundResult::Ongoing),
            0 => Ok(RoundResult::Lost),
            1 => Ok(RoundResult::Won),
            other => Err(format!("unknown round result {}", other)),
        }
    }
}

impl From<RoundResult> for i64 {
    fn from(result: RoundResult) -> Self {
        match result {
            RoundResult::Ongoing => -1,
            RoundResult::Lost => 0,
            RoundResult::Won => 1,
        }
    }
}

impl RoundResult {
    pub fn is_ongoing(self) -> bool {
        self == RoundResult::Ongoing
    }

    pub fn label(self) -> &'static str {
        match self {
            RoundResult::Ongoing => "(ongoing)",
            RoundResult::Lost => "Lost",
            RoundResult::Won => "Won",
        }
    }
}

/// A level or score field. The server normally sends integers, with a
/// sentinel for "not applicable", but a pre-rendered string is accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportedValue {
    Number(i64),
    Text(String),
}

impl ReportedValue {
    pub fn is_sentinel(&self, sentinel: i64) -> bool {
        match self {
            ReportedValue::Number(n) => *n == sentinel,
            ReportedValue::Text(t) => t == "N/A",
        }
    }

    pub fn display(&self, sentinel: i64) -> String {
        match self {
            _ if self.is_sentinel(sentinel) => "N/A".to_string(),
            ReportedValue::Number(n) => n.to_string(),
            ReportedValue::Text(t) => t.clone(),
        }
    }
}

/// One `/getGameInfo` poll describing the current (or just finished) round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub index: u64,
    #[serde(default)]
    pub ip_addr: String,
    pub result: RoundResult,
    pub level: ReportedValue,
    #[serde(default)]
    pub word: String,
    pub score: ReportedValue,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameInfo {
    #[serde(flatten)]
    pub round: RoundSnapshot,
    #[serde(rename = "waitingForWord", default)]
    pub waiting_for_word: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_game_info() {
        let json = r#"{"level":1000000000, "index": 3, "result": -1, "word": "", "ip_addr": "10.0.0.7", "waitingForWord": true, "score": -1000000000}"#;
        let info: GameInfo = serde_json::from_str(json).unwrap();

        assert_eq!(info.round.index, 3);
        assert_eq!(info.round.result, RoundResult::Ongoing);
        assert_eq!(info.round.ip_addr, "10.0.0.7");
        assert!(info.waiting_for_word);
        assert!(info.round.level.is_sentinel(LEVEL_UNBOUNDED));
        assert!(info.round.score.is_sentinel(SCORE_UNSET));
    }

    #[test]
    fn rejects_unknown_result_code() {
        let json = r#"{"level":1, "index": 0, "result": 7, "word": "", "score": 0}"#;
        assert!(serde_json::from_str::<RoundSnapshot>(json).is_err());
    }

    #[test]
    fn sentinel_values_display_as_not_applicable() {
        assert_eq!(ReportedValue::Number(LEVEL_UNBOUNDED).display(LEVEL_UNBOUNDED), "N/A");
        assert_eq!(ReportedValue::Number(SCORE_UNSET).display(SCORE_UNSET), "N/A");
        assert_eq!(ReportedValue::Number(4).display(LEVEL_UNBOUNDED), "4");
        assert_eq!(ReportedValue::Text("N/A".into()).display(SCORE_UNSET), "N/A");
    }
}

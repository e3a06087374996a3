//! Response bodies of the game server's endpoints.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlankedWord {
    pub blanked: String,
    pub length: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LatestAlert {
    #[serde(default)]
    pub alert: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtantLetters {
    pub letters: Vec<String>,
}

impl ExtantLetters {
    pub fn chars(&self) -> Vec<char> {
        self.letters
            .iter()
            .filter_map(|l| l.chars().next())
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GuessPercentage {
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub percentage: f32,
}

/// Body of `/chooseWord` and of every directive target.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub error: String,
}

/// Body of `/guessLetter`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GuessOutcome {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl GuessOutcome {
    pub fn title(&self) -> &'static str {
        if self.error {
            "Error!"
        } else if self.success {
            "Correct!"
        } else {
            "Incorrect!"
        }
    }

    pub fn is_positive(&self) -> bool {
        self.success && !self.error
    }
}

// The server formats the percentage with printf and quotes it.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(t) => t
            .trim()
            .parse::<f32>()
            .map_err(|e| serde::de::Error::custom(format!("bad percentage {:?}: {}", t, e))),
    }
}

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::engine::error::ApiError;
use crate::model::payloads::{
    BlankedWord, ExtantLetters, GuessOutcome, GuessPercentage, LatestAlert, SubmitResponse,
};
use crate::model::round::GameInfo;

/// The game server's endpoints as the engine uses them.
pub trait GameApi {
    fn blanked_word(&mut self) -> Result<BlankedWord, ApiError>;
    fn game_info(&mut self) -> Result<GameInfo, ApiError>;
    fn guess_percentage(&mut self) -> Result<f32, ApiError>;
    fn extant_letters(&mut self) -> Result<Vec<char>, ApiError>;
    fn latest_alert(&mut self) -> Result<String, ApiError>;
    fn word_fill_form(&mut self) -> Result<String, ApiError>;

    fn guess_letter(&mut self, letter: char) -> Result<GuessOutcome, ApiError>;
    fn choose_word(&mut self, word: &str) -> Result<SubmitResponse, ApiError>;
    /// Send a directive response to `target`, a path on the game server.
    fn submit_response(&mut self, target: &str, field: &str, value: &str) -> Result<SubmitResponse, ApiError>;
}

pub struct HttpGameApi {
    client: Client,
    base: Url,
}

impl HttpGameApi {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base = Url::parse(server_url).map_err(|e| ApiError::InvalidUrl {
            url: server_url.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| transport("client setup", e))?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = resolve_target(&self.base, path)?;
        if !params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<reqwest::blocking::Response, ApiError> {
        let url = self.endpoint(path, params)?;
        self.client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| transport(path, e))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T, ApiError> {
        self.get(path, params)?.json::<T>().map_err(|e| ApiError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }
}

impl GameApi for HttpGameApi {
    fn blanked_word(&mut self) -> Result<BlankedWord, ApiError> {
        self.get_json("/getBlankedWord", &[])
    }

    fn game_info(&mut self) -> Result<GameInfo, ApiError> {
        self.get_json("/getGameInfo", &[])
    }

    fn guess_percentage(&mut self) -> Result<f32, ApiError> {
        self.get_json::<GuessPercentage>("/guessPercentage", &[])
            .map(|p| p.percentage)
    }

    fn extant_letters(&mut self) -> Result<Vec<char>, ApiError> {
        self.get_json::<ExtantLetters>("/getExtantLetters", &[])
            .map(|l| l.chars())
    }

    fn latest_alert(&mut self) -> Result<String, ApiError> {
        self.get_json::<LatestAlert>("/getLatestAlert", &[])
            .map(|a| a.alert)
    }

    fn word_fill_form(&mut self) -> Result<String, ApiError> {
        let path = "/getWordFillForm";
        self.get(path, &[])?.text().map_err(|e| ApiError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }

    fn guess_letter(&mut self, letter: char) -> Result<GuessOutcome, ApiError> {
        // The server reads the letter as a decimal character code.
        let code = (letter as u32).to_string();
        self.get_json("/guessLetter", &[("letter", &code)])
    }

    fn choose_word(&mut self, word: &str) -> Result<SubmitResponse, ApiError> {
        self.get_json("/chooseWord", &[("word", word)])
    }

    fn submit_response(&mut self, target: &str, field: &str, value: &str) -> Result<SubmitResponse, ApiError> {
        self.get_json(target, &[(field, value)])
    }
}

/// Join `target` onto the server URL, refusing anything that would leave
/// the server's origin.
pub fn resolve_target(base: &Url, target: &str) -> Result<Url, ApiError> {
    let url = base.join(target).map_err(|e| ApiError::InvalidUrl {
        url: target.to_string(),
        reason: e.to_string(),
    })?;
    if url.origin() != base.origin() {
        return Err(ApiError::ForeignTarget(target.to_string()));
    }
    Ok(url)
}

fn transport(endpoint: &str, e: reqwest::Error) -> ApiError {
    if e.is_decode() {
        ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        }
    } else {
        ApiError::Transport {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        }
    }
}

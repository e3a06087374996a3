use crate::engine::orchestrator::SubmitStatus;
use crate::model::game_view::GameView;
use crate::model::payloads::GuessOutcome;
use crate::model::prompt::PromptInput;

pub enum EngineCommand {
    GuessLetter(char),
    ChooseWord(String),
    SubmitPrompt { session_id: u64, input: PromptInput },
    DismissPrompt { session_id: u64 },
    RefreshNow,
    Shutdown,
}

pub enum EngineResponse {
    View(GameView),
    Broadcast(String),

    /// `None` when the guess never reached the server.
    GuessResult(Option<GuessOutcome>),

    WordChosen(SubmitStatus),

    PromptSubmitted {
        session_id: u64,
        status: SubmitStatus,
    },
}

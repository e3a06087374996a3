use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::engine::game_client::GameApi;
use crate::engine::orchestrator::PollOrchestrator;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::ticker::Ticker;

/// Runs on its own thread. Poll cycles and player commands execute one at
/// a time here, so the orchestrator's state never sees two writers.
pub struct Engine<A: GameApi> {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    orchestrator: PollOrchestrator<A>,
    ticker: Ticker,
}

impl<A: GameApi> Engine<A> {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        api: A,
        interval: Duration,
    ) -> Self {
        Self {
            rx,
            tx,
            orchestrator: PollOrchestrator::new(api),
            ticker: Ticker::new(interval, Instant::now()),
        }
    }

    pub fn run(&mut self) {
        info!("engine started, polling every {:?}", self.ticker.interval());
        if !self.refresh() {
            return;
        }

        loop {
            let wait = self.ticker.time_until_next(Instant::now());
            match self.rx.recv_timeout(wait) {
                Ok(EngineCommand::Shutdown) => break,
                Ok(cmd) => {
                    if !self.handle(cmd) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    if !self.refresh() {
                        break;
                    }
                    let skipped = self.ticker.complete(Instant::now());
                    if skipped > 0 {
                        debug!("poll cycle overran, skipped {} tick(s)", skipped);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        info!("engine stopped");
    }

    /// Returns `false` once the UI side has hung up.
    fn handle(&mut self, cmd: EngineCommand) -> bool {
        let response = match cmd {
            EngineCommand::GuessLetter(letter) => {
                EngineResponse::GuessResult(self.orchestrator.guess_letter(letter))
            }
            EngineCommand::ChooseWord(word) => {
                EngineResponse::WordChosen(self.orchestrator.choose_word(&word))
            }
            EngineCommand::SubmitPrompt { session_id, input } => EngineResponse::PromptSubmitted {
                session_id,
                status: self.orchestrator.submit_prompt(session_id, input),
            },
            EngineCommand::DismissPrompt { session_id } => {
                self.orchestrator.dismiss_prompt(session_id);
                return self.publish();
            }
            EngineCommand::RefreshNow => {
                self.orchestrator.run_cycle();
                return self.publish();
            }
            EngineCommand::Shutdown => return false,
        };

        self.tx.send(response).is_ok() && self.publish()
    }

    fn refresh(&mut self) -> bool {
        self.orchestrator.run_cycle();
        self.publish()
    }

    fn publish(&mut self) -> bool {
        for text in self.orchestrator.take_broadcasts() {
            if self.tx.send(EngineResponse::Broadcast(text)).is_err() {
                return false;
            }
        }
        self.tx.send(EngineResponse::View(self.orchestrator.view())).is_ok()
    }
}

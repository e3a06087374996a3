use eframe::egui;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use log::info;

use crate::engine::engine::Engine;
use crate::engine::game_client::HttpGameApi;
use crate::engine::orchestrator::SubmitStatus;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::game_view::GameView;
use crate::ui::board_panel::draw_board;
use crate::ui::history_panel::draw_history_panel;
use crate::ui::prompt_panel::{draw_prompts, PromptEdit};
use crate::ui::settings::ClientSettings;
use crate::ui::settings_panel::draw_settings_window;

const BROADCAST_TTL: Duration = Duration::from_secs(5);
const GUESS_TTL: Duration = Duration::from_secs(2);

/* =========================
   UI State
   ========================= */

pub struct Banner {
    pub title: String,
    pub body: String,
    pub tone: &'static str,
    pub expires: Instant,
}

#[derive(Default)]
pub struct UiState {
    pub view: GameView,
    pub banner: Option<Banner>,

    pub word_input: String,
    pub word_error: Option<String>,
    pub prompt_edit: PromptEdit,

    pub selected_letter: Option<char>,
    pub show_settings: bool,
}

impl UiState {
    fn show_banner(&mut self, title: &str, body: String, tone: &'static str, ttl: Duration) {
        self.banner = Some(Banner {
            title: title.to_string(),
            body,
            tone,
            expires: Instant::now() + ttl,
        });
    }

    fn apply(&mut self, resp: EngineResponse) {
        match resp {
            EngineResponse::View(view) => {
                self.view = view;
            }
            EngineResponse::Broadcast(message) => {
                self.show_banner("Server Broadcast", message, "info", BROADCAST_TTL);
            }
            EngineResponse::GuessResult(Some(outcome)) => {
                let tone = if outcome.is_positive() { "success" } else { "danger" };
                self.show_banner(outcome.title(), outcome.message, tone, GUESS_TTL);
            }
            EngineResponse::GuessResult(None) => {}
            EngineResponse::WordChosen(status) => match status {
                SubmitStatus::Accepted => {
                    self.word_input.clear();
                    self.word_error = None;
                }
                SubmitStatus::Rejected(error) => self.word_error = Some(error),
                SubmitStatus::Unreachable | SubmitStatus::Discarded => {}
            },
            EngineResponse::PromptSubmitted { session_id, status } => {
                if status == SubmitStatus::Accepted
                    && self.prompt_edit.session_id() == Some(session_id)
                {
                    self.prompt_edit.clear();
                }
            }
        }
    }

    fn modal_open(&self) -> bool {
        self.view.waiting_for_word || self.view.prompt.is_some() || self.show_settings
    }
}

/* =========================
   App
   ========================= */

pub struct HangmanApp {
    ui: UiState,
    settings: ClientSettings,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl HangmanApp {
    pub fn new(settings: ClientSettings, api: HttpGameApi) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let interval = settings.poll_interval();
        info!("connecting to {}", api.base_url());

        std::thread::spawn(move || {
            let mut engine = Engine::new(cmd_rx, resp_tx, api, interval);
            engine.run();
        });

        Self {
            ui: UiState::default(),
            settings,
            cmd_tx,
            resp_rx,
        }
    }

    fn keyboard_guess(&self, ctx: &egui::Context) -> Option<char> {
        if self.ui.modal_open() || ctx.wants_keyboard_input() {
            return None;
        }
        ctx.input(|i| {
            i.events.iter().find_map(|event| match event {
                egui::Event::Text(text) => {
                    let mut chars = text.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_lowercase()),
                        _ => None,
                    }
                }
                _ => None,
            })
        })
        .filter(|c| self.ui.view.is_letter_available(*c))
    }
}

impl Drop for HangmanApp {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for HangmanApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.ui_scale);

        while let Ok(resp) = self.resp_rx.try_recv() {
            self.ui.apply(resp);
        }

        if let Some(letter) = self.keyboard_guess(ctx) {
            let _ = self.cmd_tx.send(EngineCommand::GuessLetter(letter));
        }

        /* TOP BAR */
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Hangman");
                ui.separator();

                if self.ui.view.connected {
                    ui.colored_label(self.settings.color("success"), "● Connected");
                } else {
                    ui.colored_label(self.settings.color("danger"), "● Disconnected");
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Settings").clicked() {
                        self.ui.show_settings = !self.ui.show_settings;
                    }
                    if ui.button("Refresh").clicked() {
                        let _ = self.cmd_tx.send(EngineCommand::RefreshNow);
                    }
                });
            });
        });

        /* BANNER */
        if self.ui.banner.as_ref().is_some_and(|b| Instant::now() >= b.expires) {
            self.ui.banner = None;
        }
        if let Some(banner) = &self.ui.banner {
            let color = self.settings.color(banner.tone);
            egui::TopBottomPanel::bottom("banner").show(ctx, |ui| {
                ui.add_space(4.0);
                bubble(ui, color, &format!("{}\n{}", banner.title, banner.body));
                ui.add_space(4.0);
            });
        }

        draw_history_panel(ctx, &self.ui, &self.settings);
        draw_board(ctx, &mut self.ui, &self.settings, &self.cmd_tx);
        draw_prompts(ctx, &mut self.ui, &self.cmd_tx);

        if self.ui.show_settings {
            draw_settings_window(ctx, &mut self.ui.show_settings, &mut self.settings);
        }

        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

/* =========================
   UI Helpers
   ========================= */

fn bubble(ui: &mut egui::Ui, color: egui::Color32, text: &str) {
    egui::Frame::new()
        .fill(color)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
        });
}

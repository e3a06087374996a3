use eframe::egui;
use std::sync::mpsc::Sender;

use crate::engine::protocol::EngineCommand;
use crate::model::prompt::{PromptInput, PromptMode, PromptSession, WordFillPart};
use crate::ui::app::UiState;

/// Input buffers for the directive prompt currently on screen.
#[derive(Debug, Default)]
pub struct PromptEdit {
    session_id: Option<u64>,
    pub text: String,
    pub blanks: Vec<String>,
}

impl PromptEdit {
    /// Reset the buffers when a different session appears and size the
    /// blanks once a word-fill form has arrived.
    pub fn sync(&mut self, session: Option<&PromptSession>) {
        let Some(session) = session else {
            *self = Self::default();
            return;
        };

        if self.session_id != Some(session.id) {
            *self = Self {
                session_id: Some(session.id),
                ..Self::default()
            };
        }

        if let PromptMode::WordFill { form: Some(form) } = &session.mode {
            self.blanks.resize(form.blank_count(), String::new());
        }
    }

    pub fn session_id(&self) -> Option<u64> {
        self.session_id
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.blanks.iter_mut().for_each(String::clear);
    }
}

/* =========================
   Prompt windows
   ========================= */

pub fn draw_prompts(ctx: &egui::Context, ui_state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    if ui_state.view.waiting_for_word {
        draw_word_choice(ctx, ui_state, cmd_tx);
    }

    let session = ui_state.view.prompt.clone();
    ui_state.prompt_edit.sync(session.as_ref());
    if let Some(session) = session {
        if draw_directive_prompt(ctx, &session, &mut ui_state.prompt_edit, cmd_tx) {
            // Hide it right away instead of waiting for the next published view.
            ui_state.view.prompt = None;
        }
    }
}

fn draw_word_choice(ctx: &egui::Context, ui_state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    egui::Window::new("Choose a word")
        .id(egui::Id::new("word_choice"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, -80.0])
        .show(ctx, |ui| {
            ui.label("Pick the word the other players will guess.");

            let mut submit = false;
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut ui_state.word_input).hint_text("Word"),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                if ui.button("Submit").clicked() {
                    submit = true;
                }
            });

            if let Some(error) = &ui_state.word_error {
                ui.colored_label(egui::Color32::LIGHT_RED, error.as_str());
            }

            if submit {
                let _ = cmd_tx.send(EngineCommand::ChooseWord(ui_state.word_input.clone()));
            }
        });
}

fn draw_directive_prompt(
    ctx: &egui::Context,
    session: &PromptSession,
    edit: &mut PromptEdit,
    cmd_tx: &Sender<EngineCommand>,
) -> bool {
    let mut open = true;
    let mut input: Option<PromptInput> = None;

    egui::Window::new(session.args.title.as_str())
        .id(egui::Id::new("directive_prompt"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 60.0])
        .show(ctx, |ui| {
            ui.label(session.args.label.as_str());
            ui.add_space(4.0);

            match &session.mode {
                PromptMode::FreeText { input_type } => {
                    let mut field = egui::TextEdit::singleline(&mut edit.text);
                    if input_type == "password" {
                        field = field.password(true);
                    }
                    let response = ui.add(field);
                    if response.changed() && input_type == "number" {
                        edit.text.retain(|c| c.is_ascii_digit() || c == '-');
                    }
                    let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("Submit").clicked() || entered {
                        input = Some(PromptInput::Text(edit.text.clone()));
                    }
                }

                PromptMode::Choice { options } => {
                    ui.horizontal(|ui| {
                        for option in options {
                            if ui.button(option.as_str()).clicked() {
                                input = Some(PromptInput::Choice(option.clone()));
                            }
                        }
                    });
                }

                PromptMode::WordFill { form: None } => {
                    ui.horizontal(|ui| {
                        ui.add(egui::Spinner::new());
                        ui.label("Loading word…");
                    });
                }

                PromptMode::WordFill { form: Some(form) } => {
                    ui.horizontal(|ui| {
                        let mut blanks = edit.blanks.iter_mut();
                        for part in &form.parts {
                            match part {
                                WordFillPart::Fixed(text) => {
                                    ui.label(egui::RichText::new(text.as_str()).monospace().strong());
                                }
                                WordFillPart::Blank { width, default } => {
                                    if let Some(value) = blanks.next() {
                                        ui.add(
                                            egui::TextEdit::singleline(value)
                                                .char_limit(*width)
                                                .hint_text(default.as_str())
                                                .font(egui::TextStyle::Monospace)
                                                .desired_width(14.0 * (*width).max(1) as f32),
                                        );
                                    }
                                }
                            }
                        }
                    });
                    if ui.button("Submit").clicked() {
                        input = Some(PromptInput::WordFill(edit.blanks.clone()));
                    }
                }
            }

            if let Some(error) = &session.error {
                ui.colored_label(egui::Color32::LIGHT_RED, error.as_str());
            }
        });

    if let Some(input) = input {
        let _ = cmd_tx.send(EngineCommand::SubmitPrompt {
            session_id: session.id,
            input,
        });
    }
    if !open {
        let _ = cmd_tx.send(EngineCommand::DismissPrompt {
            session_id: session.id,
        });
    }
    !open
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::prompt::{PromptArgs, WordFillForm};

    fn session(id: u64, kind: &str) -> PromptSession {
        PromptSession::open(
            id,
            PromptArgs {
                title: "Title".into(),
                target_url: "/target".into(),
                field: "field".into(),
                label: "Label".into(),
                input_kind: kind.into(),
            },
        )
    }

    #[test]
    fn new_session_resets_buffers() {
        let mut edit = PromptEdit::default();
        edit.sync(Some(&session(1, "text")));
        edit.text = "draft".into();

        edit.sync(Some(&session(1, "text")));
        assert_eq!(edit.text, "draft");

        edit.sync(Some(&session(2, "text")));
        assert!(edit.text.is_empty());

        edit.sync(None);
        assert!(edit.session_id.is_none());
    }

    #[test]
    fn blanks_follow_loaded_form() {
        let mut edit = PromptEdit::default();
        let mut fill = session(3, "wordFill");
        edit.sync(Some(&fill));
        assert!(edit.blanks.is_empty());

        fill.mode = PromptMode::WordFill {
            form: Some(WordFillForm {
                parts: vec![
                    WordFillPart::Blank { width: 1, default: "-".into() },
                    WordFillPart::Fixed("x".into()),
                    WordFillPart::Blank { width: 2, default: "--".into() },
                ],
            }),
        };
        edit.sync(Some(&fill));
        assert_eq!(edit.blanks, vec![String::new(), String::new()]);
    }
}

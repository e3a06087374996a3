use eframe::egui;
use std::sync::mpsc::Sender;

use crate::engine::protocol::EngineCommand;
use crate::ui::app::UiState;
use crate::ui::settings::ClientSettings;

pub fn draw_board(
    ctx: &egui::Context,
    ui_state: &mut UiState,
    settings: &ClientSettings,
    cmd_tx: &Sender<EngineCommand>,
) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let view = &ui_state.view;

        ui.heading(format!("Word ({} letters)", view.word_length));
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new(view.blanked.as_str())
                .monospace()
                .size(32.0)
                .strong(),
        );

        ui.add_space(12.0);

        /* -------- Guess progress -------- */

        let fill = if view.percentage > 50.0 {
            settings.color("danger")
        } else {
            settings.color("info")
        };
        ui.add(
            egui::ProgressBar::new(view.percentage / 100.0)
                .text(format!("{:.2}%", view.percentage))
                .fill(fill),
        );

        ui.add_space(12.0);

        /* -------- Alphabet -------- */

        let mut guess: Option<char> = None;
        ui.horizontal_wrapped(|ui| {
            for letter in 'A'..='Z' {
                let available = view.is_letter_available(letter);
                let button = egui::Button::new(
                    egui::RichText::new(letter.to_string()).monospace().size(18.0),
                )
                .min_size(egui::vec2(30.0, 30.0));

                if ui.add_enabled(available, button).clicked() {
                    guess = Some(letter.to_ascii_lowercase());
                }
            }
        });

        ui.add_space(8.0);

        /* -------- Letter picker -------- */

        let letters = view.letters.clone();
        if ui_state.selected_letter.map_or(true, |l| !letters.contains(&l)) {
            ui_state.selected_letter = letters.first().copied();
        }

        ui.horizontal(|ui| {
            let selected_text = ui_state
                .selected_letter
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".into());
            egui::ComboBox::from_id_salt("letter_picker")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for letter in &letters {
                        ui.selectable_value(
                            &mut ui_state.selected_letter,
                            Some(*letter),
                            letter.to_string(),
                        );
                    }
                });

            if ui
                .add_enabled(ui_state.selected_letter.is_some(), egui::Button::new("Guess"))
                .clicked()
            {
                guess = ui_state.selected_letter;
            }
        });

        if let Some(letter) = guess {
            let _ = cmd_tx.send(EngineCommand::GuessLetter(letter));
        }
    });
}

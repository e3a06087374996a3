use eframe::egui;

use crate::model::history::HistoryEntry;
use crate::model::round::RoundResult;
use crate::ui::app::UiState;
use crate::ui::settings::ClientSettings;

pub fn draw_history_panel(ctx: &egui::Context, ui_state: &UiState, settings: &ClientSettings) {
    egui::SidePanel::right("history")
        .resizable(true)
        .default_width(340.0)
        .min_width(260.0)
        .show(ctx, |ui| {
            ui.heading("History");
            ui.separator();

            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    egui::Grid::new("history_table")
                        .striped(true)
                        .num_columns(4)
                        .show(ui, |ui| {
                            for title in ["Level", "Word", "Result", "Score"] {
                                ui.strong(title);
                            }
                            ui.end_row();

                            for row in &ui_state.view.history {
                                let color = settings.color(row_tone(row));
                                ui.label(row.level.as_str());
                                ui.label(row.word.as_str());
                                ui.colored_label(color, row.result_label());
                                ui.label(row.score.as_str());
                                ui.end_row();
                            }
                        });
                });

            if let Some(addr) = &ui_state.view.client_addr {
                ui.separator();
                ui.small(format!("Playing from {}", addr));
            }
        });
}

fn row_tone(row: &HistoryEntry) -> &'static str {
    if row.is_ongoing() || row.abandoned {
        return "ongoing";
    }
    match row.result {
        RoundResult::Won => "won",
        RoundResult::Lost => "lost",
        RoundResult::Ongoing => "ongoing",
    }
}

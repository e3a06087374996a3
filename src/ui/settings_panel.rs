use eframe::egui;

use crate::ui::settings::ClientSettings;
use crate::ui::settings_io::save_settings;

const TONES: [(&str, &str); 6] = [
    ("won", "Won rows"),
    ("lost", "Lost rows"),
    ("ongoing", "Ongoing rows"),
    ("info", "Broadcasts"),
    ("success", "Correct guesses"),
    ("danger", "Incorrect guesses"),
];

pub fn draw_settings_window(ctx: &egui::Context, open: &mut bool, settings: &mut ClientSettings) {
    let mut still_open = *open;

    egui::Window::new("Settings")
        .id(egui::Id::new("settings"))
        .open(&mut still_open)
        .resizable(false)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.label("UI Scale");
            ui.add(egui::Slider::new(&mut settings.ui_scale, 0.75..=2.0));

            ui.separator();

            ui.label("Server");
            ui.text_edit_singleline(&mut settings.server_url);

            ui.label("Poll interval (ms)");
            ui.add(
                egui::DragValue::new(&mut settings.poll_interval_ms)
                    .speed(50)
                    .range(250..=60_000),
            );

            ui.label("Request timeout (ms)");
            ui.add(
                egui::DragValue::new(&mut settings.request_timeout_ms)
                    .speed(50)
                    .range(100..=60_000),
            );
            ui.small("Server and timing changes apply after a restart.");

            ui.separator();

            ui.collapsing("Colors", |ui| {
                for (key, label) in TONES {
                    let mut color = settings.color(key);
                    ui.horizontal(|ui| {
                        if ui.color_edit_button_srgba(&mut color).changed() {
                            settings.set_color(key, color);
                        }
                        ui.label(label);
                    });
                }
            });

            ui.separator();

            if ui.button("Save").clicked() {
                save_settings(settings);
            }
        });

    *open = still_open;
}

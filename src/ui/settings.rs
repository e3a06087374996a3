use serde::{Deserialize, Serialize};
use egui::Color32;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8001";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    pub server_url: String,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    pub ui_scale: f32,

    // Row/banner tone → color mapping
    pub tone_colors: HashMap<String, [u8; 4]>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        let mut tone_colors = HashMap::new();

        tone_colors.insert("won".into(), [40, 110, 60, 255]);
        tone_colors.insert("lost".into(), [130, 45, 45, 255]);
        tone_colors.insert("ongoing".into(), [70, 70, 90, 255]);
        tone_colors.insert("info".into(), [40, 70, 120, 255]);
        tone_colors.insert("danger".into(), [150, 50, 50, 255]);
        tone_colors.insert("success".into(), [40, 110, 60, 255]);

        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            poll_interval_ms: 3000,
            request_timeout_ms: 3000,
            ui_scale: 1.0,
            tone_colors,
        }
    }
}

impl ClientSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(250))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.max(100))
    }

    pub fn color(&self, key: &str) -> Color32 {
        self.tone_colors
            .get(key)
            .map(|c| Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3]))
            .unwrap_or(Color32::DARK_GRAY)
    }

    pub fn set_color(&mut self, key: &str, color: Color32) {
        self.tone_colors.insert(
            key.to_string(),
            [color.r(), color.g(), color.b(), color.a()],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: ClientSettings =
            serde_json::from_str(r#"{"server_url": "http://hangman.local:9000"}"#).unwrap();

        assert_eq!(settings.server_url, "http://hangman.local:9000");
        assert_eq!(settings.poll_interval(), Duration::from_secs(3));
        assert_eq!(settings.color("won"), Color32::from_rgba_unmultiplied(40, 110, 60, 255));
    }

    #[test]
    fn interval_has_a_floor() {
        let settings = ClientSettings {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(settings.poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn colors_round_trip_through_settings() {
        let mut settings = ClientSettings::default();
        settings.set_color("info", Color32::from_rgb(1, 2, 3));
        assert_eq!(settings.color("info"), Color32::from_rgb(1, 2, 3));
        assert_eq!(settings.color("missing"), Color32::DARK_GRAY);
    }
}

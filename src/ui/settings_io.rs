use std::fs;
use std::path::PathBuf;

use log::warn;

use crate::ui::settings::ClientSettings;

fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("hangman_client");
    fs::create_dir_all(&path).ok();
    path.push("settings.json");
    path
}

pub fn load_settings() -> ClientSettings {
    let path = settings_path();
    fs::read_to_string(&path)
        .ok()
        .and_then(|s| match serde_json::from_str(&s) {
            Ok(settings) => Some(settings),
            Err(e) => {
                warn!("ignoring unreadable settings {}: {}", path.display(), e);
                None
            }
        })
        .unwrap_or_default()
}

pub fn save_settings(settings: &ClientSettings) {
    let path = settings_path();
    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = fs::write(&path, json) {
                warn!("could not save settings to {}: {}", path.display(), e);
            }
        }
        Err(e) => warn!("could not encode settings: {}", e),
    }
}

use adw::Application;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_room_name() -> String {
    "Dev Room".to_string()
}

/// Client configuration, persisted as TOML in the platform config dir.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    pub base_url: String,
    pub user_name: String,
    #[serde(default = "default_room_name")]
    pub room_name: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            user_name: String::new(),
            room_name: default_room_name(),
        }
    }
}

impl AppState {
    fn config_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("parallel-gtk.toml"))
    }

    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if let Ok(text) = fs::read_to_string(&path) {
                if let Ok(state) = toml::from_str::<AppState>(&text) {
                    return state;
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let toml = toml::to_string_pretty(self)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            fs::write(path, toml)
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config dir",
            ))
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.user_name.is_empty()
    }

    pub fn user_id(&self) -> String {
        crate::utils::slug_id(&self.user_name)
    }
}

pub fn build_ui(app: &Application) {
    let state = AppState::load();
    if state.is_configured() {
        crate::ui::main_window::show_main_window(app);
    } else {
        crate::ui::setup::show_setup_window(app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_name_defaults_when_missing_from_config() {
        let state: AppState =
            toml::from_str("base_url = \"http://localhost:8000\"\nuser_name = \"Ana\"").unwrap();
        assert_eq!(state.room_name, "Dev Room");
        assert!(state.is_configured());
    }

    #[test]
    fn user_id_is_the_slugged_display_name() {
        let state = AppState {
            base_url: "http://localhost:8000".into(),
            user_name: "Ana Lopez".into(),
            room_name: default_room_name(),
        };
        assert_eq!(state.user_id(), "ana-lopez");
    }

    #[test]
    fn empty_state_is_not_configured() {
        assert!(!AppState::default().is_configured());
    }
}

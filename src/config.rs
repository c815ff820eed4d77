// Tunables and persisted user settings.
use serde::{Deserialize, Serialize};

use crate::model::Algorithm;

pub const DEFAULT_ANIMATION_SPEED_MS: u32 = 35;
/// Floor for any reveal interval; a 0 ms interval would spin the reveal loop.
pub const MIN_SPEED_MS: u32 = 1;
pub const SPEED_SLIDER_MIN_MS: u32 = 5;
pub const SPEED_SLIDER_MAX_MS: u32 = 400;

pub const DEFAULT_MAZE_WIDTH: u32 = 31;
pub const DEFAULT_MAZE_HEIGHT: u32 = 21;
pub const MIN_DIMENSION: u32 = 5;
pub const MAX_DIMENSION: u32 = 1000;

const SETTINGS_KEY: &str = "mv_settings";
const DEBUG_KEY: &str = "mv_setting_debug";

/// Base URL of the maze service. Empty means same origin.
pub fn api_base_url() -> &'static str {
    option_env!("MAZE_API_BASE_URL").unwrap_or("")
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub animation_speed_ms: u32,
    pub algorithm: Algorithm,
    pub maze_width: u32,
    pub maze_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            animation_speed_ms: DEFAULT_ANIMATION_SPEED_MS,
            algorithm: Algorithm::default(),
            maze_width: DEFAULT_MAZE_WIDTH,
            maze_height: DEFAULT_MAZE_HEIGHT,
        }
    }
}

impl Settings {
    /// Malformed or out-of-range values fall back to defaults field by field.
    pub fn parse(raw: &str) -> Self {
        let mut s: Settings = serde_json::from_str(raw).unwrap_or_default();
        s.animation_speed_ms = clamp_speed(s.animation_speed_ms);
        s.maze_width = clamp_dimension(s.maze_width as i64);
        s.maze_height = clamp_dimension(s.maze_height as i64);
        s
    }

    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(SETTINGS_KEY) {
                    return Self::parse(&raw);
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(s) = serde_json::to_string(self) {
                    let _ = store.set_item(SETTINGS_KEY, &s);
                }
            }
        }
    }
}

pub fn debug_logging_enabled() -> bool {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(Some(v)) = store.get_item(DEBUG_KEY) {
                return v == "1" || v == "true";
            }
        }
    }
    false
}

pub fn clamp_dimension(value: i64) -> u32 {
    value.clamp(MIN_DIMENSION as i64, MAX_DIMENSION as i64) as u32
}

pub fn clamp_speed(ms: u32) -> u32 {
    ms.clamp(MIN_SPEED_MS, SPEED_SLIDER_MAX_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_settings_fall_back_to_defaults() {
        assert_eq!(Settings::parse("not json"), Settings::default());
        let partial = Settings::parse(r#"{"algorithm":"bfs"}"#);
        assert_eq!(partial.algorithm, Algorithm::Bfs);
        assert_eq!(partial.animation_speed_ms, DEFAULT_ANIMATION_SPEED_MS);
    }

    #[test]
    fn stored_values_are_clamped() {
        let s = Settings::parse(r#"{"animation_speed_ms":0,"maze_width":2,"maze_height":5000}"#);
        assert_eq!(s.animation_speed_ms, MIN_SPEED_MS);
        assert_eq!(s.maze_width, MIN_DIMENSION);
        assert_eq!(s.maze_height, MAX_DIMENSION);
    }
}

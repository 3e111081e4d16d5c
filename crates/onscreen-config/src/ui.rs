use std::env;

use onscreen_types::ColorKey;
use serde::{Deserialize, Serialize};

fn default_font() -> String {
    "Arial, 9pt".to_string()
}

fn default_toolbar_height() -> i32 {
    32
}

fn default_view_padding() -> i32 {
    2
}

fn default_tick_interval_ms() -> u64 {
    1
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Font descriptor handed to the renderer as-is
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_toolbar_height")]
    pub toolbar_height: i32,
    /// Inset between the content area and the capture region
    #[serde(default = "default_view_padding")]
    pub view_padding: i32,
    #[serde(default)]
    pub color_key: ColorKey,
    /// Click-through polling period
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl UiConfig {
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    /// `TICK_INTERVAL_MS`, ignored when it is not a number
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(tick_interval_ms) = lookup("TICK_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            self.tick_interval_ms = tick_interval_ms;
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            font: default_font(),
            toolbar_height: default_toolbar_height(),
            view_padding: default_view_padding(),
            color_key: ColorKey::default(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

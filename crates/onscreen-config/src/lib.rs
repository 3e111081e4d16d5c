use std::env;

use serde::{Deserialize, Serialize};

use self::labels::Labels;
use self::ocr::OcrConfig;
use self::ui::UiConfig;
use self::window::WindowConfig;

pub mod labels;
pub mod ocr;
pub mod ui;
pub mod window;

/// Process-lifetime settings, passed explicitly to whoever needs them
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub ocr: OcrConfig,
    pub ui: UiConfig,
    pub labels: Labels,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Let the process environment override whatever was loaded
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        self.ocr.apply_overrides(&lookup);
        self.ui.apply_overrides(&lookup);
    }
}

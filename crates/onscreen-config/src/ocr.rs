use std::env;

use serde::{Deserialize, Serialize};

fn default_tessdata_path() -> String {
    "./tessdata".to_string()
}

fn default_tesseract_path() -> String {
    "tesseract".to_string()
}

/// Sparse text with orientation and script detection
fn default_page_seg_mode() -> u8 {
    12
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OcrConfig {
    /// Trained-data tag, e.g. "eng" or "jpn". Empty until the user picks one.
    #[serde(default)]
    pub language: String,
    /// Directory holding `*.traineddata` files
    #[serde(default = "default_tessdata_path")]
    pub tessdata_path: String,
    #[serde(default = "default_tesseract_path")]
    pub tesseract_path: String,
    #[serde(default = "default_page_seg_mode")]
    pub page_seg_mode: u8,
}

impl OcrConfig {
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    /// `OCR_LANGUAGE`, `TESSDATA_PATH` and `TESSERACT_PATH` win over stored values
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(language) = lookup("OCR_LANGUAGE") {
            self.language = language;
        }
        if let Some(path) = lookup("TESSDATA_PATH") {
            self.tessdata_path = path;
        }
        if let Some(path) = lookup("TESSERACT_PATH") {
            self.tesseract_path = path;
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: String::new(),
            tessdata_path: default_tessdata_path(),
            tesseract_path: default_tesseract_path(),
            page_seg_mode: default_page_seg_mode(),
        }
    }
}

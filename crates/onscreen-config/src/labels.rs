use serde::{Deserialize, Serialize};

/// User-visible strings, overridable for translation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Labels {
    pub app_name: String,
    pub ocr: String,
    pub show_text: String,
    pub hide_text: String,
    pub reset: String,
    pub language: String,
    pub font: String,
    pub copy_all: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            app_name: "OnScreenOCR".to_string(),
            ocr: "OCR".to_string(),
            show_text: "Show Text".to_string(),
            hide_text: "Hide Text".to_string(),
            reset: "Reset".to_string(),
            language: "Language".to_string(),
            font: "Font".to_string(),
            copy_all: "Copy All".to_string(),
        }
    }
}

use onscreen_types::Rect;
use serde::{Deserialize, Serialize};

fn default_title() -> String {
    "OnScreenOCR".to_string()
}

/// Last known host window geometry
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Title used to find the host window at startup
    #[serde(default = "default_title")]
    pub title: String,
}

impl WindowConfig {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.x = bounds.x;
        self.y = bounds.y;
        self.width = bounds.width;
        self.height = bounds.height;
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            width: 700,
            height: 500,
            title: default_title(),
        }
    }
}

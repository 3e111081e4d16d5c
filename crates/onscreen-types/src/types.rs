use serde::{Deserialize, Serialize};

/// Screen position in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in screen pixels.
///
/// Width and height are signed so callers can describe shrinking extensions;
/// everything produced by capture or OCR is non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// True when the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Half-open containment: the right and bottom edges are outside
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// RGB colour the OS treats as fully transparent on a layered window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorKey {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorKey {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Win32 COLORREF layout: 0x00BBGGRR
    pub const fn to_colorref(self) -> u32 {
        (self.r as u32) | ((self.g as u32) << 8) | ((self.b as u32) << 16)
    }
}

impl Default for ColorKey {
    fn default() -> Self {
        Self::new(0xab, 0xcd, 0xef)
    }
}

/// One line-level result reported by the OCR engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    pub bounds: Rect,
    pub text: String,
}

impl TextFragment {
    pub fn new(bounds: Rect, text: impl Into<String>) -> Self {
        Self {
            bounds,
            text: text.into(),
        }
    }
}

/// One or more fragments merged into a single overlay field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub bounds: Rect,
    pub text: String,
}

impl TextBlock {
    pub fn new(bounds: Rect, text: impl Into<String>) -> Self {
        Self {
            bounds,
            text: text.into(),
        }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            bounds: self.bounds.offset(dx, dy),
            text: self.text,
        }
    }

    /// Bounds re-expressed relative to `origin`, for renderers that place
    /// fields inside the capture panel instead of on the desktop
    pub fn relative_to(&self, origin: Point) -> Rect {
        self.bounds.offset(-origin.x, -origin.y)
    }
}

impl From<TextFragment> for TextBlock {
    fn from(fragment: TextFragment) -> Self {
        Self {
            bounds: fragment.bounds,
            text: fragment.text,
        }
    }
}

/// Whether mouse input currently falls through the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickThroughState {
    PassThrough,
    Interactive,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // UI -> app
    TriggerCapture,
    Reset,
    ToggleText,
    CopyAll,
    SelectLanguage(String),
    SelectFont(String),
    WindowChanged(Rect),

    // app -> UI
    ShowBlocks(Vec<TextBlock>),
    ClearBlocks,
    TextVisibility(bool),
    ShowError(String),
    StatusUpdate { status: String, capturing: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.bottom(), 60);
        assert_eq!(rect.origin(), Point::new(10, 20));
    }

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(rect.contains(Point::new(0, 0)));
        assert!(rect.contains(Point::new(9, 9)));
        assert!(!rect.contains(Point::new(10, 5)));
        assert!(!rect.contains(Point::new(5, 10)));
        assert!(!rect.contains(Point::new(-1, 5)));
    }

    #[test]
    fn zero_size_rect_contains_nothing() {
        let rect = Rect::new(5, 5, 0, 0);
        assert!(rect.is_empty());
        assert!(!rect.contains(Point::new(5, 5)));
    }

    #[test]
    fn colorref_layout() {
        assert_eq!(ColorKey::default().to_colorref(), 0x00ef_cdab);
    }

    #[test]
    fn block_relative_bounds() {
        let block = TextBlock::new(Rect::new(120, 80, 50, 20), "abc");
        assert_eq!(block.relative_to(Point::new(100, 50)), Rect::new(20, 30, 50, 20));
    }

    #[test]
    fn rect_serializes_as_plain_fields() {
        let json = serde_json::to_string(&Rect::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2,"width":3,"height":4}"#);
    }
}

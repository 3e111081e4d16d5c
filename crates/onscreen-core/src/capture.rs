use std::sync::atomic::{AtomicBool, Ordering};

use image::RgbaImage;
use onscreen_types::{Point, Rect, TextBlock, TextFragment};
use uuid::Uuid;

use crate::error::{CaptureError, OcrError};
use crate::merge::{LINE_SEPARATOR, merge_blocks};
use crate::preprocess::{DefaultPreprocessor, Preprocessor};

/// Turns a screen rectangle into pixels
pub trait ScreenCapture: Send + Sync {
    /// The returned image must be exactly `region.width` x `region.height`
    fn rasterize(&self, region: Rect) -> Result<RgbaImage, CaptureError>;
}

/// Line-level text recognition
pub trait OcrEngine: Send + Sync {
    /// Fragment bounds are relative to the image's top-left corner
    fn recognize(&self, image: &RgbaImage, language: &str) -> Result<Vec<TextFragment>, OcrError>;
}

/// Result of one capture, kept until the user resets
pub struct CaptureSession {
    pub id: Uuid,
    pub region: Rect,
    pub image: RgbaImage,
    pub language: String,
    /// Screen-absolute, ascending `y`
    pub blocks: Vec<TextBlock>,
}

impl CaptureSession {
    pub fn new(region: Rect, image: RgbaImage, language: &str, blocks: Vec<TextBlock>) -> Self {
        Self {
            id: Uuid::new_v4(),
            region,
            image,
            language: language.to_string(),
            blocks,
        }
    }

    /// Top-left of the captured region, for renderers working in panel space
    pub fn origin(&self) -> Point {
        self.region.origin()
    }

    /// Every block's text followed by a line break, in block order
    pub fn copy_all_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| format!("{}{LINE_SEPARATOR}", block.text))
            .collect()
    }
}

/// Clears the busy flag when a capture ends, however it ends
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Runs rasterize -> recognize -> clean up -> merge for one region
pub struct CaptureCoordinator {
    screen: Box<dyn ScreenCapture>,
    engine: Box<dyn OcrEngine>,
    preprocessor: Box<dyn Preprocessor + Send + Sync>,
    busy: AtomicBool,
}

impl CaptureCoordinator {
    pub fn new(screen: impl ScreenCapture + 'static, engine: impl OcrEngine + 'static) -> Self {
        Self {
            screen: Box::new(screen),
            engine: Box::new(engine),
            preprocessor: Box::new(DefaultPreprocessor),
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_preprocessor(mut self, preprocessor: impl Preprocessor + Send + Sync + 'static) -> Self {
        self.preprocessor = Box::new(preprocessor);
        self
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Capture `region` and return its merged blocks
    pub fn capture(&self, region: Rect, language: &str) -> Result<Vec<TextBlock>, CaptureError> {
        self.capture_session(region, language)
            .map(|session| session.blocks)
    }

    pub fn capture_session(&self, region: Rect, language: &str) -> Result<CaptureSession, CaptureError> {
        if language.trim().is_empty() {
            return Err(CaptureError::NoLanguageSelected);
        }

        let _busy = BusyGuard::acquire(&self.busy).ok_or(CaptureError::Busy)?;

        if region.is_empty() {
            tracing::debug!("Empty capture region {:?}, skipping OCR", region);
            return Ok(CaptureSession::new(region, RgbaImage::new(0, 0), language, Vec::new()));
        }

        let image = self.screen.rasterize(region)?;
        if image.width() != region.width as u32 || image.height() != region.height as u32 {
            return Err(CaptureError::ScreenCaptureFailed(format!(
                "expected {}x{} image, got {}x{}",
                region.width,
                region.height,
                image.width(),
                image.height()
            )));
        }

        let raw = self
            .engine
            .recognize(&image, language)
            .map_err(|source| CaptureError::OcrEngineFailure {
                language: language.to_string(),
                source,
            })?;
        let raw_count = raw.len();

        let fragments = self.prepare(raw);
        let blocks: Vec<TextBlock> = merge_blocks(fragments)
            .into_iter()
            .map(|block| block.offset(region.x, region.y))
            .collect();

        let session = CaptureSession::new(region, image, language, blocks);
        tracing::debug!(
            "[{}] {} fragments -> {} blocks",
            session.id,
            raw_count,
            session.blocks.len()
        );
        Ok(session)
    }

    /// Normalize text and drop fragments with nothing left to show
    fn prepare(&self, raw: Vec<TextFragment>) -> Vec<TextFragment> {
        raw.into_iter()
            .filter_map(|fragment| {
                let text = self.preprocessor.process(&fragment.text);
                if text.trim().is_empty() {
                    None
                } else {
                    Some(TextFragment::new(fragment.bounds, text))
                }
            })
            .collect()
    }
}

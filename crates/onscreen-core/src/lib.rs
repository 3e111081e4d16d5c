pub mod capture;
pub mod clickthrough;
pub mod error;
pub mod geometry;
pub mod merge;
pub mod preprocess;

pub use capture::{CaptureCoordinator, CaptureSession, OcrEngine, ScreenCapture};
pub use clickthrough::{ClickThroughController, HostWindow, WindowAttributeSink, WindowAttributes};
pub use error::{CaptureError, OcrError, SinkError};
pub use merge::merge_blocks;

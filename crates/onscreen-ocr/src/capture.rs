use anyhow::{Context, Result};
use image::RgbaImage;
use onscreen_core::{CaptureError, ScreenCapture};
use onscreen_types::Rect;
use xcap::Monitor;

/// Desktop rasterizer backed by xcap
pub struct XcapScreen;

impl XcapScreen {
    /// Capture the monitor holding `region` and crop to it
    pub fn capture_region(region: Rect) -> Result<RgbaImage> {
        let monitors = Monitor::all().context("Failed to get monitors")?;

        let monitor = monitors
            .iter()
            .find(|m| {
                region.x >= m.x()
                    && region.y >= m.y()
                    && region.right() <= m.x() + m.width() as i32
                    && region.bottom() <= m.y() + m.height() as i32
            })
            .or(monitors.first())
            .context("No monitor found")?;

        let image = monitor.capture_image().context("Failed to capture screen")?;

        let cropped = xcap::image::imageops::crop_imm(
            &image,
            (region.x - monitor.x()).max(0) as u32,
            (region.y - monitor.y()).max(0) as u32,
            region.width as u32,
            region.height as u32,
        )
        .to_image();

        let (width, height) = cropped.dimensions();
        RgbaImage::from_raw(width, height, cropped.into_raw())
            .context("Captured buffer does not match its dimensions")
    }
}

impl ScreenCapture for XcapScreen {
    fn rasterize(&self, region: Rect) -> Result<RgbaImage, CaptureError> {
        Self::capture_region(region)
            .map_err(|e| CaptureError::ScreenCaptureFailed(format!("{e:#}")))
    }
}

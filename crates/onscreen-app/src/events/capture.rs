use onscreen_core::{CaptureError, HostWindow, WindowAttributeSink};
use onscreen_types::AppEvent;

use super::{CaptureOutcome, Overlay};

impl<W: HostWindow + WindowAttributeSink> Overlay<W> {
    /// Freeze the window and run OCR over its capture region off-thread
    pub(crate) async fn start_capture(&mut self) {
        if self.capturing {
            tracing::warn!("Capture already in progress, ignoring trigger");
            self.status("Capture already in progress", true).await;
            return;
        }

        let region = self.window.capture_region();
        let language = self.settings.config.ocr.language.clone();

        self.capturing = true;
        self.controller.disable(&self.window);
        self.status(format!("Capturing {}x{}", region.width, region.height), true)
            .await;

        let coordinator = self.coordinator.clone();
        let done_tx = self.done_tx.clone();
        tokio::spawn(async move {
            let outcome: CaptureOutcome =
                tokio::task::spawn_blocking(move || coordinator.capture_session(region, &language))
                    .await
                    .unwrap_or_else(|e| Err(CaptureError::WorkerFailed(e.to_string())));

            if let Err(e) = done_tx.send(outcome).await {
                tracing::error!("Failed to deliver capture outcome: {}", e);
            }
        });
    }

    pub(crate) async fn finish_capture(&mut self, outcome: CaptureOutcome) {
        self.capturing = false;

        match outcome {
            Ok(session) => {
                tracing::info!(
                    "[{}] {} block(s) in {}x{} ({})",
                    session.id,
                    session.blocks.len(),
                    session.region.width,
                    session.region.height,
                    session.language
                );

                self.text_visible = true;
                self.notify(AppEvent::ShowBlocks(session.blocks.clone())).await;

                let status = if session.blocks.is_empty() {
                    "No text found".to_string()
                } else {
                    format!("{} block(s)", session.blocks.len())
                };
                self.session = Some(session);
                self.status(status, false).await;
            }
            Err(e) => {
                tracing::error!("Capture failed: {}", e);

                let message = e.user_message(&self.settings.config.ocr.tessdata_path);
                self.session = None;
                self.notify(AppEvent::ShowError(message)).await;

                // Back to selecting so the user can fix things and retry
                self.controller.enable(&self.window);
                self.status("Capture failed", false).await;
            }
        }
    }
}

use onscreen_core::{HostWindow, WindowAttributeSink};
use onscreen_types::{AppEvent, Rect};

use super::Overlay;

impl<W: HostWindow + WindowAttributeSink> Overlay<W> {
    /// Drop the current session and go back to selecting a region
    pub(crate) async fn reset(&mut self) {
        if self.capturing {
            tracing::warn!("Reset requested during a capture, ignoring");
            return;
        }

        if let Some(session) = self.session.take() {
            tracing::debug!("[{}] Session discarded", session.id);
        }
        self.text_visible = true;
        self.controller.enable(&self.window);

        self.notify(AppEvent::ClearBlocks).await;
        self.status("Select a region", false).await;
    }

    pub(crate) async fn toggle_text(&mut self) {
        if self.session.is_none() {
            tracing::debug!("No session, nothing to toggle");
            return;
        }

        self.text_visible = !self.text_visible;
        self.notify(AppEvent::TextVisibility(self.text_visible)).await;
    }

    pub(crate) fn copy_all(&mut self) {
        let text = self
            .session
            .as_ref()
            .map(|session| session.copy_all_text())
            .unwrap_or_default();

        let result = if text.is_empty() {
            self.clipboard.clear()
        } else {
            self.clipboard.set_text(&text)
        };

        match result {
            Ok(()) => tracing::debug!("Copied {} chars", text.chars().count()),
            Err(e) => tracing::warn!("Clipboard update failed: {:#}", e),
        }
    }

    pub(crate) fn select_language(&mut self, language: String) {
        tracing::info!("Language set to {}", language);
        self.settings.config.ocr.language = language;
        self.persist();
    }

    pub(crate) fn select_font(&mut self, font: String) {
        tracing::info!("Font set to {}", font);
        self.settings.config.ui.font = font;
        self.persist();
    }

    pub(crate) fn window_changed(&mut self, bounds: Rect) {
        self.settings.config.window.set_bounds(bounds);
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.settings.save() {
            tracing::warn!("Failed to save settings: {:#}", e);
        }
    }
}

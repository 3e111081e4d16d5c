use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use onscreen_core::{
    CaptureCoordinator, CaptureError, CaptureSession, ClickThroughController, HostWindow,
    WindowAttributeSink,
};
use onscreen_types::{AppEvent, Rect};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::clipboard::ClipboardSink;
use crate::settings::Settings;

pub mod capture;
pub mod commands;

pub type CaptureOutcome = Result<CaptureSession, CaptureError>;

// Moves and resizes are picked up at this rate and persisted
const WINDOW_POLL: Duration = Duration::from_millis(500);

/// Owns the capture window's state: click-through mode, the current session
/// and the settings it persists. Everything here runs on one task.
pub struct Overlay<W> {
    window: W,
    controller: ClickThroughController,
    coordinator: Arc<CaptureCoordinator>,
    clipboard: Box<dyn ClipboardSink>,
    settings: Settings,
    session: Option<CaptureSession>,
    text_visible: bool,
    capturing: bool,
    app_to_ui_tx: AsyncSender<AppEvent>,
    done_tx: AsyncSender<CaptureOutcome>,
    done_rx: AsyncReceiver<CaptureOutcome>,
}

impl<W: HostWindow + WindowAttributeSink> Overlay<W> {
    pub fn new(
        window: W,
        coordinator: Arc<CaptureCoordinator>,
        clipboard: Box<dyn ClipboardSink>,
        settings: Settings,
        app_to_ui_tx: AsyncSender<AppEvent>,
    ) -> Self {
        let (done_tx, done_rx) = kanal::bounded_async(1);
        Self {
            window,
            controller: ClickThroughController::new(settings.config.ui.color_key),
            coordinator,
            clipboard,
            settings,
            session: None,
            text_visible: true,
            capturing: false,
            app_to_ui_tx,
            done_tx,
            done_rx,
        }
    }

    /// App's main loop
    pub async fn run(
        mut self,
        ui_to_app_rx: AsyncReceiver<AppEvent>,
        cancel: CancellationToken,
    ) -> anyhow::Result<()> {
        // Start out selecting
        self.reset().await;

        let period = Duration::from_millis(self.settings.config.ui.tick_interval_ms.max(1));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut window_poll = tokio::time::interval(WINDOW_POLL);
        window_poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let done_rx = self.done_rx.clone();

        tracing::info!("Overlay running, polling every {:?}", period);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Overlay cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    self.tick();
                }
                _ = window_poll.tick() => {
                    if let Some(bounds) = self.moved_bounds() {
                        self.handle_event(AppEvent::WindowChanged(bounds)).await;
                    }
                }
                event = ui_to_app_rx.recv() => {
                    match event {
                        Ok(event) => self.handle_event(event).await,
                        Err(_) => {
                            tracing::info!("UI channel closed");
                            break;
                        }
                    }
                }
                outcome = done_rx.recv() => {
                    if let Ok(outcome) = outcome {
                        self.finish_capture(outcome).await;
                    }
                }
            }
        }

        Ok(())
    }

    pub fn tick(&mut self) {
        self.controller.tick(&self.window, &self.window);
    }

    /// Language the next capture will use
    pub fn language(&self) -> &str {
        &self.settings.config.ocr.language
    }

    /// Outer bounds when they differ from the saved ones
    fn moved_bounds(&self) -> Option<Rect> {
        if self.window.is_minimized() {
            return None;
        }
        let bounds = self.window.outer_bounds();
        (!bounds.is_empty() && bounds != self.settings.config.window.bounds()).then_some(bounds)
    }

    pub async fn handle_event(&mut self, event: AppEvent) {
        tracing::debug!("[EVENT] {:?}", event);
        match event {
            AppEvent::TriggerCapture => self.start_capture().await,
            AppEvent::Reset => self.reset().await,
            AppEvent::ToggleText => self.toggle_text().await,
            AppEvent::CopyAll => self.copy_all(),
            AppEvent::SelectLanguage(language) => self.select_language(language),
            AppEvent::SelectFont(font) => self.select_font(font),
            AppEvent::WindowChanged(bounds) => self.window_changed(bounds),
            other => tracing::warn!("Ignoring outbound event sent to the app: {:?}", other),
        }
    }

    async fn notify(&self, event: AppEvent) {
        if let Err(e) = self.app_to_ui_tx.send(event).await {
            tracing::warn!("UI is gone, dropping event: {}", e);
        }
    }

    async fn status(&self, status: impl Into<String>, capturing: bool) {
        self.notify(AppEvent::StatusUpdate {
            status: status.into(),
            capturing,
        })
        .await;
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use onscreen_core::WindowAttributes;
    use onscreen_types::{AppEvent, ColorKey, Point, Rect};

    use super::testing::*;
    use crate::settings::Settings;

    /// Drive `run` for a while, then cancel it. The settings dir stays alive
    /// as long as the returned handle does.
    async fn run_for(harness: Harness, duration: Duration) -> (Vec<AppEvent>, tempfile::TempDir) {
        let Harness {
            overlay, ui_rx, dir, ..
        } = harness;
        let (commands_tx, commands_rx) = kanal::bounded_async(8);
        let cancel = tokio_util::sync::CancellationToken::new();

        let stop = cancel.clone();
        let driver = async move {
            tokio::time::sleep(duration).await;
            stop.cancel();
            drop(commands_tx);
        };
        let (result, _) = tokio::join!(overlay.run(commands_rx, cancel), driver);
        result.unwrap();

        let mut events = Vec::new();
        while let Ok(Some(event)) = ui_rx.try_recv() {
            events.push(event);
        }
        (events, dir)
    }

    #[tokio::test]
    async fn run_starts_click_through_and_follows_the_cursor() {
        let harness = Harness::new(ScriptedEngine(Vec::new()), "eng");
        let window = harness.overlay.window.clone();
        window.cursor.set(Some(Point::new(120, 120)));

        let (events, _dir) = run_for(harness, Duration::from_millis(50)).await;

        assert!(events.contains(&AppEvent::ClearBlocks));
        let applied = window.applied.borrow();
        assert_eq!(applied.first(), Some(&WindowAttributes::pass_through(ColorKey::default())));
        assert_eq!(applied.last(), Some(&WindowAttributes::interactive(ColorKey::default())));
    }

    #[tokio::test]
    async fn run_persists_a_moved_window() {
        let harness = Harness::new(ScriptedEngine(Vec::new()), "eng");
        let settings_path = harness.dir.path().join("config.json");
        let window = harness.overlay.window.clone();
        window.bounds.set(Rect::new(40, 60, 800, 600));

        // The window poll fires immediately on start
        let (_events, _dir) = run_for(harness, Duration::from_millis(50)).await;

        let saved = Settings::load(&settings_path).unwrap();
        assert_eq!(saved.config.window.bounds(), Rect::new(40, 60, 800, 600));
    }

    #[tokio::test]
    async fn ticks_switch_to_interactive_over_the_toolbar() {
        let mut harness = Harness::new(ScriptedEngine(Vec::new()), "eng");
        harness.overlay.reset().await;
        assert_eq!(
            harness.overlay.window.last(),
            Some(WindowAttributes::pass_through(ColorKey::default()))
        );

        harness.overlay.window.cursor.set(Some(Point::new(120, 120)));
        harness.overlay.tick();
        assert_eq!(
            harness.overlay.window.last(),
            Some(WindowAttributes::interactive(ColorKey::default()))
        );
    }

    #[tokio::test]
    async fn outbound_events_are_ignored() {
        let mut harness = Harness::new(ScriptedEngine(Vec::new()), "eng");
        harness.overlay.handle_event(AppEvent::ClearBlocks).await;
        assert!(harness.drain().is_empty());
    }
}

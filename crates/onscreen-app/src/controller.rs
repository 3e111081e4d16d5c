use kanal::{AsyncReceiver, AsyncSender};
use onscreen_config::labels::Labels;
use onscreen_core::{HostWindow, WindowAttributeSink};
use onscreen_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::Overlay;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256),
            ui_to_app: kanal::bounded_async(64),
        }
    }
}

/// Task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    cancel_token: CancellationToken,
    languages: Vec<String>,
}

impl AppController {
    pub fn new() -> Self {
        Self {
            channels: ChannelSet::new(),
            cancel_token: CancellationToken::new(),
            languages: Vec::new(),
        }
    }

    /// Installed OCR languages the hotkeys cycle through
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    /// Where the overlay sends what it wants drawn
    pub fn ui_sender(&self) -> AsyncSender<AppEvent> {
        self.channels.app_to_ui.0.clone()
    }

    /// Where toolbar commands and hotkeys go
    pub fn command_sender(&self) -> AsyncSender<AppEvent> {
        self.channels.ui_to_app.0.clone()
    }

    /// Drive the overlay until Ctrl+C or [`shutdown`](Self::shutdown)
    pub async fn run<W: HostWindow + WindowAttributeSink>(
        &self,
        overlay: Overlay<W>,
        labels: Labels,
    ) -> anyhow::Result<()> {
        let mut tasks = JoinSet::new();

        // UI loop
        tasks.spawn(ui_loop(self.channels.app_to_ui.1.clone(), labels));

        // Hotkeys
        #[cfg(windows)]
        tasks.spawn(crate::io::watcher_io(
            self.cancel_token.child_token(),
            self.command_sender(),
            self.languages.clone(),
            overlay.language().to_string(),
        ));

        let result = tokio::select! {
            result = overlay.run(self.channels.ui_to_app.1.clone(), self.cancel_token.child_token()) => result,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                Ok(())
            }
        };

        self.shutdown();
        tasks.abort_all();
        result
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

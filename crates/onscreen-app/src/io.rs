use std::time::Duration;

use kanal::AsyncSender;
use onscreen_ocr::{HotkeyAction, HotkeyManager, next_language};
use onscreen_types::AppEvent;
use tokio_util::sync::CancellationToken;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Turns hotkey presses into overlay commands
struct HotkeyRouter {
    languages: Vec<String>,
    language: String,
}

impl HotkeyRouter {
    fn route(&mut self, action: HotkeyAction) -> Option<AppEvent> {
        match action {
            HotkeyAction::Capture => Some(AppEvent::TriggerCapture),
            HotkeyAction::Reset => Some(AppEvent::Reset),
            HotkeyAction::ToggleText => Some(AppEvent::ToggleText),
            HotkeyAction::CopyAll => Some(AppEvent::CopyAll),
            HotkeyAction::NextLanguage => {
                let next = next_language(&self.languages, &self.language)?;
                self.language = next.clone();
                Some(AppEvent::SelectLanguage(next))
            }
        }
    }
}

/// Global hotkeys, polled on a blocking thread that owns the registration
pub async fn watcher_io(
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
    languages: Vec<String>,
    language: String,
) -> anyhow::Result<()> {
    tokio::task::spawn_blocking(move || {
        let hotkeys = match HotkeyManager::new() {
            Ok(hotkeys) => hotkeys,
            Err(e) => {
                tracing::error!("Failed to register hotkeys: {:#}", e);
                return;
            }
        };

        tracing::info!(
            "Hotkeys registered (Ctrl+Shift+O capture, R reset, T text, C copy all, L language)"
        );

        let mut router = HotkeyRouter {
            languages,
            language,
        };

        while !cancel.is_cancelled() {
            if let Some(action) = hotkeys.poll()
                && let Some(event) = router.route(action)
            {
                match event_tx.try_send(event) {
                    Ok(true) => {}
                    Ok(false) => tracing::warn!("Event queue full, dropping {:?}", action),
                    Err(_) => break,
                }
            }

            std::thread::sleep(POLL_INTERVAL);
        }

        tracing::debug!("Hotkey watcher stopped");
    })
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_map_one_to_one() {
        let mut router = HotkeyRouter {
            languages: Vec::new(),
            language: String::new(),
        };
        assert_eq!(router.route(HotkeyAction::Capture), Some(AppEvent::TriggerCapture));
        assert_eq!(router.route(HotkeyAction::Reset), Some(AppEvent::Reset));
        assert_eq!(router.route(HotkeyAction::ToggleText), Some(AppEvent::ToggleText));
        assert_eq!(router.route(HotkeyAction::CopyAll), Some(AppEvent::CopyAll));
        assert_eq!(router.route(HotkeyAction::NextLanguage), None);
    }

    #[test]
    fn next_language_cycles_installed_models() {
        let mut router = HotkeyRouter {
            languages: vec!["eng".to_string(), "jpn".to_string()],
            language: "eng".to_string(),
        };
        assert_eq!(
            router.route(HotkeyAction::NextLanguage),
            Some(AppEvent::SelectLanguage("jpn".to_string()))
        );
        assert_eq!(
            router.route(HotkeyAction::NextLanguage),
            Some(AppEvent::SelectLanguage("eng".to_string()))
        );
    }
}

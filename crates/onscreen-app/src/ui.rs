use kanal::AsyncReceiver;
use onscreen_config::labels::Labels;
use onscreen_types::AppEvent;

/// Headless renderer: writes what the overlay would draw to the log
pub async fn ui_loop(app_to_ui_rx: AsyncReceiver<AppEvent>, labels: Labels) -> anyhow::Result<()> {
    while let Ok(event) = app_to_ui_rx.recv().await {
        match event {
            AppEvent::ShowBlocks(blocks) => {
                for block in &blocks {
                    let b = block.bounds;
                    tracing::info!("[{}] ({}, {}, {}x{}) {:?}", labels.ocr, b.x, b.y, b.width, b.height, block.text);
                }
            }
            AppEvent::ClearBlocks => tracing::info!("[{}] Cleared", labels.reset),
            AppEvent::TextVisibility(visible) => {
                // The toggle button offers the opposite action
                let button = if visible { &labels.hide_text } else { &labels.show_text };
                tracing::info!("Text visible: {} (button: {})", visible, button);
            }
            AppEvent::ShowError(message) => {
                tracing::error!("[{}] {}", labels.app_name, message.replace("\r\n", " "));
            }
            AppEvent::StatusUpdate { status, capturing } => {
                tracing::info!("[{}] {} (capturing: {})", labels.app_name, status, capturing);
            }
            other => tracing::debug!("UI ignoring {:?}", other),
        }
    }

    tracing::debug!("UI channel closed");
    Ok(())
}

// The overlay only has a host window on Windows
#![cfg_attr(not(windows), allow(dead_code))]

use std::path::PathBuf;

use clap::Parser;
use onscreen_ocr::{available_languages, resolve_language};
use onscreen_types::AppEvent;
use tracing_subscriber::EnvFilter;

mod clipboard;
mod controller;
mod events;
#[cfg(windows)]
mod io;
mod settings;
mod ui;

use self::settings::Settings;

#[derive(Parser, Debug)]
#[command(version, about = "Click-through OCR overlay")]
struct Cli {
    /// Settings file, created on first save
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// OCR language tag, saved as the new choice
    #[arg(long)]
    language: Option<String>,

    /// Font descriptor for the overlay text, e.g. "Meiryo, 11pt"
    #[arg(long)]
    font: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let mut settings = Settings::load(&cli.config)?;
    if let Some(language) = &cli.language {
        settings.config.ocr.language = language.clone();
    }

    // Only offer languages that have trained data
    let tessdata = PathBuf::from(&settings.config.ocr.tessdata_path);
    let languages = available_languages(&tessdata)?;
    match resolve_language(&languages, &settings.config.ocr.language) {
        Some(language) => {
            tracing::info!("OCR language {} (installed: {:?})", language, languages);
            settings.config.ocr.language = language;
        }
        None => {
            tracing::warn!("No trained data in {}", tessdata.display());
            settings.config.ocr.language.clear();
        }
    }

    // Command-line choices go through the overlay like toolbar picks, so they persist
    let mut startup = Vec::new();
    if cli.language.is_some() && !settings.config.ocr.language.is_empty() {
        startup.push(AppEvent::SelectLanguage(settings.config.ocr.language.clone()));
    }
    if let Some(font) = cli.font {
        startup.push(AppEvent::SelectFont(font));
    }

    tracing::info!(
        "{} v{} starting, settings at {}",
        settings.config.labels.app_name,
        env!("CARGO_PKG_VERSION"),
        settings.path().display()
    );

    launch(settings, languages, startup).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let ansi = atty::is(atty::Stream::Stderr);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi);

    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Attach to the host window by title and drive it until shutdown
#[cfg(windows)]
async fn launch(
    settings: Settings,
    languages: Vec<String>,
    startup: Vec<AppEvent>,
) -> anyhow::Result<()> {
    use std::sync::Arc;

    use onscreen_core::CaptureCoordinator;
    use onscreen_ocr::{TesseractEngine, Win32Window, XcapScreen};

    use self::clipboard::SystemClipboard;
    use self::controller::AppController;
    use self::events::Overlay;

    let config = &settings.config;
    let window = Win32Window::find(
        &config.window.title,
        config.ui.toolbar_height,
        config.ui.view_padding,
    )?;
    if let Err(e) = window.restore_bounds(config.window.bounds()) {
        tracing::warn!("{:#}", e);
    }
    let engine = TesseractEngine::new(&config.ocr.tesseract_path, &config.ocr.tessdata_path)
        .with_page_seg_mode(config.ocr.page_seg_mode);
    let coordinator = Arc::new(CaptureCoordinator::new(XcapScreen, engine));
    let labels = config.labels.clone();

    let controller = AppController::new().with_languages(languages);
    let commands = controller.command_sender();
    for event in startup {
        commands.send(event).await?;
    }

    let overlay = Overlay::new(
        window,
        coordinator,
        Box::new(SystemClipboard::new()?),
        settings,
        controller.ui_sender(),
    );

    controller.run(overlay, labels).await
}

#[cfg(not(windows))]
async fn launch(
    _settings: Settings,
    _languages: Vec<String>,
    _startup: Vec<AppEvent>,
) -> anyhow::Result<()> {
    anyhow::bail!("The overlay needs a Win32 host window and only runs on Windows")
}

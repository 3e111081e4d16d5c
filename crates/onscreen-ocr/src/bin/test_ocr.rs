//! OCR + merge over an image file - run with:
//! cargo run -p onscreen-ocr --bin test_ocr -- <image.png> [language] [tessdata]

use std::path::PathBuf;

use anyhow::{Context, Result};
use onscreen_core::{CaptureError, OcrEngine, merge_blocks};
use onscreen_core::preprocess::{DefaultPreprocessor, Preprocessor};
use onscreen_ocr::{TesseractEngine, available_languages, resolve_language};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let mut args = std::env::args().skip(1);
    let image_path = PathBuf::from(args.next().context("usage: test_ocr <image.png> [language] [tessdata]")?);
    let preferred = args.next().unwrap_or_default();
    let tessdata = PathBuf::from(args.next().unwrap_or_else(|| "./tessdata".to_string()));

    // 1. Languages
    let languages = available_languages(&tessdata)?;
    tracing::info!("Installed languages: {:?}", languages);
    let Some(language) = resolve_language(&languages, &preferred) else {
        let message = CaptureError::NoLanguageSelected.user_message(&tessdata.to_string_lossy());
        anyhow::bail!(message);
    };

    // 2. Image
    let image = image::open(&image_path)
        .with_context(|| format!("Failed to open {}", image_path.display()))?
        .to_rgba8();
    tracing::info!("{}: {}x{}", image_path.display(), image.width(), image.height());

    // 3. Raw fragments
    let start = std::time::Instant::now();
    let engine = TesseractEngine::new("tesseract", &tessdata);
    let raw = engine.recognize(&image, &language)?;
    tracing::info!("{} fragments in {:?} ({})", raw.len(), start.elapsed(), language);

    // 4. Merged blocks
    let fragments = raw
        .into_iter()
        .map(|mut fragment| {
            fragment.text = DefaultPreprocessor.process(&fragment.text);
            fragment
        })
        .filter(|fragment| !fragment.text.trim().is_empty())
        .collect();

    for block in merge_blocks(fragments) {
        let b = block.bounds;
        tracing::info!("({}, {}, {}x{}) {:?}", b.x, b.y, b.width, b.height, block.text);
    }

    Ok(())
}

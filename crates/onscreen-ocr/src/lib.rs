mod languages;
mod tesseract;

#[cfg(windows)]
mod capture;
#[cfg(windows)]
mod hotkey;
#[cfg(windows)]
mod window;

pub use languages::{MODEL_EXTENSION, available_languages, next_language, resolve_language};
pub use tesseract::{TesseractEngine, parse_tsv};

#[cfg(windows)]
pub use capture::XcapScreen;
#[cfg(windows)]
pub use hotkey::{HotkeyAction, HotkeyManager, default_bindings};
#[cfg(windows)]
pub use window::Win32Window;

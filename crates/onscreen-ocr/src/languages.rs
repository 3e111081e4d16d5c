use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub const MODEL_EXTENSION: &str = "traineddata";

/// Language tags with a trained model in `tessdata`, sorted
pub fn available_languages(tessdata: &Path) -> Result<Vec<String>> {
    if !tessdata.is_dir() {
        tracing::warn!("Trained data folder {} does not exist", tessdata.display());
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(tessdata)
        .with_context(|| format!("Failed to read {}", tessdata.display()))?;

    let mut languages: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == MODEL_EXTENSION))
        .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .collect();

    languages.sort();
    Ok(languages)
}

/// The preferred tag when it is installed, otherwise the first available one
pub fn resolve_language(available: &[String], preferred: &str) -> Option<String> {
    available
        .iter()
        .find(|language| language.as_str() == preferred)
        .or_else(|| available.first())
        .cloned()
}

/// The installed tag after `current`, wrapping around
pub fn next_language(available: &[String], current: &str) -> Option<String> {
    let next = match available.iter().position(|language| language == current) {
        Some(index) => (index + 1) % available.len(),
        None => 0,
    };
    available.get(next).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_only_trained_data_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["jpn.traineddata", "eng.traineddata", "notes.txt", "osd.traineddata.bak"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("chi_sim.traineddata")).unwrap();

        let languages = available_languages(dir.path()).unwrap();
        assert_eq!(languages, vec!["eng", "jpn"]);
    }

    #[test]
    fn missing_folder_has_no_languages() {
        let dir = tempfile::tempdir().unwrap();
        let languages = available_languages(&dir.path().join("absent")).unwrap();
        assert!(languages.is_empty());
    }

    #[test]
    fn preferred_language_wins_when_installed() {
        let available = vec!["eng".to_string(), "jpn".to_string()];
        assert_eq!(resolve_language(&available, "jpn").as_deref(), Some("jpn"));
        assert_eq!(resolve_language(&available, "kor").as_deref(), Some("eng"));
        assert_eq!(resolve_language(&available, "").as_deref(), Some("eng"));
        assert_eq!(resolve_language(&[], "eng"), None);
    }

    #[test]
    fn next_language_wraps_around() {
        let available = vec!["chi_sim".to_string(), "eng".to_string(), "jpn".to_string()];
        assert_eq!(next_language(&available, "eng").as_deref(), Some("jpn"));
        assert_eq!(next_language(&available, "jpn").as_deref(), Some("chi_sim"));
        assert_eq!(next_language(&available, "").as_deref(), Some("chi_sim"));
        assert_eq!(next_language(&["eng".to_string()], "eng").as_deref(), Some("eng"));
        assert_eq!(next_language(&[], "eng"), None);
    }
}

use std::{env, fs};
use std::path::{Path, PathBuf};

use anyhow::Context;
use onscreen_config::Config;

/// The settings struct together with where it is persisted
pub struct Settings {
    pub config: Config,
    path: PathBuf,
}

impl Settings {
    /// Read `path`, falling back to defaults when it is missing or empty.
    /// Environment overrides apply either way.
    pub fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        Self::load_with_overrides(path, |key| env::var(key).ok())
    }

    pub fn load_with_overrides(
        path: impl Into<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let path = path.into();

        let mut config = if path.exists() {
            let data = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if data.trim().is_empty() {
                Config::default()
            } else {
                serde_json::from_str(&data)
                    .with_context(|| format!("Failed to parse {}", path.display()))?
            }
        } else {
            tracing::info!("No settings at {}, using defaults", path.display());
            Config::default()
        };
        config.apply_overrides(lookup);

        Ok(Self { config, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::debug!("Settings written to {}", self.path.display());
        Ok(())
    }
}

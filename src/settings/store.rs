//! Persisted user settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    backside::resolver::BacksideMode,
    foundation::error::{CardspinError, CardspinResult},
};

/// Environment variable naming an explicit settings file.
pub const SETTINGS_ENV: &str = "CARDSPIN_SETTINGS";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backside_mode: BacksideMode,
}

/// JSON settings file at a fixed path. Read fresh on every `load`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$CARDSPIN_SETTINGS`, else `$XDG_CONFIG_HOME/cardspin/settings.json`,
    /// else `$HOME/.config/cardspin/settings.json`.
    pub fn default_location() -> Self {
        Self::at(default_settings_path(|k| std::env::var_os(k).map(PathBuf::from)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable files yield defaults.
    pub fn load(&self) -> Settings {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Settings::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read settings");
                return Settings::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to parse settings");
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> CardspinResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                CardspinError::resource_failure(format!(
                    "failed to create settings directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| CardspinError::Other(anyhow::Error::new(e)))?;
        std::fs::write(&self.path, json).map_err(|e| {
            CardspinError::resource_failure(format!(
                "failed to write settings '{}': {e}",
                self.path.display()
            ))
        })
    }

    /// Load, apply `change`, save.
    pub fn update(&self, change: impl FnOnce(&mut Settings)) -> CardspinResult<Settings> {
        let mut settings = self.load();
        change(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }
}

fn default_settings_path(var: impl Fn(&str) -> Option<PathBuf>) -> PathBuf {
    if let Some(explicit) = var(SETTINGS_ENV).filter(|p| !p.as_os_str().is_empty()) {
        return explicit;
    }
    let base = var("XDG_CONFIG_HOME")
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| {
            var("HOME")
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".config")
        });
    base.join("cardspin").join("settings.json")
}

#[cfg(test)]
#[path = "../../tests/unit/settings/store.rs"]
mod tests;

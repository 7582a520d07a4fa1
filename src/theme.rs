use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;
use serde::{Serialize, Deserialize};

const THEME_PATH: &str = "~/.config/credbook/theme.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub dark_mode: bool,
}

impl Theme {
    pub fn toggle(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn mode(self) -> &'static str {
        if self.dark_mode { "dark" } else { "light" }
    }
}

// Light mode unless a readable file says otherwise
pub fn load(path: &Path) -> Theme {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return Theme::default(),
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!("Error de-serialising theme state, using default: {}", e);
        Theme::default()
    })
}

pub fn save(theme: Theme, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error ensuring path {:?} exists", parent))?;
    }
    let theme = serde_json::to_string(&theme)?;
    std::fs::write(path, theme)
        .with_context(|| "Error writing theme state")
}

pub fn toggle_default() -> Result<Theme> {
    let path = default_path()?;
    let mut theme = load(&path);
    theme.toggle();
    save(theme, &path)?;
    Ok(theme)
}

fn default_path() -> Result<PathBuf> {
    let path = shellexpand::full(THEME_PATH)
        .with_context(|| format!("Theme path {} is invalid", THEME_PATH))?;
    Ok(PathBuf::from(path.as_ref()))
}

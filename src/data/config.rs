use crate::data::assets;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    pub ui_fps: u32,

    pub icon_poll_ms: u64,
    pub label_poll_ms: u64,
    pub buttons_poll_ms: u64,
    pub metadata_poll_ms: u64,
    pub reclaim_secs: u64,

    /// Width of the album art in terminal cells. The art is square, so it
    /// occupies half as many rows.
    pub art_width_cells: u16,
    pub fetch_timeout_secs: u64,
    pub max_art_bytes: u64,

    /// Player identity to follow; empty follows whichever player is active.
    pub player: String,

    pub transparent_background: bool,
    pub ascii_borders: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "mocha".to_string(),
            ui_fps: 20,
            icon_poll_ms: 1000,
            label_poll_ms: 1000,
            buttons_poll_ms: 1000,
            metadata_poll_ms: 1000,
            reclaim_secs: 30,
            art_width_cells: 24,
            fetch_timeout_secs: 8,
            max_art_bytes: 5 * 1024 * 1024,
            player: String::new(),
            transparent_background: false,
            ascii_borders: false,
        }
    }
}

impl Config {
    pub fn load_or_default() -> Result<Self> {
        let _ = assets::ensure_assets_ready();
        let path = assets::resolve_config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Reads `path`; a file that does not parse falls back to defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        match toml::from_str::<Config>(&raw) {
            Ok(cfg) => Ok(cfg.sanitized()),
            Err(e) => {
                log::warn!("ignoring unparseable config {}: {e}", path.display());
                Ok(Self::default())
            }
        }
    }

    fn sanitized(mut self) -> Self {
        self.ui_fps = self.ui_fps.clamp(1, 60);
        self.art_width_cells = self.art_width_cells.clamp(4, 96);
        // keep the art square in half-block cells
        self.art_width_cells -= self.art_width_cells % 2;
        self.max_art_bytes = self.max_art_bytes.max(1);
        self
    }

    pub fn icon_period(&self) -> Duration {
        Duration::from_millis(self.icon_poll_ms.max(1))
    }

    pub fn label_period(&self) -> Duration {
        Duration::from_millis(self.label_poll_ms.max(1))
    }

    pub fn buttons_period(&self) -> Duration {
        Duration::from_millis(self.buttons_poll_ms.max(1))
    }

    pub fn metadata_period(&self) -> Duration {
        Duration::from_millis(self.metadata_poll_ms.max(1))
    }

    pub fn reclaim_period(&self) -> Duration {
        Duration::from_secs(self.reclaim_secs.max(1))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "theme = \"latte\"\nlabel_poll_ms = 250").unwrap();

        let cfg = Config::load_from(f.path()).unwrap();
        assert_eq!(cfg.theme, "latte");
        assert_eq!(cfg.label_period(), Duration::from_millis(250));
        assert_eq!(cfg.icon_period(), Duration::from_secs(1));
        assert_eq!(cfg.reclaim_period(), Duration::from_secs(30));
    }

    #[test]
    fn garbage_file_falls_back_to_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "this is = = not toml").unwrap();

        let cfg = Config::load_from(f.path()).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn art_width_is_clamped_and_even() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "art_width_cells = 31\nui_fps = 0").unwrap();

        let cfg = Config::load_from(f.path()).unwrap();
        assert_eq!(cfg.art_width_cells, 30);
        assert_eq!(cfg.ui_fps, 1);
    }

    #[test]
    fn shipped_default_file_matches_builtin_defaults() {
        let cfg: Config = toml::from_str(include_str!("../../config/default.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }
}

use anyhow::{Context, Result};
use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_ASSET_DIR: &str = "NOW_PLAYING_INDICATOR_DIR";

const DEFAULT_CONFIG_TOML: &str = include_str!("../../config/default.toml");

pub(crate) const THEME_FILES: [(&str, &str); 5] = [
    ("themes/system.toml", include_str!("../../themes/system.toml")),
    ("themes/catppuccin_latte.toml", include_str!("../../themes/catppuccin_latte.toml")),
    ("themes/catppuccin_frappe.toml", include_str!("../../themes/catppuccin_frappe.toml")),
    ("themes/catppuccin_macchiato.toml", include_str!("../../themes/catppuccin_macchiato.toml")),
    ("themes/catppuccin_mocha.toml", include_str!("../../themes/catppuccin_mocha.toml")),
];

pub fn resolve_asset_root() -> PathBuf {
    if let Some(p) = std::env::var_os(ENV_ASSET_DIR) {
        return PathBuf::from(p);
    }

    // Linux: $XDG_CONFIG_HOME/now-playing-indicator
    // macOS: ~/Library/Application Support/now-playing-indicator
    // Windows: %APPDATA%\now-playing-indicator
    if let Some(d) = BaseDirs::new() {
        return d.config_dir().join("now-playing-indicator");
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".config")
}

pub fn resolve_asset_path(rel: &Path) -> PathBuf {
    resolve_asset_root().join(rel)
}

pub fn resolve_config_path() -> PathBuf {
    resolve_asset_path(Path::new("config/default.toml"))
}

pub fn ensure_assets_ready() -> Result<PathBuf> {
    let root = resolve_asset_root();
    ensure_all_assets(&root)?;
    Ok(root)
}

/// Seeds `<root>/config/default.toml` and `<root>/themes/*.toml`, leaving
/// existing files untouched.
pub fn ensure_all_assets(root: &Path) -> Result<()> {
    write_if_missing(&root.join("config/default.toml"), DEFAULT_CONFIG_TOML)?;
    for (rel, contents) in THEME_FILES {
        write_if_missing(&root.join(rel), contents)?;
    }
    Ok(())
}

fn ensure_dir(p: &Path) -> Result<()> {
    fs::create_dir_all(p).with_context(|| format!("mkdir {}", p.display()))
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.is_file() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_config_and_themes_without_clobbering() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("config/default.toml");
        fs::create_dir_all(cfg.parent().unwrap()).unwrap();
        fs::write(&cfg, "theme = \"latte\"\n").unwrap();

        ensure_all_assets(dir.path()).unwrap();

        assert_eq!(fs::read_to_string(&cfg).unwrap(), "theme = \"latte\"\n");
        for (rel, contents) in THEME_FILES {
            assert_eq!(fs::read_to_string(dir.path().join(rel)).unwrap(), contents);
        }
    }
}

use crate::data::assets;
use crate::render::dominant_color::Rgb;
use crate::ui::theme::{detect_color_capability, ColorCapability, Theme, ThemeName, ThemePalette};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub struct ThemeLoader;

#[derive(Debug, Deserialize)]
struct ThemeToml {
    text: String,
    subtext: String,
    base: String,
    surface: String,
    accent: String,
    accent2: String,
}

impl ThemeLoader {
    pub fn load(name: &str) -> Result<Theme> {
        let _ = assets::ensure_assets_ready();
        let name = ThemeName::from_str_or_system(name);
        let path = assets::resolve_asset_path(Path::new(name.file_name()));
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("theme {} unreadable ({e}); using built-in copy", path.display());
                builtin(name).to_string()
            }
        };
        Self::parse(name, &raw, detect_color_capability())
    }

    pub fn parse(name: ThemeName, raw: &str, capability: ColorCapability) -> Result<Theme> {
        let t: ThemeToml = toml::from_str(raw).with_context(|| format!("parse theme {}", name.file_name()))?;
        Ok(Theme {
            name,
            palette: ThemePalette {
                text: parse_hex(&t.text),
                subtext: parse_hex(&t.subtext),
                base: parse_hex(&t.base),
                surface: parse_hex(&t.surface),
                accent: parse_hex(&t.accent),
                accent2: parse_hex(&t.accent2),
            },
            capability,
        })
    }
}

fn builtin(name: ThemeName) -> &'static str {
    assets::THEME_FILES
        .iter()
        .find(|(rel, _)| *rel == name.file_name())
        .map(|(_, contents)| *contents)
        .unwrap_or(assets::THEME_FILES[0].1)
}

fn parse_hex(s: &str) -> Rgb {
    let s = s.trim().trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        s.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .unwrap_or(255)
    };
    Rgb(channel(0..2), channel(2..4), channel(4..6))
}

use crate::render::dominant_color::Rgb;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Ansi256,
    NoColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    System,
    Latte,
    Frappe,
    Macchiato,
    Mocha,
}

impl ThemeName {
    pub fn from_str_or_system(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "latte" => Self::Latte,
            "frappe" => Self::Frappe,
            "macchiato" => Self::Macchiato,
            "mocha" => Self::Mocha,
            _ => Self::System,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ThemeName::System => "themes/system.toml",
            ThemeName::Latte => "themes/catppuccin_latte.toml",
            ThemeName::Frappe => "themes/catppuccin_frappe.toml",
            ThemeName::Macchiato => "themes/catppuccin_macchiato.toml",
            ThemeName::Mocha => "themes/catppuccin_mocha.toml",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub text: Rgb,
    pub subtext: Rgb,
    pub base: Rgb,
    pub surface: Rgb,
    pub accent: Rgb,
    pub accent2: Rgb,
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: ThemeName,
    pub palette: ThemePalette,
    pub capability: ColorCapability,
}

impl Theme {
    pub fn color_text(&self) -> Color {
        self.color(self.palette.text)
    }
    pub fn color_subtext(&self) -> Color {
        self.color(self.palette.subtext)
    }
    pub fn color_base(&self) -> Color {
        self.color(self.palette.base)
    }
    pub fn color_surface(&self) -> Color {
        self.color(self.palette.surface)
    }
    pub fn color_accent(&self) -> Color {
        self.color(self.palette.accent)
    }
    pub fn color_accent2(&self) -> Color {
        self.color(self.palette.accent2)
    }

    /// Maps an arbitrary RGB (album tint, cover pixels) through the
    /// terminal's color capability.
    pub fn color(&self, rgb: Rgb) -> Color {
        map_color(self.capability, rgb)
    }

    /// Text color readable on top of `bg`.
    pub fn text_on(&self, bg: Rgb) -> Color {
        if bg.luminance() > 150 {
            self.color(Rgb(0x11, 0x11, 0x1b))
        } else {
            self.color(Rgb(0xf5, 0xf5, 0xf5))
        }
    }
}

pub fn detect_color_capability() -> ColorCapability {
    let colorterm = std::env::var("COLORTERM").unwrap_or_default().to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorCapability::TrueColor;
    }

    let term = std::env::var("TERM").unwrap_or_default().to_lowercase();
    if term.contains("256color") {
        return ColorCapability::Ansi256;
    }

    ColorCapability::NoColor
}

fn map_color(cap: ColorCapability, t: Rgb) -> Color {
    match cap {
        ColorCapability::TrueColor => Color::Rgb(t.0, t.1, t.2),
        ColorCapability::Ansi256 => Color::Indexed(rgb_to_ansi256(t.0, t.1, t.2)),
        ColorCapability::NoColor => Color::Reset,
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    // 6x6x6 color cube, 16..231
    let r6 = (r as u16 * 5 / 255) as u8;
    let g6 = (g as u16 * 5 / 255) as u8;
    let b6 = (b as u16 * 5 / 255) as u8;
    16 + 36 * r6 + 6 * g6 + b6
}

use crate::playback::error::ArtError;
use crate::render::dominant_color::Rgb;
use crate::ui::theme::{ColorCapability, Theme};
use image::imageops::FilterType;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

pub const COVER_CHARSET: &str = " ░▒▓█";

const UPPER_HALF: &str = "▀";

/// Album art scaled to its fixed display size. Each terminal cell shows two
/// vertically stacked pixels, so a `width` x `width` bitmap fills
/// `width` columns and `width / 2` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverCells {
    pub width: u16,
    pub height: u16,
    /// Row-major, `width * height * 2` pixels.
    pixels: Vec<Rgb>,
}

impl CoverCells {
    fn pixel(&self, x: u16, y: u16) -> Rgb {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    pub fn approx_bytes(&self) -> usize {
        self.pixels.capacity() * std::mem::size_of::<Rgb>()
    }
}

pub fn scale_cover(image_bytes: &[u8], width: u16) -> Result<CoverCells, ArtError> {
    let img = image::load_from_memory(image_bytes)?;
    let side = width.max(2) as u32;
    // Triangle is a bilinear filter; Lanczos is noticeably slower on big covers.
    let rgb = img.resize_exact(side, side, FilterType::Triangle).to_rgb8();

    let pixels = rgb.pixels().map(|p| Rgb(p.0[0], p.0[1], p.0[2])).collect();
    Ok(CoverCells {
        width: side as u16,
        height: (side / 2) as u16,
        pixels,
    })
}

pub fn cover_lines(cover: &CoverCells, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(cover.height as usize);
    for row in 0..cover.height {
        let top_y = row * 2;
        let line = match theme.capability {
            ColorCapability::NoColor => {
                let text: String = (0..cover.width)
                    .map(|x| luma_char(cover.pixel(x, top_y), cover.pixel(x, top_y + 1)))
                    .collect();
                Line::from(text)
            }
            _ => Line::from(
                (0..cover.width)
                    .map(|x| {
                        let top = cover.pixel(x, top_y);
                        let bottom = cover.pixel(x, top_y + 1);
                        Span::styled(UPPER_HALF, Style::default().fg(theme.color(top)).bg(theme.color(bottom)))
                    })
                    .collect::<Vec<_>>(),
            ),
        };
        lines.push(line);
    }
    lines
}

fn luma_char(top: Rgb, bottom: Rgb) -> char {
    let luma = (top.luminance() as usize + bottom.luminance() as usize) / 2;
    let charset: Vec<char> = COVER_CHARSET.chars().collect();
    charset[luma * (charset.len() - 1) / 255]
}

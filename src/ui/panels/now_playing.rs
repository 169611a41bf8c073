use crate::app::state::{AppState, PlaybackStatus};
use crate::render::cover_renderer::cover_lines;
use crate::ui::borders::border_set;
use crate::ui::components::control_buttons;
use crate::utils::text::pad_to;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const MIN_INNER_WIDTH: u16 = 28;
const LABEL_ROWS: u16 = 3;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub panel: Rect,
    pub header: Rect,
    pub art: Rect,
    pub label: Rect,
    pub buttons: [Rect; 3],
}

/// Stacks header, art, label and buttons top to bottom. Hidden elements take
/// no rows, so the panel shrinks the way a menu does.
pub fn layout(area: Rect, app: &AppState) -> PanelLayout {
    let art_rows = match (&app.art.cover, app.art.visible) {
        (Some(cover), true) => cover.height,
        _ => 0,
    };
    let label_rows = if app.label.visible { LABEL_ROWS } else { 0 };

    let inner_w = MIN_INNER_WIDTH.max(app.config.art_width_cells);
    let width = (inner_w + 2).min(area.width);
    let height = (2 + 1 + art_rows + label_rows + 1 + 3).min(area.height);
    let panel = Rect {
        x: area.x,
        y: area.y,
        width,
        height,
    };

    let inner = panel.inner(&ratatui::layout::Margin { horizontal: 1, vertical: 1 });
    let bottom = inner.y + inner.height;
    let mut y = inner.y;
    let mut take = |rows: u16| {
        let h = rows.min(bottom.saturating_sub(y));
        let r = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: h,
        };
        y += h;
        r
    };

    let header = take(1);
    let art = take(art_rows);
    let label = take(label_rows);
    let _gap = take(1);
    let buttons = [take(1), take(1), take(1)];

    PanelLayout {
        panel,
        header,
        art,
        label,
        buttons,
    }
}

pub fn render(f: &mut Frame, l: &PanelLayout, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border_set(app.config.ascii_borders))
        .title(" Now Playing ")
        .style(Style::default().fg(app.theme.color_subtext()));
    f.render_widget(block, l.panel);

    render_header(f, l.header, app);
    render_art(f, l.art, app);
    render_label(f, l.label, app);
    control_buttons::render(f, l.buttons, app);
}

fn status_text(status: PlaybackStatus) -> &'static str {
    match status {
        PlaybackStatus::Playing => "Playing",
        PlaybackStatus::Paused => "Paused",
        PlaybackStatus::Stopped => "Stopped",
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    if area.height == 0 {
        return;
    }
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.icon.glyph()),
            Style::default().fg(app.theme.color_accent2()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(status_text(app.status), Style::default().fg(app.theme.color_text())),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_art(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(cover) = app.art.cover.as_ref().filter(|_| app.art.visible) else {
        return;
    };
    if area.height == 0 {
        return;
    }

    let mut style = Style::default();
    if let Some(tint) = app.art.tint {
        style = style.bg(app.theme.color(tint.art));
    }
    f.render_widget(Block::default().style(style), area);
    f.render_widget(
        Paragraph::new(cover_lines(cover, &app.theme)).alignment(Alignment::Center),
        area,
    );
}

fn render_label(f: &mut Frame, area: Rect, app: &AppState) {
    if area.height == 0 || !app.label.visible {
        return;
    }

    let style = match app.art.tint {
        Some(tint) => Style::default()
            .bg(app.theme.color(tint.label))
            .fg(app.theme.text_on(tint.label)),
        None => Style::default()
            .bg(app.theme.color_surface())
            .fg(app.theme.color_text()),
    };

    let width = area.width as usize;
    let lines: Vec<Line> = app
        .label
        .text
        .split('\n')
        .take(LABEL_ROWS as usize)
        .enumerate()
        .map(|(i, part)| {
            let row_style = if i == 0 { style.add_modifier(Modifier::BOLD) } else { style };
            Line::styled(pad_to(&format!(" {part}"), width), row_style)
        })
        .collect();
    f.render_widget(Paragraph::new(lines).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::cover_renderer::scale_cover;
    use crate::test_support::{app_state, png_bytes};
    use image::{Rgba, RgbaImage};

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 40,
    };

    #[test]
    fn stopped_panel_is_compact() {
        let app = app_state();
        let l = layout(SCREEN, &app);
        assert_eq!(l.art.height, 0);
        assert_eq!(l.label.height, 0);
        assert_eq!(l.panel.height, 2 + 1 + 1 + 3);
        assert_eq!(l.buttons[2].y, l.panel.y + l.panel.height - 2);
    }

    #[test]
    fn visible_art_and_label_expand_the_panel() {
        let mut app = app_state();
        app.set_buttons(PlaybackStatus::Playing);
        app.set_label("a\nb\nc".to_string());
        let bytes = png_bytes(&RgbaImage::from_pixel(8, 8, Rgba([9, 9, 9, 255])));
        app.art.cover = Some(scale_cover(&bytes, 24).unwrap());
        app.art.visible = true;

        let l = layout(SCREEN, &app);
        assert_eq!(l.art.height, 12);
        assert_eq!(l.label.height, 3);
        assert_eq!(l.label.y, l.art.y + 12);
        assert_eq!(l.panel.height, 2 + 1 + 12 + 3 + 1 + 3);
    }

    #[test]
    fn tiny_terminal_clips_instead_of_overflowing() {
        let app = app_state();
        let small = Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 4,
        };
        let l = layout(small, &app);
        assert!(l.panel.height <= 4);
        for r in l.buttons {
            assert!(r.y + r.height <= small.height);
        }
    }
}

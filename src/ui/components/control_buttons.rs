use crate::app::state::{AppState, ControlButton};
use crate::utils::text::pad_to;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const ORDER: [ControlButton; 3] = [ControlButton::PlayPause, ControlButton::Previous, ControlButton::Next];

pub fn caption(app: &AppState, button: ControlButton) -> (&'static str, &'static str) {
    match button {
        ControlButton::PlayPause => (app.buttons.play.glyph(), app.buttons.play.text()),
        ControlButton::Previous => ("⏮", "Previous"),
        ControlButton::Next => ("⏭", "Next"),
    }
}

/// One menu row per button, matching `ORDER`.
pub fn render(f: &mut Frame, rows: [Rect; 3], app: &AppState) {
    let style = if app.buttons.enabled {
        Style::default().fg(app.theme.color_text())
    } else {
        Style::default()
            .fg(app.theme.color_subtext())
            .add_modifier(Modifier::DIM)
    };
    let glyph_style = if app.buttons.enabled {
        style.fg(app.theme.color_accent())
    } else {
        style
    };

    for (button, area) in ORDER.into_iter().zip(rows) {
        if area.height == 0 {
            continue;
        }
        let (glyph, text) = caption(app, button);
        let line = Line::from(vec![
            Span::styled(format!(" {glyph} "), glyph_style),
            Span::styled(pad_to(text, area.width.saturating_sub(3) as usize), style),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }
}

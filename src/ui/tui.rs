use crate::app::state::{AppState, ControlButton};
use crate::ui::components::control_buttons;
use crate::ui::panels::now_playing::{self, PanelLayout};
use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Terminal;
use std::io::{self, Stdout};

const FOOTER: &str = "Space Play/Pause  ←/→ Prev/Next  Q Quit";

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, event::EnableMouseCapture)?;
        self.terminal.hide_cursor()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(io::stdout(), event::DisableMouseCapture, LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    pub fn draw(&mut self, app: &AppState) -> Result<PanelLayout> {
        let mut layout_out = PanelLayout::default();

        self.terminal.draw(|f| {
            let size = f.size();
            f.render_widget(Clear, size);

            let mut base_style = Style::default().fg(app.theme.color_text());
            if !app.config.transparent_background {
                base_style = base_style.bg(app.theme.color_base());
            }
            f.render_widget(Block::default().style(base_style), size);

            if size.width < 20 || size.height < 8 {
                f.render_widget(
                    Paragraph::new("Terminal too small").style(Style::default().fg(app.theme.color_subtext())),
                    size,
                );
                return;
            }

            let body = Rect {
                height: size.height.saturating_sub(1),
                ..size
            };
            layout_out = now_playing::layout(body, app);
            now_playing::render(f, &layout_out, app);

            let footer_area = Rect {
                x: size.x,
                y: size.y + size.height.saturating_sub(1),
                width: size.width,
                height: 1,
            };
            f.render_widget(
                Paragraph::new(FOOTER).style(Style::default().fg(app.theme.color_subtext())),
                footer_area,
            );
        })?;

        Ok(layout_out)
    }
}

pub fn hit_test(layout: &PanelLayout, col: u16, row: u16) -> Option<ControlButton> {
    control_buttons::ORDER
        .into_iter()
        .zip(layout.buttons)
        .find(|(_, r)| contains(*r, col, row))
        .map(|(b, _)| b)
}

fn contains(r: Rect, col: u16, row: u16) -> bool {
    col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

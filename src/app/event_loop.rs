use crate::app::poller;
use crate::app::state::AppState;
use crate::app::timers::PollSchedule;
use crate::playback::mpris_client::MprisClient;
use crate::playback::proxy::PlayerProxy;
use crate::ui::panels::now_playing::PanelLayout;
use crate::ui::tui::{self, Tui};
use crate::utils::input::{map_key, map_mouse, Action};
use anyhow::Result;
use crossterm::event::{self, Event};
use std::time::{Duration, Instant};

pub fn run(app: &mut AppState) -> Result<()> {
    let mut tui = Tui::new()?;
    tui.enter()?;

    let mut proxy = MprisClient::new(&app.config.player);
    let res = run_loop(app, &mut tui, &mut proxy);

    // restore the terminal even when the loop failed
    tui.exit()?;
    res
}

fn run_loop(app: &mut AppState, tui: &mut Tui, proxy: &mut dyn PlayerProxy) -> Result<()> {
    let mut schedule = PollSchedule::from_config(&app.config, Instant::now());
    poller::refresh_all(app, proxy);

    let mut last_layout = PanelLayout::default();

    loop {
        let frame_start = Instant::now();

        // deferred results from art workers
        app.drain_deferred();

        while event::poll(Duration::from_millis(0))? {
            let action = match event::read()? {
                Event::Key(k) => map_key(k),
                Event::Mouse(m) => map_mouse(m),
                _ => Action::None,
            };
            handle_action(app, proxy, action, &last_layout);
        }

        for kind in schedule.due(frame_start) {
            poller::fire(kind, app, proxy);
        }

        last_layout = tui.draw(app)?;

        if app.should_quit {
            break;
        }

        // sleep until the next frame, or earlier if a timer is due sooner
        let mut wake = frame_start + fps_to_dt(app.config.ui_fps);
        if let Some(deadline) = schedule.next_deadline() {
            wake = wake.min(deadline);
        }
        let now = Instant::now();
        if wake > now {
            std::thread::sleep(wake - now);
        }
    }

    Ok(())
}

fn fps_to_dt(fps: u32) -> Duration {
    Duration::from_millis(1000 / fps.clamp(1, 60) as u64)
}

fn handle_action(app: &mut AppState, proxy: &mut dyn PlayerProxy, action: Action, layout: &PanelLayout) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::Press(button) => {
            poller::activate(app, proxy, button);
        }
        Action::MouseClick { col, row } => {
            if let Some(button) = tui::hit_test(layout, col, row) {
                poller::activate(app, proxy, button);
            }
        }
        Action::None => {}
    }
}

use crate::app::state::{AppState, ControlButton, PlaybackStatus, TrackMetadata};
use crate::app::timers::TimerKind;
use crate::playback::error::PlayerError;
use crate::playback::proxy::PlayerProxy;

pub fn fire(kind: TimerKind, app: &mut AppState, proxy: &mut dyn PlayerProxy) {
    match kind {
        TimerKind::Icon => refresh_icon(app, proxy),
        TimerKind::Label => refresh_label(app, proxy),
        TimerKind::Buttons => refresh_buttons(app, proxy),
        TimerKind::Metadata => {
            watch_metadata(app, proxy);
        }
        TimerKind::Reclaim => {
            let freed = app.reclaim();
            if freed > 0 {
                log::debug!("reclaimed ~{freed} bytes");
            }
        }
    }
}

/// First paint: every refresh once, plus the initial art fetch.
pub fn refresh_all(app: &mut AppState, proxy: &mut dyn PlayerProxy) {
    refresh_buttons(app, proxy);
    refresh_icon(app, proxy);
    refresh_label(app, proxy);
    if !watch_metadata(app, proxy) {
        app.start_art_fetch(None);
    }
}

fn read_status(proxy: &mut dyn PlayerProxy) -> PlaybackStatus {
    proxy.status().unwrap_or_else(|e| {
        log::debug!("status unavailable: {e}");
        PlaybackStatus::Stopped
    })
}

pub fn refresh_icon(app: &mut AppState, proxy: &mut dyn PlayerProxy) {
    let status = read_status(proxy);
    app.set_icon(status);
}

pub fn refresh_label(app: &mut AppState, proxy: &mut dyn PlayerProxy) {
    match read_label(proxy) {
        Ok(text) => app.set_label(text),
        Err(e) => {
            log::debug!("metadata unavailable: {e}");
            app.clear_label();
        }
    }
}

fn read_label(proxy: &mut dyn PlayerProxy) -> Result<String, PlayerError> {
    let track = TrackMetadata {
        title: proxy.title()?,
        album: proxy.album()?,
        artist: proxy.artist()?,
        art_url: None,
    };
    Ok(track.label_text())
}

/// Re-acquires the player before reading, so a player that started since
/// the last tick is picked up.
pub fn refresh_buttons(app: &mut AppState, proxy: &mut dyn PlayerProxy) {
    proxy.reacquire();
    let status = read_status(proxy);
    app.set_buttons(status);
}

/// Starts an art fetch when the track metadata differs from the last read.
/// Returns whether a fetch was started.
pub fn watch_metadata(app: &mut AppState, proxy: &mut dyn PlayerProxy) -> bool {
    let current: Option<TrackMetadata> = match proxy.metadata() {
        Ok(m) => m,
        Err(e) => {
            log::debug!("metadata watch: {e}");
            app.last_metadata = None;
            return false;
        }
    };

    if app.last_metadata.as_ref() == Some(&current) {
        return false;
    }

    let art_url = current.as_ref().and_then(|m| m.art_url.clone());
    app.last_metadata = Some(current);
    app.start_art_fetch(art_url);
    true
}

/// Runs a transport command. Disabled buttons do nothing.
pub fn activate(app: &AppState, proxy: &mut dyn PlayerProxy, button: ControlButton) -> bool {
    if !app.buttons.enabled {
        return false;
    }
    let res = match button {
        ControlButton::PlayPause => proxy.play_pause(),
        ControlButton::Previous => proxy.previous(),
        ControlButton::Next => proxy.next(),
    };
    match res {
        Ok(()) => true,
        Err(e) => {
            log::debug!("{button:?} failed: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::PlayLabel;
    use crate::playback::art_fetch::Deferred;
    use crate::render::cover_renderer::scale_cover;
    use crate::test_support::{app_state, png_bytes, FakePlayer};
    use image::{Rgba, RgbaImage};

    fn track(art: Option<&str>) -> TrackMetadata {
        TrackMetadata {
            title: "Windowlicker".into(),
            album: "Windowlicker".into(),
            artist: "Aphex Twin".into(),
            art_url: art.map(str::to_string),
        }
    }

    #[test]
    fn playing_player_enables_pause_button_and_label() {
        let mut app = app_state();
        let mut player = FakePlayer::playing(track(None));

        refresh_buttons(&mut app, &mut player);
        refresh_icon(&mut app, &mut player);
        refresh_label(&mut app, &mut player);

        assert!(app.buttons.enabled);
        assert_eq!(app.buttons.play, PlayLabel::Pause);
        assert_eq!(app.icon.icon_name(), "media-playback-start");
        assert!(app.label.visible);
        assert_eq!(app.label.text, "Windowlicker\nWindowlicker\nAphex Twin");
        assert_eq!(player.reacquired, 1);
    }

    #[test]
    fn unavailable_service_degrades_to_neutral_state() {
        let mut app = app_state();
        let mut player = FakePlayer::playing(track(None));
        refresh_buttons(&mut app, &mut player);
        refresh_label(&mut app, &mut player);

        player.fail = true;
        refresh_buttons(&mut app, &mut player);
        refresh_icon(&mut app, &mut player);
        refresh_label(&mut app, &mut player);

        assert!(!app.buttons.enabled);
        assert_eq!(app.status, PlaybackStatus::Stopped);
        assert_eq!(app.icon.icon_name(), "media-playback-stop");
        assert!(!app.label.visible);
        assert!(app.label.text.is_empty());
    }

    #[test]
    fn no_active_track_hides_label() {
        let mut app = app_state();
        let mut player = FakePlayer::playing(track(None));
        player.metadata = None;

        refresh_buttons(&mut app, &mut player);
        refresh_label(&mut app, &mut player);
        assert!(!app.label.visible);
    }

    #[test]
    fn metadata_watch_fetches_once_per_change() {
        let mut app = app_state();
        let mut player = FakePlayer::playing(track(Some("not a url")));

        assert!(watch_metadata(&mut app, &mut player));
        assert!(!watch_metadata(&mut app, &mut player));
        assert_eq!(app.art_generation, 1);

        player.metadata = Some(track(Some("file:///nonexistent/cover.png")));
        assert!(watch_metadata(&mut app, &mut player));
        assert_eq!(app.art_generation, 2);
    }

    #[test]
    fn watch_failure_forces_refetch_after_recovery() {
        let mut app = app_state();
        let mut player = FakePlayer::playing(track(None));
        assert!(watch_metadata(&mut app, &mut player));

        player.fail = true;
        assert!(!watch_metadata(&mut app, &mut player));
        player.fail = false;
        assert!(watch_metadata(&mut app, &mut player));
    }

    #[test]
    fn malformed_art_url_hides_art_without_crashing() {
        let mut app = app_state();
        let mut player = FakePlayer::playing(track(Some("::not a url::")));
        refresh_buttons(&mut app, &mut player);
        app.art.visible = true;

        assert!(watch_metadata(&mut app, &mut player));
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while app.drain_deferred() == 0 && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(!app.art.visible);
    }

    #[test]
    fn disabled_buttons_ignore_activation() {
        let mut app = app_state();
        let mut player = FakePlayer::playing(track(None));
        assert!(!activate(&app, &mut player, ControlButton::Next));
        assert!(player.commands.is_empty());

        refresh_buttons(&mut app, &mut player);
        assert!(activate(&app, &mut player, ControlButton::Next));
        assert!(activate(&app, &mut player, ControlButton::PlayPause));
        assert!(activate(&app, &mut player, ControlButton::Previous));
        assert_eq!(player.commands, ["next", "play_pause", "previous"]);
    }

    #[test]
    fn startup_refresh_always_issues_a_fetch() {
        let mut app = app_state();
        let mut player = FakePlayer::playing(track(None));
        player.fail = true;
        refresh_all(&mut app, &mut player);
        assert_eq!(app.art_generation, 1);
    }

    #[test]
    fn stopped_player_does_not_refetch_unchanged_art() {
        let mut app = app_state();
        let mut player = FakePlayer::playing(track(Some("file:///nonexistent/cover.png")));
        player.status = PlaybackStatus::Stopped;
        refresh_buttons(&mut app, &mut player);

        assert!(watch_metadata(&mut app, &mut player));
        let generation = app.art_generation;
        let bytes = png_bytes(&RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255])));
        let cover = scale_cover(&bytes, 4).unwrap();
        assert!(app.apply_deferred(Deferred::ApplyCover { generation, cover }));

        for _ in 0..4 {
            fire(TimerKind::Reclaim, &mut app, &mut player);
            for _ in 0..30 {
                assert!(!watch_metadata(&mut app, &mut player));
            }
        }
        assert_eq!(app.art_generation, generation);
        assert!(app.art.cover.is_some());
    }

    #[test]
    fn reclaim_timer_is_harmless_on_empty_state() {
        let mut app = app_state();
        let mut player = FakePlayer::playing(track(None));
        fire(TimerKind::Reclaim, &mut app, &mut player);
        assert!(player.commands.is_empty());
    }
}

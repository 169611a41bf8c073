use crate::data::config::Config;
use crate::playback::art_fetch::{self, ArtRequest, Deferred, FetchOptions};
use crate::render::cover_renderer::CoverCells;
use crate::render::dominant_color::Tint;
use crate::ui::theme::Theme;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    /// Also covers "unknown": an unreadable status maps here.
    Stopped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: String,
    pub album: String,
    pub artist: String,
    pub art_url: Option<String>,
}

impl TrackMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty()
            && self.album.trim().is_empty()
            && self.artist.trim().is_empty()
            && self.art_url.is_none()
    }

    pub fn label_text(&self) -> String {
        format!("{}\n{}\n{}", self.title, self.album, self.artist)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorIcon {
    Start,
    Pause,
    Stop,
}

impl IndicatorIcon {
    pub fn for_status(status: PlaybackStatus) -> Self {
        match status {
            PlaybackStatus::Playing => Self::Start,
            PlaybackStatus::Paused => Self::Pause,
            PlaybackStatus::Stopped => Self::Stop,
        }
    }

    /// Freedesktop icon-theme name.
    pub fn icon_name(self) -> &'static str {
        match self {
            Self::Start => "media-playback-start",
            Self::Pause => "media-playback-pause",
            Self::Stop => "media-playback-stop",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Start => "▶",
            Self::Pause => "⏸",
            Self::Stop => "■",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayLabel {
    Play,
    Pause,
}

impl PlayLabel {
    pub fn text(self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Pause => "Pause",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Play => "▶",
            Self::Pause => "⏸",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    PlayPause,
    Previous,
    Next,
}

/// Play/Pause, Previous and Next share one sensitivity flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonsState {
    pub enabled: bool,
    pub play: PlayLabel,
}

impl Default for ButtonsState {
    fn default() -> Self {
        Self {
            enabled: false,
            play: PlayLabel::Play,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NowPlayingLabel {
    pub text: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ArtPanel {
    pub visible: bool,
    pub cover: Option<CoverCells>,
    pub tint: Option<Tint>,
}

/// Everything the presentation layer draws. Only the UI thread touches it.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub theme: Theme,

    pub status: PlaybackStatus,
    pub icon: IndicatorIcon,
    pub label: NowPlayingLabel,
    pub buttons: ButtonsState,
    pub art: ArtPanel,

    /// Last metadata seen by the change watch; `None` before the first read.
    pub last_metadata: Option<Option<TrackMetadata>>,
    /// Bumped on every fetch; results from older fetches are dropped.
    pub art_generation: u64,

    deferred_tx: Sender<Deferred>,
    deferred_rx: Receiver<Deferred>,

    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: Config, theme: Theme) -> Self {
        let (deferred_tx, deferred_rx) = mpsc::channel::<Deferred>();
        Self {
            config,
            theme,
            status: PlaybackStatus::Stopped,
            icon: IndicatorIcon::Stop,
            label: NowPlayingLabel::default(),
            buttons: ButtonsState::default(),
            art: ArtPanel::default(),
            last_metadata: None,
            art_generation: 0,
            deferred_tx,
            deferred_rx,
            should_quit: false,
        }
    }

    pub fn set_icon(&mut self, status: PlaybackStatus) {
        self.status = status;
        let icon = IndicatorIcon::for_status(status);
        if icon != self.icon {
            log::debug!("indicator icon -> {}", icon.icon_name());
        }
        self.icon = icon;
    }

    /// Whitespace-only text hides the label, as does a stopped player.
    pub fn set_label(&mut self, text: String) {
        self.label.visible = !text.trim().is_empty() && self.status != PlaybackStatus::Stopped;
        self.label.text = text;
    }

    pub fn clear_label(&mut self) {
        self.label.text.clear();
        self.label.visible = false;
    }

    pub fn set_buttons(&mut self, status: PlaybackStatus) {
        self.status = status;
        match status {
            PlaybackStatus::Playing => {
                self.buttons = ButtonsState {
                    enabled: true,
                    play: PlayLabel::Pause,
                };
                self.art.visible = self.art.cover.is_some();
            }
            PlaybackStatus::Paused => {
                self.buttons = ButtonsState {
                    enabled: true,
                    play: PlayLabel::Play,
                };
                self.art.visible = self.art.cover.is_some();
            }
            PlaybackStatus::Stopped => {
                self.buttons.enabled = false;
                self.label.visible = false;
                self.art.visible = false;
            }
        }
    }

    /// Starts a background fetch for `art_url`. The worker always runs to
    /// completion; only the newest generation's results are applied.
    pub fn start_art_fetch(&mut self, art_url: Option<String>) {
        self.art_generation = self.art_generation.wrapping_add(1);
        let req = ArtRequest {
            generation: self.art_generation,
            url: art_url,
            options: FetchOptions::from_config(&self.config, self.theme.palette.base),
        };
        if let Err(e) = art_fetch::spawn_fetch(req, self.deferred_tx.clone()) {
            log::warn!("could not spawn art worker: {e}");
            self.hide_art();
        }
    }

    /// Applies every queued worker result. Returns how many were applied.
    pub fn drain_deferred(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.deferred_rx.try_recv() {
                Ok(msg) => {
                    if self.apply_deferred(msg) {
                        applied += 1;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    pub fn apply_deferred(&mut self, msg: Deferred) -> bool {
        if msg.generation() != self.art_generation {
            log::debug!(
                "dropping stale art result (generation {} < {})",
                msg.generation(),
                self.art_generation
            );
            return false;
        }
        match msg {
            Deferred::ApplyCover { cover, .. } => {
                self.art.cover = Some(cover);
                // the tint, if any, follows in its own message
                self.art.tint = None;
                self.art.visible = self.status != PlaybackStatus::Stopped;
            }
            Deferred::ApplyTint { tint, .. } => {
                self.art.tint = Some(tint);
            }
            Deferred::HideArt { reason, .. } => {
                log::debug!("hiding album art: {reason}");
                self.hide_art();
            }
        }
        true
    }

    pub fn hide_art(&mut self) {
        self.art.visible = false;
        self.art.cover = None;
        self.art.tint = None;
    }

    /// Releases memory the display no longer needs. Returns the number of
    /// bytes released (approximate).
    pub fn reclaim(&mut self) -> usize {
        let mut freed = 0;
        // a stopped player keeps its cover so resuming needs no refetch
        if !self.art.visible && self.status != PlaybackStatus::Stopped {
            if let Some(cover) = self.art.cover.take() {
                freed += cover.approx_bytes();
                // the watch refetches once the player is back
                self.last_metadata = None;
            }
        }
        let before = self.label.text.capacity();
        self.label.text.shrink_to_fit();
        freed += before - self.label.text.capacity();
        freed
    }

    #[cfg(test)]
    pub(crate) fn deferred_sender(&self) -> Sender<Deferred> {
        self.deferred_tx.clone()
    }
}

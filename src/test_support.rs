use crate::app::state::{AppState, PlaybackStatus, TrackMetadata};
use crate::data::config::Config;
use crate::data::theme_loader::ThemeLoader;
use crate::playback::error::PlayerError;
use crate::playback::proxy::PlayerProxy;
use crate::ui::theme::{ColorCapability, Theme, ThemeName};
use image::RgbaImage;

pub fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut out, image::ImageOutputFormat::Png)
        .unwrap();
    out.into_inner()
}

pub fn theme_with(capability: ColorCapability) -> Theme {
    let raw = include_str!("../themes/catppuccin_mocha.toml");
    ThemeLoader::parse(ThemeName::Mocha, raw, capability).unwrap()
}

pub fn app_state() -> AppState {
    AppState::new(Config::default(), theme_with(ColorCapability::TrueColor))
}

/// In-memory player: answers from its fields, records commands.
pub struct FakePlayer {
    pub status: PlaybackStatus,
    pub metadata: Option<TrackMetadata>,
    pub fail: bool,
    pub reacquired: usize,
    pub commands: Vec<&'static str>,
}

impl FakePlayer {
    pub fn playing(track: TrackMetadata) -> Self {
        Self {
            status: PlaybackStatus::Playing,
            metadata: Some(track),
            fail: false,
            reacquired: 0,
            commands: Vec::new(),
        }
    }

    fn check(&self) -> Result<(), PlayerError> {
        if self.fail {
            return Err(PlayerError::Unavailable("fake player gone".to_string()));
        }
        Ok(())
    }

    fn record(&mut self, command: &'static str) -> Result<(), PlayerError> {
        self.check()?;
        self.commands.push(command);
        Ok(())
    }
}

impl PlayerProxy for FakePlayer {
    fn status(&mut self) -> Result<PlaybackStatus, PlayerError> {
        self.check()?;
        Ok(self.status)
    }

    fn metadata(&mut self) -> Result<Option<TrackMetadata>, PlayerError> {
        self.check()?;
        Ok(self.metadata.clone())
    }

    fn play_pause(&mut self) -> Result<(), PlayerError> {
        self.record("play_pause")
    }

    fn next(&mut self) -> Result<(), PlayerError> {
        self.record("next")
    }

    fn previous(&mut self) -> Result<(), PlayerError> {
        self.record("previous")
    }

    fn reacquire(&mut self) {
        self.reacquired += 1;
    }
}

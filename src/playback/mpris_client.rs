#[cfg(target_os = "linux")]
mod imp {
    use crate::app::state::{PlaybackStatus, TrackMetadata};
    use crate::playback::error::PlayerError;
    use crate::playback::proxy::PlayerProxy;
    use mpris::{Player, PlayerFinder};

    pub struct MprisClient {
        finder: Option<PlayerFinder>,
        preferred: String,
        player: Option<Player>,
    }

    impl MprisClient {
        /// `preferred` is a player identity such as "Spotify"; empty follows
        /// the active player.
        pub fn new(preferred: &str) -> Self {
            Self {
                finder: connect_finder(),
                preferred: preferred.trim().to_string(),
                player: None,
            }
        }

        fn player(&mut self) -> Result<&Player, PlayerError> {
            if self.finder.is_none() {
                self.finder = connect_finder();
            }
            let finder = self
                .finder
                .as_ref()
                .ok_or_else(|| PlayerError::Unavailable("no session bus".to_string()))?;

            if self.player.as_ref().map(|p| !p.is_running()).unwrap_or(true) {
                let found = if self.preferred.is_empty() {
                    finder.find_active()
                } else {
                    finder.find_by_name(&self.preferred)
                };
                let p = found.map_err(|e| PlayerError::Unavailable(e.to_string()))?;
                log::debug!("following player {}", p.identity());
                self.player = Some(p);
            }

            self.player
                .as_ref()
                .ok_or_else(|| PlayerError::Unavailable("no player".to_string()))
        }

        fn command(
            &mut self,
            command: &'static str,
            f: impl FnOnce(&Player) -> Result<(), mpris::DBusError>,
        ) -> Result<(), PlayerError> {
            let res = f(self.player()?);
            res.map_err(|e| {
                self.player = None;
                PlayerError::Command {
                    command,
                    reason: e.to_string(),
                }
            })
        }
    }

    impl PlayerProxy for MprisClient {
        fn status(&mut self) -> Result<PlaybackStatus, PlayerError> {
            let res = self.player()?.get_playback_status();
            match res {
                Ok(mpris::PlaybackStatus::Playing) => Ok(PlaybackStatus::Playing),
                Ok(mpris::PlaybackStatus::Paused) => Ok(PlaybackStatus::Paused),
                Ok(mpris::PlaybackStatus::Stopped) => Ok(PlaybackStatus::Stopped),
                Err(e) => {
                    self.player = None;
                    Err(PlayerError::Property {
                        property: "status",
                        reason: e.to_string(),
                    })
                }
            }
        }

        fn metadata(&mut self) -> Result<Option<TrackMetadata>, PlayerError> {
            let res = self.player()?.get_metadata();
            let m = match res {
                Ok(m) => m,
                Err(e) => {
                    self.player = None;
                    return Err(PlayerError::Property {
                        property: "metadata",
                        reason: e.to_string(),
                    });
                }
            };

            let track = TrackMetadata {
                title: m.title().unwrap_or_default().to_string(),
                album: m.album_name().unwrap_or_default().to_string(),
                artist: m
                    .artists()
                    .map(|a| a.join(", "))
                    .unwrap_or_default(),
                art_url: m.art_url().map(str::to_string).filter(|u| !u.trim().is_empty()),
            };
            if track.is_empty() {
                return Ok(None);
            }
            Ok(Some(track))
        }

        fn play_pause(&mut self) -> Result<(), PlayerError> {
            self.command("play_pause", |p| p.play_pause())
        }

        fn next(&mut self) -> Result<(), PlayerError> {
            self.command("next", |p| p.next())
        }

        fn previous(&mut self) -> Result<(), PlayerError> {
            self.command("previous", |p| p.previous())
        }

        fn reacquire(&mut self) {
            self.player = None;
        }
    }

    fn connect_finder() -> Option<PlayerFinder> {
        match PlayerFinder::new() {
            Ok(f) => Some(f),
            Err(e) => {
                log::warn!("mpris finder init failed: {e}");
                None
            }
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod imp {
    use crate::app::state::{PlaybackStatus, TrackMetadata};
    use crate::playback::error::PlayerError;
    use crate::playback::proxy::PlayerProxy;

    pub struct MprisClient;

    impl MprisClient {
        pub fn new(_preferred: &str) -> Self {
            Self
        }
    }

    fn unavailable() -> PlayerError {
        PlayerError::Unavailable("MPRIS is only available on Linux".to_string())
    }

    impl PlayerProxy for MprisClient {
        fn status(&mut self) -> Result<PlaybackStatus, PlayerError> {
            Err(unavailable())
        }

        fn metadata(&mut self) -> Result<Option<TrackMetadata>, PlayerError> {
            Err(unavailable())
        }

        fn play_pause(&mut self) -> Result<(), PlayerError> {
            Err(unavailable())
        }

        fn next(&mut self) -> Result<(), PlayerError> {
            Err(unavailable())
        }

        fn previous(&mut self) -> Result<(), PlayerError> {
            Err(unavailable())
        }
    }
}

pub use imp::*;

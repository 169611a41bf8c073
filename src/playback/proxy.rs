use crate::app::state::{PlaybackStatus, TrackMetadata};
use crate::playback::error::PlayerError;

/// Handle to the external media player control service.
///
/// Every call is a fresh query; nothing is cached between ticks.
pub trait PlayerProxy {
    fn status(&mut self) -> Result<PlaybackStatus, PlayerError>;

    /// `Ok(None)` means the player is reachable but has no active track.
    fn metadata(&mut self) -> Result<Option<TrackMetadata>, PlayerError>;

    fn play_pause(&mut self) -> Result<(), PlayerError>;
    fn next(&mut self) -> Result<(), PlayerError>;
    fn previous(&mut self) -> Result<(), PlayerError>;

    /// Drops any held connection so the next query locates the player anew.
    fn reacquire(&mut self) {}

    fn title(&mut self) -> Result<String, PlayerError> {
        Ok(self.metadata()?.map(|m| m.title).unwrap_or_default())
    }

    fn album(&mut self) -> Result<String, PlayerError> {
        Ok(self.metadata()?.map(|m| m.album).unwrap_or_default())
    }

    fn artist(&mut self) -> Result<String, PlayerError> {
        Ok(self.metadata()?.map(|m| m.artist).unwrap_or_default())
    }
}

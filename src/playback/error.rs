use std::path::PathBuf;

/// Failures talking to the media player control service.
#[derive(thiserror::Error, Debug)]
pub enum PlayerError {
    /// No player is running, or the session bus is unreachable.
    #[error("media player unavailable: {0}")]
    Unavailable(String),

    /// The player answered but a property could not be read.
    #[error("could not read player {property}: {reason}")]
    Property {
        property: &'static str,
        reason: String,
    },

    /// A transport command was rejected.
    #[error("player rejected {command}: {reason}")]
    Command {
        command: &'static str,
        reason: String,
    },
}

/// Failures fetching or decoding album art. All of them hide the art panel.
#[derive(thiserror::Error, Debug)]
pub enum ArtError {
    #[error("track has no art URL")]
    Missing,

    #[error("malformed art URL {0:?}")]
    Malformed(String),

    #[error("unsupported art URL scheme {0:?}")]
    UnsupportedScheme(String),

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("downloading art: {0}")]
    Http(String),

    #[error("art exceeds {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("art body is empty")]
    Empty,

    #[error("invalid data URL payload: {0}")]
    DataUrl(#[from] base64::DecodeError),

    #[error("decoding art: {0}")]
    Decode(#[from] image::ImageError),
}

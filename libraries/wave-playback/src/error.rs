//! Error types for playback operations
//!
//! Nearly every failure here is user-facing: the `Display` text is the
//! exact status line the surrounding command layer returns. `kind()`
//! groups the variants into a stable taxonomy so callers and tests can
//! branch without string matching. `StateMismatch` is the one
//! programming-error class; it never results from user input.

use thiserror::Error;

/// Stable failure taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing loaded or nothing selected
    NotFound,

    /// Operation does not apply to the loaded item or player state
    InvalidState,

    /// The user is offline
    PermissionDenied,

    /// A selection index was out of range
    RangeError,

    /// Toggle with nothing to toggle
    NoOp,

    /// Internal invariant violation (a bug, not a user error)
    Internal,
}

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Load issued without a prior selection
    #[error("Please select a source before attempting to load.")]
    NothingSelected,

    /// Load of a collection with zero parts
    #[error("You can't load an empty audio collection!")]
    EmptyCollection,

    /// The owning user is offline
    #[error("{0} is offline.")]
    Offline(String),

    /// Operation issued with no source loaded; the phrase names the
    /// attempted action
    #[error("Please load a source before {0}.")]
    NoSource(&'static str),

    /// Rewind issued with no source loaded
    #[error("Please select a source before rewinding.")]
    RewindNoSource,

    /// Podcast-only operation on a non-podcast source
    #[error("The loaded source is not a podcast.")]
    NotAPodcast,

    /// Shuffle on a source that has no shuffle order
    #[error("The loaded source is not a playlist or an album.")]
    NotShuffleable,

    /// Shuffle deactivation while shuffle is inactive
    #[error("The loaded source is not a playlist or an album.")]
    ShuffleInactive,

    /// Collection membership toggle on a non-track part
    #[error("The loaded source is not a song.")]
    NotASong,

    /// Like on a non-track part
    #[error("Loaded source is not a song.")]
    LikeNotASong,

    /// Playlist selection index out of range
    #[error("The specified playlist does not exist.")]
    NoSuchPlaylist,

    /// Ad insertion while nothing is playing
    #[error("{0} is not playing any music.")]
    NotPlaying(String),

    /// Item kind and state variant disagree
    #[error("state variant mismatch: expected {0}")]
    StateMismatch(&'static str),
}

impl PlaybackError {
    /// Taxonomy entry for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NothingSelected | Self::NoSource(_) | Self::RewindNoSource => ErrorKind::NotFound,
            Self::EmptyCollection
            | Self::NotAPodcast
            | Self::NotShuffleable
            | Self::NotASong
            | Self::LikeNotASong
            | Self::NotPlaying(_) => ErrorKind::InvalidState,
            Self::Offline(_) => ErrorKind::PermissionDenied,
            Self::NoSuchPlaylist => ErrorKind::RangeError,
            Self::ShuffleInactive => ErrorKind::NoOp,
            Self::StateMismatch(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            PlaybackError::NoSource("skipping to the next track").to_string(),
            "Please load a source before skipping to the next track."
        );
        assert_eq!(
            PlaybackError::Offline("alice".to_string()).to_string(),
            "alice is offline."
        );
    }

    #[test]
    fn kinds_are_distinguishable() {
        assert_eq!(PlaybackError::NothingSelected.kind(), ErrorKind::NotFound);
        assert_eq!(PlaybackError::EmptyCollection.kind(), ErrorKind::InvalidState);
        assert_eq!(
            PlaybackError::Offline(String::new()).kind(),
            ErrorKind::PermissionDenied
        );
        assert_eq!(PlaybackError::NoSuchPlaylist.kind(), ErrorKind::RangeError);
        assert_eq!(PlaybackError::ShuffleInactive.kind(), ErrorKind::NoOp);
        assert_eq!(
            PlaybackError::StateMismatch("podcast").kind(),
            ErrorKind::Internal
        );
    }
}

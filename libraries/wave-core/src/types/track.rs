//! Single playable track

use super::counter::Counter;
use serde::{Deserialize, Serialize};

/// A single track
///
/// Immutable metadata plus a like counter and a reference-tie counter.
/// Tracks are shared behind `Arc` between the catalog, collections and
/// loaded players, so both counters use interior mutability.
#[derive(Debug, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub name: String,

    /// Owning artist
    pub artist: String,

    /// Album the track belongs to
    pub album: String,

    /// Genre label
    pub genre: String,

    /// Duration in whole seconds
    pub duration: u64,

    #[serde(skip)]
    likes: Counter,

    #[serde(skip)]
    ties: Counter,
}

impl Track {
    /// Create a new track
    pub fn new(
        name: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        genre: impl Into<String>,
        duration: u64,
    ) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            album: album.into(),
            genre: genre.into(),
            duration,
            likes: Counter::new(),
            ties: Counter::new(),
        }
    }

    /// Register a like
    pub fn add_like(&self) {
        self.likes.add();
    }

    /// Withdraw a like
    pub fn remove_like(&self) {
        self.likes.remove();
    }

    /// Accumulated like count
    pub fn likes(&self) -> u32 {
        self.likes.count()
    }

    /// Register a reference tie
    pub fn add_tie(&self) {
        self.ties.add();
    }

    /// Release a reference tie
    pub fn remove_tie(&self) {
        self.ties.remove();
    }

    /// Current reference-tie count
    pub fn ties(&self) -> u32 {
        self.ties.count()
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.artist == other.artist
    }
}

impl Eq for Track {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_track() {
        let track = Track::new("Intro", "Artist A", "Album A", "rock", 180);
        assert_eq!(track.name, "Intro");
        assert_eq!(track.duration, 180);
        assert_eq!(track.likes(), 0);
    }

    #[test]
    fn like_toggling() {
        let track = Track::new("Intro", "Artist A", "Album A", "rock", 180);
        track.add_like();
        track.add_like();
        track.remove_like();
        assert_eq!(track.likes(), 1);
    }

    #[test]
    fn equality_by_name_and_artist() {
        let a = Track::new("Intro", "Artist A", "Album A", "rock", 180);
        let b = Track::new("Intro", "Artist A", "Album B", "pop", 90);
        let c = Track::new("Intro", "Artist B", "Album A", "rock", 180);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

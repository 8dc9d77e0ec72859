//! Ordered track collections (playlists and albums)

use super::counter::Counter;
use super::track::Track;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Whether a collection is a user playlist or an artist album
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionKind {
    Playlist,
    Album,
}

/// Ordered collection of tracks
///
/// Order is significant and duplicates by identity are allowed in
/// playlists. Albums reject duplicate track *names* at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Collection name
    pub name: String,

    /// Owner (user for playlists, artist for albums)
    pub owner: String,

    /// Playlist or album
    pub kind: CollectionKind,

    tracks: Vec<Arc<Track>>,
    private: bool,

    #[serde(skip)]
    followers: Counter,

    #[serde(skip)]
    ties: Counter,
}

impl Collection {
    /// Create a playlist
    pub fn playlist(name: impl Into<String>, owner: impl Into<String>, private: bool) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            kind: CollectionKind::Playlist,
            tracks: Vec::new(),
            private,
            followers: Counter::new(),
            ties: Counter::new(),
        }
    }

    /// Create an album from a fixed track list
    ///
    /// Rejects duplicate track names. Albums are always public.
    pub fn album(
        name: impl Into<String>,
        owner: impl Into<String>,
        tracks: Vec<Arc<Track>>,
    ) -> Result<Self> {
        for (i, track) in tracks.iter().enumerate() {
            if tracks[..i].iter().any(|other| other.name == track.name) {
                return Err(CoreError::duplicate("album", track.name.clone()));
            }
        }

        Ok(Self {
            name: name.into(),
            owner: owner.into(),
            kind: CollectionKind::Album,
            tracks,
            private: false,
            followers: Counter::new(),
            ties: Counter::new(),
        })
    }

    /// Tracks in play order
    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// An empty collection cannot be loaded into a player
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Append a track
    pub fn add_track(&mut self, track: Arc<Track>) {
        self.tracks.push(track);
    }

    /// Remove the first occurrence of the given track (by identity)
    pub fn remove_track(&mut self, track: &Arc<Track>) -> bool {
        if let Some(pos) = self.tracks.iter().position(|t| Arc::ptr_eq(t, track)) {
            self.tracks.remove(pos);
            true
        } else {
            false
        }
    }

    /// Whether the collection contains the given track (by identity)
    pub fn contains(&self, track: &Arc<Track>) -> bool {
        self.tracks.iter().any(|t| Arc::ptr_eq(t, track))
    }

    /// Visibility flag
    pub fn is_private(&self) -> bool {
        self.private
    }

    /// Flip visibility
    pub fn switch_privacy(&mut self) {
        self.private = !self.private;
    }

    /// Register a follower
    pub fn add_follower(&self) {
        self.followers.add();
    }

    /// Withdraw a follower
    pub fn remove_follower(&self) {
        self.followers.remove();
    }

    /// Follower count
    pub fn followers(&self) -> u32 {
        self.followers.count()
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

    /// Total likes accumulated by member tracks
    pub fn likes(&self) -> u32 {
        self.tracks.iter().map(|t| t.likes()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: &str) -> Arc<Track> {
        Arc::new(Track::new(name, "Artist A", "Album A", "rock", 120))
    }

    #[test]
    fn playlist_starts_empty() {
        let playlist = Collection::playlist("Mix", "alice", false);
        assert!(playlist.is_empty());
        assert_eq!(playlist.kind, CollectionKind::Playlist);
    }

    #[test]
    fn album_rejects_duplicate_names() {
        let result = Collection::album("Debut", "Artist A", vec![track("One"), track("One")]);
        assert!(result.is_err());
    }

    #[test]
    fn album_keeps_order() {
        let album =
            Collection::album("Debut", "Artist A", vec![track("One"), track("Two")]).unwrap();
        assert_eq!(album.tracks()[0].name, "One");
        assert_eq!(album.tracks()[1].name, "Two");
    }

    #[test]
    fn playlist_allows_duplicate_identity() {
        let mut playlist = Collection::playlist("Mix", "alice", false);
        let t = track("One");
        playlist.add_track(t.clone());
        playlist.add_track(t.clone());
        assert_eq!(playlist.len(), 2);

        playlist.remove_track(&t);
        assert_eq!(playlist.len(), 1);
    }

    #[test]
    fn contains_is_by_identity() {
        let mut playlist = Collection::playlist("Mix", "alice", false);
        let t = track("One");
        let same_name = track("One");
        playlist.add_track(t.clone());

        assert!(playlist.contains(&t));
        assert!(!playlist.contains(&same_name));
    }

    #[test]
    fn privacy_switch() {
        let mut playlist = Collection::playlist("Mix", "alice", true);
        assert!(playlist.is_private());
        playlist.switch_privacy();
        assert!(!playlist.is_private());
    }
}

//! In-memory catalog
//!
//! Reference implementation of [`Catalog`] used by tests and by the
//! surrounding command layer. Resolution searches tracks, then
//! collections, then podcasts, matching the original lookup order.

use crate::error::{CoreError, Result};
use crate::traits::Catalog;
use crate::types::{AudioItem, Collection, Podcast, Track};
use std::sync::Arc;

/// Process-local item catalog
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tracks: Vec<Arc<Track>>,
    collections: Vec<Arc<Collection>>,
    podcasts: Vec<Arc<Podcast>>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track, returning the shared handle
    pub fn add_track(&mut self, track: Track) -> Arc<Track> {
        let track = Arc::new(track);
        self.tracks.push(track.clone());
        track
    }

    /// Add a collection, returning the shared handle
    pub fn add_collection(&mut self, collection: Collection) -> Arc<Collection> {
        let collection = Arc::new(collection);
        self.collections.push(collection.clone());
        collection
    }

    /// Add a podcast, returning the shared handle
    pub fn add_podcast(&mut self, podcast: Podcast) -> Arc<Podcast> {
        let podcast = Arc::new(podcast);
        self.podcasts.push(podcast.clone());
        podcast
    }

    /// Look up a track by name
    pub fn track(&self, name: &str) -> Option<&Arc<Track>> {
        self.tracks.iter().find(|t| t.name == name)
    }

    /// Look up a collection by name
    pub fn collection(&self, name: &str) -> Option<&Arc<Collection>> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Look up a podcast by name
    pub fn podcast(&self, name: &str) -> Option<&Arc<Podcast>> {
        self.podcasts.iter().find(|p| p.name == name)
    }
}

impl Catalog for MemoryCatalog {
    fn resolve(&self, name: &str) -> Option<AudioItem> {
        if let Some(track) = self.track(name) {
            return Some(AudioItem::Track(track.clone()));
        }
        if let Some(collection) = self.collection(name) {
            return Some(AudioItem::Collection(collection.clone()));
        }
        self.podcast(name).map(|p| AudioItem::Podcast(p.clone()))
    }

    fn remove(&mut self, name: &str) -> Result<()> {
        let item = self
            .resolve(name)
            .ok_or_else(|| CoreError::not_found("item", name))?;

        if item.ties() > 0 {
            return Err(CoreError::InUse {
                name: name.to_string(),
            });
        }

        match item {
            AudioItem::Track(_) => self.tracks.retain(|t| t.name != name),
            AudioItem::Collection(_) => self.collections.retain(|c| c.name != name),
            AudioItem::Podcast(_) => self.podcasts.retain(|p| p.name != name),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_finds_tracks_first() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_track(Track::new("Echo", "Artist A", "Album A", "rock", 100));
        catalog.add_collection(Collection::playlist("Echo", "alice", false));

        let item = catalog.resolve("Echo").unwrap();
        assert!(matches!(item, AudioItem::Track(_)));
    }

    #[test]
    fn remove_refuses_while_tied() {
        let mut catalog = MemoryCatalog::new();
        let track = catalog.add_track(Track::new("Echo", "Artist A", "Album A", "rock", 100));

        track.add_tie();
        assert!(catalog.remove("Echo").is_err());

        track.remove_tie();
        catalog.remove("Echo").unwrap();
        assert!(catalog.resolve("Echo").is_none());
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut catalog = MemoryCatalog::new();
        let err = catalog.remove("Ghost").unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }
}

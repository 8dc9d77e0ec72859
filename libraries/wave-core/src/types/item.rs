//! The polymorphic playable unit

use super::collection::Collection;
use super::podcast::Podcast;
use super::track::Track;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Kind tag for a playable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Track,
    Collection,
    Podcast,
}

/// Any playable unit: one track, an ordered track collection, or a podcast
///
/// A single track behaves as a collection containing only itself, so all
/// part lookups are index-based regardless of kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AudioItem {
    Track(Arc<Track>),
    Collection(Arc<Collection>),
    Podcast(Arc<Podcast>),
}

impl AudioItem {
    /// Kind tag
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Track(_) => ItemKind::Track,
            Self::Collection(_) => ItemKind::Collection,
            Self::Podcast(_) => ItemKind::Podcast,
        }
    }

    /// Item name
    pub fn name(&self) -> &str {
        match self {
            Self::Track(track) => &track.name,
            Self::Collection(collection) => &collection.name,
            Self::Podcast(podcast) => &podcast.name,
        }
    }

    /// Creator identity: the artist for tracks, the owner otherwise
    pub fn owner(&self) -> &str {
        match self {
            Self::Track(track) => &track.artist,
            Self::Collection(collection) => &collection.owner,
            Self::Podcast(podcast) => &podcast.owner,
        }
    }

    /// Number of ordered parts
    pub fn part_count(&self) -> usize {
        match self {
            Self::Track(_) => 1,
            Self::Collection(collection) => collection.len(),
            Self::Podcast(podcast) => podcast.len(),
        }
    }

    /// An item with no parts cannot be loaded
    pub fn is_empty(&self) -> bool {
        self.part_count() == 0
    }

    /// Duration of the part at the given index
    pub fn part_duration(&self, index: usize) -> Option<u64> {
        match self {
            Self::Track(track) => (index == 0).then_some(track.duration),
            Self::Collection(collection) => {
                collection.tracks().get(index).map(|t| t.duration)
            }
            Self::Podcast(podcast) => podcast.episodes().get(index).map(|e| e.duration),
        }
    }

    /// Display name of the part at the given index
    pub fn part_name(&self, index: usize) -> Option<&str> {
        match self {
            Self::Track(track) => (index == 0).then_some(track.name.as_str()),
            Self::Collection(collection) => {
                collection.tracks().get(index).map(|t| t.name.as_str())
            }
            Self::Podcast(podcast) => podcast.episodes().get(index).map(|e| e.name.as_str()),
        }
    }

    /// The track at the given index, if the part is a track
    pub fn track_at(&self, index: usize) -> Option<&Arc<Track>> {
        match self {
            Self::Track(track) => (index == 0).then_some(track),
            Self::Collection(collection) => collection.tracks().get(index),
            Self::Podcast(_) => None,
        }
    }

    /// Register a reference tie
    pub fn add_tie(&self) {
        match self {
            Self::Track(track) => track.add_tie(),
            Self::Collection(collection) => collection.add_tie(),
            Self::Podcast(podcast) => podcast.add_tie(),
        }
    }

    /// Release a reference tie
    pub fn remove_tie(&self) {
        match self {
            Self::Track(track) => track.remove_tie(),
            Self::Collection(collection) => collection.remove_tie(),
            Self::Podcast(podcast) => podcast.remove_tie(),
        }
    }

    /// Current reference-tie count
    pub fn ties(&self) -> u32 {
        match self {
            Self::Track(track) => track.ties(),
            Self::Collection(collection) => collection.ties(),
            Self::Podcast(podcast) => podcast.ties(),
        }
    }
}

//! Podcasts and their episodes

use super::counter::Counter;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// One podcast episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode name
    pub name: String,

    /// Duration in whole seconds
    pub duration: u64,

    /// Episode description
    pub description: String,
}

impl Episode {
    /// Create a new episode
    pub fn new(name: impl Into<String>, duration: u64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration,
            description: description.into(),
        }
    }
}

/// A podcast: an ordered, fixed list of episodes
///
/// The episode list cannot change after creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct Podcast {
    /// Podcast name
    pub name: String,

    /// Owning host
    pub owner: String,

    episodes: Vec<Episode>,

    #[serde(skip)]
    ties: Counter,
}

impl Podcast {
    /// Create a podcast, rejecting duplicate episode names
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        episodes: Vec<Episode>,
    ) -> Result<Self> {
        for (i, episode) in episodes.iter().enumerate() {
            if episodes[..i].iter().any(|other| other.name == episode.name) {
                return Err(CoreError::duplicate("podcast", episode.name.clone()));
            }
        }

        Ok(Self {
            name: name.into(),
            owner: owner.into(),
            episodes,
            ties: Counter::new(),
        })
    }

    /// Episodes in play order
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Number of episodes
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    /// A podcast with no episodes cannot be loaded
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
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

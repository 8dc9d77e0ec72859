//! Podcast bookmarks
//!
//! Podcast positions survive unloading: when a player moves on to
//! something else, the podcast state is parked here and handed back on
//! the next load of the same podcast. Bookmarks are keyed by podcast
//! name and are never evicted, so a finished podcast resumes at its
//! final episode rather than restarting.

use crate::state::PlaybackState;

/// Saved podcast positions for one player
#[derive(Debug, Default, Clone)]
pub struct BookmarkStore {
    states: Vec<PlaybackState>,
}

impl BookmarkStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the saved state for `podcast_name`
    pub fn take(&mut self, podcast_name: &str) -> Option<PlaybackState> {
        let at = self
            .states
            .iter()
            .position(|s| s.podcast_name() == Some(podcast_name))?;
        Some(self.states.swap_remove(at))
    }

    /// Park a podcast state, replacing any previous one for the same
    /// podcast
    ///
    /// Non-podcast states are ignored.
    pub fn save(&mut self, state: PlaybackState) {
        let Some(name) = state.podcast_name() else {
            return;
        };
        let name = name.to_string();
        self.states.retain(|s| s.podcast_name() != Some(&name));
        self.states.push(state);
    }

    /// Peek at the saved state for `podcast_name`
    pub fn get(&self, podcast_name: &str) -> Option<&PlaybackState> {
        self.states
            .iter()
            .find(|s| s.podcast_name() == Some(podcast_name))
    }

    /// Number of parked states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wave_core::{AudioItem, Episode, Podcast};

    fn podcast_state(name: &str) -> PlaybackState {
        let podcast = Arc::new(
            Podcast::new(name, "host1", vec![Episode::new("Pilot", 600, "first")]).unwrap(),
        );
        PlaybackState::initial_for(&AudioItem::Podcast(podcast), true)
    }

    #[test]
    fn take_removes_the_saved_state() {
        let mut store = BookmarkStore::new();
        store.save(podcast_state("Talk"));

        assert!(store.take("Talk").is_some());
        assert!(store.take("Talk").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn save_replaces_an_existing_bookmark() {
        let mut store = BookmarkStore::new();
        store.save(podcast_state("Talk"));

        let mut newer = podcast_state("Talk");
        newer.position = 42;
        store.save(newer);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Talk").map(PlaybackState::position), Some(42));
    }

    #[test]
    fn non_podcast_states_are_ignored() {
        let mut store = BookmarkStore::new();
        store.save(PlaybackState::empty());
        assert!(store.is_empty());
    }
}

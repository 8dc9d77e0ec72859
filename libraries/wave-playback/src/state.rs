//! Playback position state
//!
//! [`PlaybackState`] is the complete resumable position of a player:
//! which part is current, how far into it playback is, the repeat mode,
//! and a variant tag carrying per-kind extras (shuffle order for
//! collections, bookmark identity for podcasts). Podcast states are the
//! ones persisted across loads, through [`crate::BookmarkStore`].
//!
//! `part_index` is always an index into the item's original part order.
//! When a collection is shuffled, the permutation maps playback order to
//! original order; `effective_index` recovers the playback-order slot of
//! the current part.

use crate::types::RepeatMode;
use serde::{Deserialize, Serialize};
use wave_core::AudioItem;

/// Per-kind state extras
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateVariant {
    /// Single track, no extras
    Track,

    /// Playlist or album
    Collection {
        /// Playback-order permutation of original indexes, when shuffled
        shuffle_order: Option<Vec<usize>>,
        /// Whether shuffle is active
        shuffled: bool,
    },

    /// Podcast, identified by name for bookmark storage
    Podcast {
        /// Name of the podcast this state belongs to
        podcast_name: String,
        /// Whether this state should be bookmarked when unloaded
        bookmarked: bool,
    },
}

/// Resumable position of one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub(crate) part_index: usize,
    pub(crate) position: u64,
    pub(crate) last_part_duration: u64,
    pub(crate) repeat: RepeatMode,
    pub(crate) finished: bool,
    pub(crate) variant: StateVariant,
}

impl PlaybackState {
    /// State of a player with nothing loaded
    pub fn empty() -> Self {
        Self {
            part_index: 0,
            position: 0,
            last_part_duration: 0,
            repeat: RepeatMode::Off,
            finished: true,
            variant: StateVariant::Track,
        }
    }

    /// Fresh state positioned at the start of `item`
    pub fn initial_for(item: &AudioItem, bookmarked: bool) -> Self {
        let variant = match item {
            AudioItem::Track(_) => StateVariant::Track,
            AudioItem::Collection(_) => StateVariant::Collection {
                shuffle_order: None,
                shuffled: false,
            },
            AudioItem::Podcast(podcast) => StateVariant::Podcast {
                podcast_name: podcast.name.clone(),
                bookmarked,
            },
        };
        Self {
            part_index: 0,
            position: 0,
            last_part_duration: item.part_duration(0).unwrap_or_default(),
            repeat: RepeatMode::Off,
            finished: false,
            variant,
        }
    }

    /// Original-order index of the current part
    pub fn part_index(&self) -> usize {
        self.part_index
    }

    /// Seconds elapsed inside the current part
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Duration of the current part
    pub fn last_part_duration(&self) -> u64 {
        self.last_part_duration
    }

    /// Seconds left in the current part
    pub fn time_remaining(&self) -> u64 {
        self.last_part_duration.saturating_sub(self.position)
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Advance the repeat mode one step around its cycle
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.cycle();
        self.repeat
    }

    /// Whether playback has run out
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Variant tag
    pub fn variant(&self) -> &StateVariant {
        &self.variant
    }

    /// Whether a shuffle order is active
    pub fn is_shuffled(&self) -> bool {
        matches!(
            self.variant,
            StateVariant::Collection { shuffled: true, .. }
        )
    }

    /// Podcast name, for podcast states
    pub fn podcast_name(&self) -> Option<&str> {
        match &self.variant {
            StateVariant::Podcast { podcast_name, .. } => Some(podcast_name),
            _ => None,
        }
    }

    /// Whether this is a podcast state that should persist when unloaded
    pub fn is_bookmarked_podcast(&self) -> bool {
        matches!(
            self.variant,
            StateVariant::Podcast {
                bookmarked: true,
                ..
            }
        )
    }

    /// Playback-order slot of the current part
    ///
    /// Identity unless a shuffle order is active.
    pub(crate) fn effective_index(&self) -> usize {
        match &self.variant {
            StateVariant::Collection {
                shuffle_order: Some(order),
                shuffled: true,
            } => order
                .iter()
                .position(|&original| original == self.part_index)
                .unwrap_or(self.part_index),
            _ => self.part_index,
        }
    }

    /// Original-order index sitting at playback-order slot `effective`
    pub(crate) fn original_index_at(&self, effective: usize) -> usize {
        match &self.variant {
            StateVariant::Collection {
                shuffle_order: Some(order),
                shuffled: true,
            } => order.get(effective).copied().unwrap_or(effective),
            _ => effective,
        }
    }

    /// Reset to the run-out state, dropping repeat and shuffle
    pub(crate) fn clear(&mut self) {
        self.part_index = 0;
        self.position = 0;
        self.last_part_duration = 0;
        self.repeat = RepeatMode::Off;
        self.finished = true;
        if let StateVariant::Collection {
            shuffle_order,
            shuffled,
        } = &mut self.variant
        {
            *shuffle_order = None;
            *shuffled = false;
        }
    }
}

//! The per-user player engine
//!
//! [`PlayerEngine`] owns everything one user's playback depends on: the
//! loaded item, the position state, the ad hold, podcast bookmarks and
//! the liked-track set. Commands carry a timestamp; the engine first
//! catches the state up to that moment and then applies the command, so
//! no background clock exists anywhere.
//!
//! The accounts collaborator receives listen and revenue reports. It is
//! injected at construction, which is also how the tests observe the
//! engine from the outside.

use crate::ads::AdBreak;
use crate::advance::advance;
use crate::bookmarks::BookmarkStore;
use crate::error::{PlaybackError, Result};
use crate::shuffle;
use crate::state::{PlaybackState, StateVariant};
use crate::types::PlayerStatus;
use std::collections::HashSet;
use tracing::debug;
use wave_core::{AudioItem, Collection, ListenSink, PartId, RevenueLedger};

/// Seconds a podcast skip moves in either direction
pub const SKIP_UNITS: u64 = 90;

/// Playback engine for one user
#[derive(Debug)]
pub struct PlayerEngine<A> {
    owner: String,
    accounts: A,

    item: Option<AudioItem>,
    state: PlaybackState,
    is_playing: bool,
    is_offline: bool,
    last_update: u64,

    // Whether the loaded item currently holds a deletion-guard tie
    holds_tie: bool,

    ad: AdBreak,
    bookmarks: BookmarkStore,
    liked: HashSet<(String, String)>,
}

impl<A: ListenSink + RevenueLedger> PlayerEngine<A> {
    /// Create an idle engine for `owner`
    pub fn new(owner: impl Into<String>, accounts: A) -> Self {
        Self {
            owner: owner.into(),
            accounts,
            item: None,
            state: PlaybackState::empty(),
            is_playing: false,
            is_offline: false,
            last_update: 0,
            holds_tie: false,
            ad: AdBreak::Idle,
            bookmarks: BookmarkStore::new(),
            liked: HashSet::new(),
        }
    }

    /// Owning user
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Accounts collaborator
    pub fn accounts(&self) -> &A {
        &self.accounts
    }

    /// Accounts collaborator, mutable
    pub fn accounts_mut(&mut self) -> &mut A {
        &mut self.accounts
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Connection flag
    pub fn is_offline(&self) -> bool {
        self.is_offline
    }

    /// Whether an ad hold is pending
    pub fn is_ad_pending(&self) -> bool {
        self.ad.is_holding()
    }

    /// Current position state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Currently loaded item
    pub fn item(&self) -> Option<&AudioItem> {
        self.item.as_ref()
    }

    /// Saved position for a podcast, if one is parked
    pub fn bookmark(&self, podcast_name: &str) -> Option<&PlaybackState> {
        self.bookmarks.get(podcast_name)
    }

    /// Liked tracks, keyed by (name, artist)
    pub fn liked(&self) -> &HashSet<(String, String)> {
        &self.liked
    }

    /// Bring the state up to `timestamp`
    ///
    /// Timestamps at or before the last update are a no-op, so replayed
    /// commands cannot rewind anything. Paused and offline players
    /// absorb the elapsed time without moving.
    pub fn catch_up(&mut self, timestamp: u64) -> Result<()> {
        let Some(elapsed) = timestamp.checked_sub(self.last_update) else {
            return Ok(());
        };
        if elapsed == 0 {
            return Ok(());
        }
        self.last_update = timestamp;
        if !self.is_playing || self.is_offline {
            return Ok(());
        }
        let Some(item) = self.item.clone() else {
            return Ok(());
        };

        // The ad hold eats the tick first. Podcast playback is never
        // interrupted by ads; a pending hold just stays armed.
        let leftover = if matches!(item, AudioItem::Podcast(_)) {
            elapsed
        } else {
            self.ad.consume(elapsed, &mut self.accounts)
        };
        if leftover == 0 {
            return Ok(());
        }

        advance(&item, &mut self.state, leftover, &mut self.accounts)?;
        if self.state.finished() {
            self.finish_item();
        }
        Ok(())
    }

    /// Load an item, replacing whatever was loaded before
    ///
    /// With `use_bookmark`, a podcast resumes from its parked bookmark
    /// when one exists; fresh podcast states are then bookmarked on
    /// unload. Non-podcast items ignore the flag.
    pub fn load(
        &mut self,
        selection: Option<AudioItem>,
        use_bookmark: bool,
        timestamp: u64,
    ) -> Result<String> {
        let Some(item) = selection else {
            return Err(PlaybackError::NothingSelected);
        };
        if item.is_empty() {
            return Err(PlaybackError::EmptyCollection);
        }
        if self.is_offline {
            return Err(PlaybackError::Offline(self.owner.clone()));
        }
        self.clear_player(timestamp)?;

        self.state = match &item {
            AudioItem::Podcast(podcast) if use_bookmark => self
                .bookmarks
                .take(&podcast.name)
                .unwrap_or_else(|| PlaybackState::initial_for(&item, true)),
            _ => PlaybackState::initial_for(&item, false),
        };

        // Loading counts as a listen of the part playback starts on
        match &item {
            AudioItem::Podcast(podcast) => self.accounts.record_listen(
                &PartId::Episode {
                    podcast: podcast.clone(),
                    index: self.state.part_index(),
                },
                1,
            ),
            _ => {
                if let Some(track) = item.track_at(self.state.part_index()) {
                    self.accounts.record_listen(&PartId::Track(track.clone()), 1);
                }
            }
        }

        self.is_playing = !self.state.finished();
        item.add_tie();
        self.holds_tie = true;
        debug!(owner = %self.owner, item = %item.name(), "loaded");
        self.item = Some(item);
        Ok("Playback loaded successfully.".to_string())
    }

    /// Unload the current item, parking podcast positions
    pub fn unload(&mut self, timestamp: u64) -> Result<()> {
        self.clear_player(timestamp)
    }

    /// Toggle between playing and paused
    pub fn play_pause(&mut self, timestamp: u64) -> Result<String> {
        self.catch_up(timestamp)?;
        if self.is_offline {
            return Err(PlaybackError::Offline(self.owner.clone()));
        }
        if self.state.finished() {
            return Err(PlaybackError::NoSource(
                "attempting to pause or resume playback",
            ));
        }
        self.is_playing = !self.is_playing;
        Ok(if self.is_playing {
            "Playback resumed successfully."
        } else {
            "Playback paused successfully."
        }
        .to_string())
    }

    /// Advance the repeat mode one step around its cycle
    pub fn repeat_cycle(&mut self, timestamp: u64) -> Result<String> {
        self.catch_up(timestamp)?;
        if self.is_offline {
            return Err(PlaybackError::Offline(self.owner.clone()));
        }
        if self.state.finished() {
            return Err(PlaybackError::NoSource("setting the repeat status"));
        }
        let kind = self.current_item()?.kind();
        let mode = self.state.cycle_repeat();
        Ok(format!(
            "Repeat mode changed to {}.",
            mode.label(kind).to_lowercase()
        ))
    }

    /// Jump to the start of the next part
    ///
    /// Implemented as an advance over the rest of the current part, so
    /// repeat modes and listen bookkeeping behave exactly as they would
    /// had the part played out.
    pub fn next(&mut self, timestamp: u64) -> Result<String> {
        self.catch_up(timestamp)?;
        if self.is_offline {
            return Err(PlaybackError::Offline(self.owner.clone()));
        }
        if self.state.finished() {
            return Err(PlaybackError::NoSource("skipping to the next track"));
        }
        let item = self.current_item()?.clone();
        let remaining = self.state.time_remaining();
        advance(&item, &mut self.state, remaining, &mut self.accounts)?;
        if self.state.finished() {
            self.finish_item();
            return Err(PlaybackError::NoSource("skipping to the next track"));
        }
        self.is_playing = true;
        let name = item
            .part_name(self.state.part_index())
            .unwrap_or_default()
            .to_string();
        Ok(format!(
            "Skipped to next track successfully. The current track is {name}."
        ))
    }

    /// Jump back: to the start of the current part when inside it, to
    /// the previous part when already at a part boundary
    pub fn previous(&mut self, timestamp: u64) -> Result<String> {
        self.catch_up(timestamp)?;
        if self.is_offline {
            return Err(PlaybackError::Offline(self.owner.clone()));
        }
        if self.state.finished() {
            return Err(PlaybackError::NoSource("returning to the previous track"));
        }
        let item = self.current_item()?.clone();
        match &item {
            AudioItem::Track(_) => {
                self.state.position = 0;
            }
            AudioItem::Collection(collection) => {
                let effective = self.state.effective_index();
                if self.state.position() > 0 || effective == 0 {
                    self.state.position = 0;
                } else {
                    let original = self.state.original_index_at(effective - 1);
                    let track = collection
                        .tracks()
                        .get(original)
                        .ok_or(PlaybackError::StateMismatch("collection part"))?;
                    self.state.part_index = original;
                    self.state.last_part_duration = track.duration;
                    self.accounts.record_listen(&PartId::Track(track.clone()), 1);
                }
            }
            AudioItem::Podcast(podcast) => {
                if self.state.position() > 0 || self.state.part_index() == 0 {
                    self.state.position = 0;
                } else {
                    let index = self.state.part_index() - 1;
                    let episode = podcast
                        .episodes()
                        .get(index)
                        .ok_or(PlaybackError::StateMismatch("podcast part"))?;
                    self.state.part_index = index;
                    self.state.last_part_duration = episode.duration;
                    self.accounts.record_listen(
                        &PartId::Episode {
                            podcast: podcast.clone(),
                            index,
                        },
                        1,
                    );
                }
            }
        }
        self.is_playing = true;
        let name = item
            .part_name(self.state.part_index())
            .unwrap_or_default()
            .to_string();
        Ok(format!(
            "Returned to previous track successfully. The current track is {name}."
        ))
    }

    /// Toggle shuffle for the loaded collection
    ///
    /// Activation requires a seed; the resulting order is deterministic
    /// per seed. Deactivation keeps the current part and forgets the
    /// order.
    pub fn shuffle_toggle(&mut self, seed: Option<u64>, timestamp: u64) -> Result<String> {
        self.catch_up(timestamp)?;
        if self.is_offline {
            return Err(PlaybackError::Offline(self.owner.clone()));
        }
        if self.state.finished() {
            return Err(PlaybackError::NoSource("using the shuffle function"));
        }
        let len = match self.current_item()? {
            AudioItem::Collection(collection) => collection.len(),
            _ => return Err(PlaybackError::NotShuffleable),
        };
        let StateVariant::Collection {
            shuffle_order,
            shuffled,
        } = &mut self.state.variant
        else {
            return Err(PlaybackError::StateMismatch("collection state"));
        };

        if *shuffled {
            *shuffle_order = None;
            *shuffled = false;
            Ok("Shuffle function deactivated successfully.".to_string())
        } else if let Some(seed) = seed {
            *shuffle_order = Some(shuffle::shuffle_order(len, seed));
            *shuffled = true;
            Ok("Shuffle function activated successfully.".to_string())
        } else {
            Err(PlaybackError::ShuffleInactive)
        }
    }

    /// Move a podcast forward by [`SKIP_UNITS`]
    pub fn skip_forward(&mut self, timestamp: u64) -> Result<String> {
        self.catch_up(timestamp)?;
        if self.is_offline {
            return Err(PlaybackError::Offline(self.owner.clone()));
        }
        if self.state.finished() {
            return Err(PlaybackError::NoSource("attempting to forward"));
        }
        let item = self.current_item()?.clone();
        if !matches!(item, AudioItem::Podcast(_)) {
            return Err(PlaybackError::NotAPodcast);
        }
        advance(&item, &mut self.state, SKIP_UNITS, &mut self.accounts)?;
        if self.state.finished() {
            self.finish_item();
        } else {
            self.is_playing = true;
        }
        Ok("Skipped forward successfully.".to_string())
    }

    /// Move a podcast back by [`SKIP_UNITS`], clamped to the episode
    /// start
    ///
    /// Rewinding out of the parked end-of-podcast state resumes the
    /// final episode.
    pub fn skip_backward(&mut self, timestamp: u64) -> Result<String> {
        self.catch_up(timestamp)?;
        if self.is_offline {
            return Err(PlaybackError::Offline(self.owner.clone()));
        }
        let Some(item) = &self.item else {
            return Err(PlaybackError::RewindNoSource);
        };
        if !matches!(item, AudioItem::Podcast(_)) {
            return Err(PlaybackError::NotAPodcast);
        }
        if self.state.finished() {
            self.state.finished = false;
            if !self.holds_tie {
                item.add_tie();
                self.holds_tie = true;
            }
        }
        self.state.position = self.state.position.saturating_sub(SKIP_UNITS);
        self.is_playing = true;
        Ok("Rewound successfully.".to_string())
    }

    /// Toggle the like on the current track
    pub fn like(&mut self, timestamp: u64) -> Result<String> {
        self.catch_up(timestamp)?;
        if self.is_offline {
            return Err(PlaybackError::Offline(self.owner.clone()));
        }
        if self.state.finished() {
            return Err(PlaybackError::NoSource("liking or unliking"));
        }
        let track = self
            .current_item()?
            .track_at(self.state.part_index())
            .ok_or(PlaybackError::LikeNotASong)?
            .clone();
        let key = (track.name.clone(), track.artist.clone());
        if self.liked.remove(&key) {
            track.remove_like();
            Ok("Unlike registered successfully.".to_string())
        } else {
            self.liked.insert(key);
            track.add_like();
            Ok("Like registered successfully.".to_string())
        }
    }

    /// Toggle the current track's membership in one of the user's
    /// playlists, selected by 1-based id
    pub fn add_remove_in_collection(
        &mut self,
        playlists: &mut [Collection],
        playlist_id: usize,
        timestamp: u64,
    ) -> Result<String> {
        self.catch_up(timestamp)?;
        if self.is_offline {
            return Err(PlaybackError::Offline(self.owner.clone()));
        }
        if self.state.finished() {
            return Err(PlaybackError::NoSource(
                "adding to or removing from the playlist",
            ));
        }
        let track = self
            .current_item()?
            .track_at(self.state.part_index())
            .ok_or(PlaybackError::NotASong)?
            .clone();
        let playlist = playlist_id
            .checked_sub(1)
            .and_then(|index| playlists.get_mut(index))
            .ok_or(PlaybackError::NoSuchPlaylist)?;
        if playlist.remove_track(&track) {
            Ok("Successfully removed from playlist.".to_string())
        } else {
            playlist.add_track(track);
            Ok("Successfully added to playlist.".to_string())
        }
    }

    /// Arm an ad hold on the timeline
    ///
    /// Requires running playback. The connection flag is not consulted,
    /// so a player that went offline mid-playback can still arm one;
    /// the hold only counts down once the player is back online.
    pub fn insert_ad(&mut self, price: f64, timestamp: u64) -> Result<String> {
        self.catch_up(timestamp)?;
        if !self.is_playing {
            return Err(PlaybackError::NotPlaying(self.owner.clone()));
        }
        self.ad.arm(price);
        debug!(owner = %self.owner, price, "ad armed");
        Ok("Ad inserted successfully.".to_string())
    }

    /// Set the connection flag
    ///
    /// Time is accounted up to the switch first, so going offline stops
    /// the clock at exactly the switch timestamp.
    pub fn set_offline(&mut self, offline: bool, timestamp: u64) -> Result<()> {
        self.catch_up(timestamp)?;
        self.is_offline = offline;
        Ok(())
    }

    /// Report the player as of `timestamp`
    pub fn status(&mut self, timestamp: u64) -> Result<PlayerStatus> {
        self.catch_up(timestamp)?;
        let finished = self.state.finished();
        let name = if finished {
            String::new()
        } else {
            self.current_item()?
                .part_name(self.state.part_index())
                .unwrap_or_default()
                .to_string()
        };
        let repeat = self
            .item
            .as_ref()
            .map_or("No Repeat", |item| self.state.repeat().label(item.kind()))
            .to_string();
        Ok(PlayerStatus {
            name,
            remaining: if finished { 0 } else { self.state.time_remaining() },
            repeat,
            shuffle: !finished && self.state.is_shuffled(),
            paused: !self.is_playing,
        })
    }

    fn current_item(&self) -> Result<&AudioItem> {
        self.item
            .as_ref()
            .ok_or(PlaybackError::StateMismatch("loaded item"))
    }

    /// Run-out housekeeping: stop, release the tie, settle a pending ad
    fn finish_item(&mut self) {
        self.is_playing = false;
        if self.holds_tie {
            if let Some(item) = &self.item {
                item.remove_tie();
                debug!(owner = %self.owner, item = %item.name(), "playback ran out");
            }
            self.holds_tie = false;
        }
        self.ad.settle(&mut self.accounts);
    }

    /// Account elapsed time, then drop the loaded item
    fn clear_player(&mut self, timestamp: u64) -> Result<()> {
        self.catch_up(timestamp)?;
        if let Some(item) = self.item.take() {
            if self.holds_tie {
                item.remove_tie();
                self.holds_tie = false;
            }
            if self.state.is_bookmarked_podcast() {
                self.bookmarks.save(self.state.clone());
            }
        }
        self.state = PlaybackState::empty();
        self.is_playing = false;
        self.ad.cancel();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::sync::Arc;
    use wave_core::{Track, UserAccounts};

    fn engine() -> PlayerEngine<UserAccounts> {
        PlayerEngine::new("alice", UserAccounts::new())
    }

    fn track_item(name: &str, duration: u64) -> AudioItem {
        AudioItem::Track(Arc::new(Track::new(name, "Artist A", "Album A", "rock", duration)))
    }

    #[test]
    fn load_requires_a_selection() {
        let mut player = engine();
        let err = player.load(None, false, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            err.to_string(),
            "Please select a source before attempting to load."
        );
    }

    #[test]
    fn load_starts_playback_and_ties_the_item() {
        let mut player = engine();
        let item = track_item("Solo", 200);
        let msg = player.load(Some(item.clone()), false, 10).unwrap();
        assert_eq!(msg, "Playback loaded successfully.");
        assert!(player.is_playing());
        assert_eq!(item.ties(), 1);
        assert_eq!(player.accounts().track_listens("Solo", "Artist A"), 1);
    }

    #[test]
    fn offline_players_reject_commands_with_the_owner_name() {
        let mut player = engine();
        player.load(Some(track_item("Solo", 200)), false, 10).unwrap();
        player.set_offline(true, 20).unwrap();

        let err = player.play_pause(30).unwrap_err();
        assert_eq!(err.to_string(), "alice is offline.");
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn finish_releases_the_tie_and_stops() {
        let mut player = engine();
        let item = track_item("Solo", 200);
        player.load(Some(item.clone()), false, 0).unwrap();

        player.catch_up(200).unwrap();
        assert!(!player.is_playing());
        assert_eq!(item.ties(), 0);
        let status = player.status(200).unwrap();
        assert_eq!(status.name, "");
        assert_eq!(status.remaining, 0);
    }

    #[test]
    fn ad_insertion_requires_running_playback() {
        let mut player = engine();
        let err = player.insert_ad(10.0, 5).unwrap_err();
        assert_eq!(err.to_string(), "alice is not playing any music.");

        player.load(Some(track_item("Solo", 200)), false, 10).unwrap();
        player.play_pause(20).unwrap();
        assert!(player.insert_ad(10.0, 25).is_err());

        player.play_pause(30).unwrap();
        assert_eq!(
            player.insert_ad(10.0, 35).unwrap(),
            "Ad inserted successfully."
        );
        assert!(player.is_ad_pending());
    }
}

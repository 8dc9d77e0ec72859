//! Wave Player - Playback Engine
//!
//! Discrete-time playback simulation for one user. There is no clock:
//! every command carries a timestamp, and the engine replays however
//! much virtual time passed since the previous command before applying
//! the new one. Position state, repeat and shuffle behavior, podcast
//! bookmarks, ad holds and listen/revenue reporting all live here;
//! the catalog and user bookkeeping live in `wave-core` and are reached
//! through its collaborator traits.
//!
//! ```
//! use std::sync::Arc;
//! use wave_core::{AudioItem, Track, UserAccounts};
//! use wave_playback::PlayerEngine;
//!
//! let mut player = PlayerEngine::new("alice", UserAccounts::new());
//! let track = Arc::new(Track::new("Intro", "Artist A", "Album A", "rock", 180));
//! player.load(Some(AudioItem::Track(track)), false, 10)?;
//!
//! let status = player.status(40)?;
//! assert_eq!(status.name, "Intro");
//! assert_eq!(status.remaining, 150);
//! # Ok::<(), wave_playback::PlaybackError>(())
//! ```

mod ads;
mod advance;
mod bookmarks;
mod engine;
mod error;
mod shuffle;
mod state;
mod types;

pub use ads::{AdBreak, AD_HOLD_UNITS};
pub use bookmarks::BookmarkStore;
pub use engine::{PlayerEngine, SKIP_UNITS};
pub use error::{ErrorKind, PlaybackError, Result};
pub use shuffle::shuffle_order;
pub use state::{PlaybackState, StateVariant};
pub use types::{PlayerStatus, RepeatMode};

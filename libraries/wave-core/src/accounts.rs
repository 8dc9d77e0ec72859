//! Per-user listen accounting and revenue pools
//!
//! Reference implementation of [`ListenSink`] and [`RevenueLedger`].
//! Mirrors the per-user split between the global listen statistics
//! (feeding top-artist/top-genre summaries) and the premium/free
//! classification maps that back revenue resolution.

use crate::traits::{ListenSink, PartId, RevenueLedger};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lump sum distributed across premium-classified listens on each
/// premium credit
pub const PREMIUM_CREDIT: f64 = 1_000_000.0;

/// (name, creator) key for listen maps
type PartKey = (String, String);

/// Listen statistics and revenue pools for one user
///
/// Note that the global listened map is not the sum of the premium and
/// free maps: the classification maps are cleared on every credit, the
/// global map never is.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UserAccounts {
    premium: bool,

    listened_tracks: HashMap<PartKey, i64>,
    listened_episodes: HashMap<PartKey, i64>,

    premium_plays: HashMap<PartKey, i64>,
    free_plays: HashMap<PartKey, i64>,

    payouts: HashMap<PartKey, f64>,
}

impl UserAccounts {
    /// Create accounts for a free-tier user
    pub fn new() -> Self {
        Self::default()
    }

    /// Current subscription flag
    pub fn is_premium(&self) -> bool {
        self.premium
    }

    /// Toggle the subscription
    ///
    /// Cancelling resolves the accumulated premium pool before the flag
    /// flips, so listens made while subscribed are paid at premium rates.
    pub fn switch_premium(&mut self) -> bool {
        if self.premium {
            self.credit_premium_share();
        }

        self.premium = !self.premium;
        self.premium
    }

    /// Total listens recorded for a track
    pub fn track_listens(&self, name: &str, artist: &str) -> i64 {
        self.listened_tracks
            .get(&(name.to_string(), artist.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Total listens recorded for an episode
    pub fn episode_listens(&self, podcast: &str, episode: &str) -> i64 {
        self.listened_episodes
            .get(&(episode.to_string(), podcast.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Revenue paid out to a track so far
    pub fn payout(&self, name: &str, artist: &str) -> f64 {
        self.payouts
            .get(&(name.to_string(), artist.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    /// All accumulated payouts
    pub fn payouts(&self) -> impl Iterator<Item = (&PartKey, f64)> {
        self.payouts.iter().map(|(k, v)| (k, *v))
    }

    /// Track listen totals, for top-artist/top-genre summaries
    pub fn listened_tracks(&self) -> impl Iterator<Item = (&PartKey, i64)> {
        self.listened_tracks.iter().map(|(k, v)| (k, *v))
    }

    /// Pending listen weight in the free-tier pool
    pub fn free_pool_weight(&self) -> i64 {
        self.free_plays.values().sum()
    }

    /// Pending listen weight in the premium pool
    pub fn premium_pool_weight(&self) -> i64 {
        self.premium_plays.values().sum()
    }

    fn distribute(payouts: &mut HashMap<PartKey, f64>, pool: &mut HashMap<PartKey, i64>, sum: f64) {
        let total: i64 = pool.values().sum();
        if total > 0 {
            for (key, weight) in pool.iter() {
                let share = sum * (*weight as f64) / (total as f64);
                *payouts.entry(key.clone()).or_insert(0.0) += share;
            }
        }
        pool.clear();
    }
}

impl ListenSink for UserAccounts {
    fn record_listen(&mut self, part: &PartId, delta: i64) {
        match part {
            PartId::Track(track) => {
                let key = (track.name.clone(), track.artist.clone());

                let pool = if self.premium {
                    &mut self.premium_plays
                } else {
                    &mut self.free_plays
                };
                *pool.entry(key.clone()).or_insert(0) += delta;

                *self.listened_tracks.entry(key).or_insert(0) += delta;
            }
            PartId::Episode { podcast, index } => {
                let Some(episode) = podcast.episodes().get(*index) else {
                    return;
                };
                let key = (episode.name.clone(), podcast.name.clone());
                *self.listened_episodes.entry(key).or_insert(0) += delta;
            }
        }
    }
}

impl RevenueLedger for UserAccounts {
    fn credit_ad_revenue(&mut self, price: f64) {
        Self::distribute(&mut self.payouts, &mut self.free_plays, price);
    }

    fn credit_premium_share(&mut self) {
        Self::distribute(&mut self.payouts, &mut self.premium_plays, PREMIUM_CREDIT);
    }
}

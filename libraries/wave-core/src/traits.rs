/// Collaborator seams for the playback engine
///
/// The engine never touches the catalog, listen statistics or revenue
/// pools directly. It reports through these traits, and the surrounding
/// system (or a test fake) decides what to do with the reports.
use crate::error::Result;
use crate::types::{AudioItem, Podcast, Track};
use std::sync::Arc;

/// Identity of one atomic playable part, as reported to listen sinks
#[derive(Debug, Clone)]
pub enum PartId {
    /// A track, playing alone or as a collection member
    Track(Arc<Track>),

    /// A podcast episode, identified by podcast and position
    Episode { podcast: Arc<Podcast>, index: usize },
}

impl PartId {
    /// Display name of the part
    pub fn name(&self) -> &str {
        match self {
            Self::Track(track) => &track.name,
            Self::Episode { podcast, index } => podcast
                .episodes()
                .get(*index)
                .map_or("", |e| e.name.as_str()),
        }
    }

    /// Creator identity: artist for tracks, host for episodes
    pub fn creator(&self) -> &str {
        match self {
            Self::Track(track) => &track.artist,
            Self::Episode { podcast, .. } => &podcast.owner,
        }
    }
}

/// Listen-event sink
///
/// Receives one increment per part played through and occasional negative
/// corrections for in-progress parts. Implementations must tolerate
/// negative deltas without underflow panics.
pub trait ListenSink {
    /// Record a listen delta for a part
    fn record_listen(&mut self, part: &PartId, delta: i64);
}

/// Revenue pool resolution
///
/// Both credits distribute a lump sum proportionally across the
/// listen-weighted map accumulated since the last credit, then clear
/// that map.
pub trait RevenueLedger {
    /// Distribute an ad payment across free-tier listens
    fn credit_ad_revenue(&mut self, price: f64);

    /// Distribute the premium subscription pool across premium listens
    fn credit_premium_share(&mut self);
}

/// Catalog lookup and deletion guard
pub trait Catalog {
    /// Resolve an item by name
    fn resolve(&self, name: &str) -> Option<AudioItem>;

    /// Remove an item, refusing while reference ties are held
    fn remove(&mut self, name: &str) -> Result<()>;
}

/// Fire-and-forget notification fan-out
///
/// The playback engine itself never notifies; this seam exists for the
/// surrounding page/subscription layer.
pub trait NotificationSink {
    /// Deliver a notification to a named recipient
    fn notify(&mut self, recipient: &str, subject: &str, message: &str);
}

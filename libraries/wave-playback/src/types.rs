//! Shared playback vocabulary: repeat modes and status snapshots

use serde::{Deserialize, Serialize};
use wave_core::ItemKind;

/// Repeat behavior for the loaded item
///
/// The three modes form a cycle; `cycle()` advances to the next one.
/// Display labels depend on what is loaded: a collection reads
/// "Repeat All" / "Repeat Current Song" where a single track or a
/// podcast reads "Repeat Once" / "Repeat Infinite".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop at the natural end
    #[default]
    Off,

    /// One extra full pass, then demote to `Off`
    AllOnce,

    /// Pin the current part forever
    CurrentInfinite,
}

impl RepeatMode {
    /// Next mode in the Off -> AllOnce -> CurrentInfinite -> Off cycle
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::AllOnce,
            Self::AllOnce => Self::CurrentInfinite,
            Self::CurrentInfinite => Self::Off,
        }
    }

    /// User-facing label, phrased for the loaded item kind
    pub fn label(self, kind: ItemKind) -> &'static str {
        match (self, kind) {
            (Self::Off, _) => "No Repeat",
            (Self::AllOnce, ItemKind::Collection) => "Repeat All",
            (Self::AllOnce, _) => "Repeat Once",
            (Self::CurrentInfinite, ItemKind::Collection) => "Repeat Current Song",
            (Self::CurrentInfinite, _) => "Repeat Infinite",
        }
    }
}

/// Point-in-time view of a player, as reported to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatus {
    /// Name of the current part, empty once playback has run out
    pub name: String,

    /// Seconds left in the current part
    #[serde(rename = "remainedTime")]
    pub remaining: u64,

    /// Repeat label, e.g. "No Repeat"
    pub repeat: String,

    /// Whether a shuffle order is active
    pub shuffle: bool,

    /// Whether the player is paused
    pub paused: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_around() {
        let mut mode = RepeatMode::Off;
        mode = mode.cycle();
        assert_eq!(mode, RepeatMode::AllOnce);
        mode = mode.cycle();
        assert_eq!(mode, RepeatMode::CurrentInfinite);
        mode = mode.cycle();
        assert_eq!(mode, RepeatMode::Off);
    }

    #[test]
    fn labels_depend_on_item_kind() {
        assert_eq!(RepeatMode::Off.label(ItemKind::Track), "No Repeat");
        assert_eq!(RepeatMode::AllOnce.label(ItemKind::Collection), "Repeat All");
        assert_eq!(RepeatMode::AllOnce.label(ItemKind::Podcast), "Repeat Once");
        assert_eq!(
            RepeatMode::CurrentInfinite.label(ItemKind::Collection),
            "Repeat Current Song"
        );
        assert_eq!(
            RepeatMode::CurrentInfinite.label(ItemKind::Track),
            "Repeat Infinite"
        );
    }
}

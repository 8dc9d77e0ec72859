//! Time advance
//!
//! The single entry point [`advance`] moves a [`PlaybackState`] forward
//! by a number of elapsed seconds, walking part boundaries according to
//! the repeat mode and reporting listens to the sink as parts are
//! entered. Callers settle ad holds before calling; this module is
//! unaware of ads.
//!
//! Listen bookkeeping inside collections and podcasts works by
//! backing out the credit the current part already holds and then
//! re-crediting every part the walk lands on or passes through. A walk
//! that stays inside the current part is therefore listen-neutral, and
//! a full playthrough credits each part exactly once.

use crate::error::{PlaybackError, Result};
use crate::state::{PlaybackState, StateVariant};
use crate::types::RepeatMode;
use std::sync::Arc;
use wave_core::{AudioItem, Collection, ListenSink, PartId, Podcast, Track};

/// Advance `state` by `elapsed` seconds of playback on `item`
pub(crate) fn advance(
    item: &AudioItem,
    state: &mut PlaybackState,
    elapsed: u64,
    sink: &mut dyn ListenSink,
) -> Result<()> {
    if elapsed == 0 || state.finished {
        return Ok(());
    }
    match (item, &state.variant) {
        (AudioItem::Track(track), StateVariant::Track) => {
            advance_track(track, state, elapsed);
            Ok(())
        }
        (AudioItem::Collection(collection), StateVariant::Collection { .. }) => {
            advance_collection(collection, state, elapsed, sink)
        }
        (AudioItem::Podcast(podcast), StateVariant::Podcast { .. }) => {
            advance_podcast(podcast, state, elapsed, sink)
        }
        _ => Err(PlaybackError::StateMismatch(state_label(item))),
    }
}

fn state_label(item: &AudioItem) -> &'static str {
    match item {
        AudioItem::Track(_) => "track state",
        AudioItem::Collection(_) => "collection state",
        AudioItem::Podcast(_) => "podcast state",
    }
}

fn advance_track(track: &Arc<Track>, state: &mut PlaybackState, elapsed: u64) {
    // A zero-duration track has nothing left to play under any mode.
    if track.duration == 0 {
        state.clear();
        return;
    }
    state.position += elapsed;
    if state.position < track.duration {
        return;
    }
    match state.repeat {
        RepeatMode::Off => state.clear(),
        RepeatMode::CurrentInfinite => state.position %= track.duration,
        RepeatMode::AllOnce => {
            state.position %= track.duration;
            state.repeat = RepeatMode::Off;
        }
    }
}

fn advance_collection(
    collection: &Arc<Collection>,
    state: &mut PlaybackState,
    elapsed: u64,
    sink: &mut dyn ListenSink,
) -> Result<()> {
    let tracks = collection.tracks();
    let len = tracks.len();
    let current = tracks
        .get(state.part_index)
        .ok_or(PlaybackError::StateMismatch("collection part"))?;

    if state.repeat == RepeatMode::CurrentInfinite {
        if current.duration == 0 {
            state.clear();
            return Ok(());
        }
        state.position = (state.position + elapsed) % current.duration;
        return Ok(());
    }

    // A wrap-around walk only drains the elapsed budget if a full lap
    // consumes time.
    if state.repeat == RepeatMode::AllOnce && tracks.iter().all(|t| t.duration == 0) {
        state.clear();
        return Ok(());
    }

    // Back out the credit the current part already holds; the walk
    // below re-credits it on landing or passing.
    sink.record_listen(&PartId::Track(current.clone()), -1);

    let mut budget = state.position + elapsed;
    let mut effective = state.effective_index();
    while effective < len {
        let original = state.original_index_at(effective);
        let track = tracks
            .get(original)
            .ok_or(PlaybackError::StateMismatch("collection part"))?;
        sink.record_listen(&PartId::Track(track.clone()), 1);
        if budget < track.duration {
            state.part_index = original;
            state.position = budget;
            state.last_part_duration = track.duration;
            return Ok(());
        }
        budget -= track.duration;
        effective = if state.repeat == RepeatMode::AllOnce {
            (effective + 1) % len
        } else {
            effective + 1
        };
    }

    state.clear();
    Ok(())
}

fn advance_podcast(
    podcast: &Arc<Podcast>,
    state: &mut PlaybackState,
    elapsed: u64,
    sink: &mut dyn ListenSink,
) -> Result<()> {
    let episodes = podcast.episodes();
    let len = episodes.len();

    if state.repeat == RepeatMode::CurrentInfinite && episodes.iter().all(|e| e.duration == 0) {
        state.clear();
        return Ok(());
    }

    sink.record_listen(
        &PartId::Episode {
            podcast: podcast.clone(),
            index: state.part_index,
        },
        -1,
    );

    let mut budget = state.position + elapsed;
    let mut index = state.part_index;
    while index < len {
        sink.record_listen(
            &PartId::Episode {
                podcast: podcast.clone(),
                index,
            },
            1,
        );
        let duration = episodes
            .get(index)
            .map(|e| e.duration)
            .ok_or(PlaybackError::StateMismatch("podcast part"))?;
        if budget < duration {
            state.part_index = index;
            state.position = budget;
            state.last_part_duration = duration;
            state.finished = false;
            return Ok(());
        }
        budget -= duration;
        index = if state.repeat == RepeatMode::CurrentInfinite {
            (index + 1) % len
        } else {
            index + 1
        };
    }

    if state.repeat == RepeatMode::AllOnce {
        // One replay from the top, then regular end-of-list behavior
        state.repeat = RepeatMode::Off;
        state.part_index = 0;
        state.position = 0;
        return advance_podcast(podcast, state, budget, sink);
    }

    // Park at the end of the final episode so the bookmark resumes
    // there instead of restarting.
    let episode = episodes
        .last()
        .ok_or(PlaybackError::StateMismatch("podcast part"))?;
    state.part_index = len - 1;
    state.position = episode.duration;
    state.last_part_duration = episode.duration;
    state.finished = true;
    Ok(())
}

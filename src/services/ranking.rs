// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Segmentation & ranking: filter a snapshot into one segment and assign
//! dense 1-based ranks under a deterministic total order.
//!
//! This is pure, synchronous, CPU-only code. It is re-run in full on
//! every refresh cycle, so determinism matters more than speed: the same
//! input must always produce the same rank sequence, or ranks would
//! churn between cycles with no underlying change.

use std::cmp::Ordering;

use crate::models::{ActivityRecord, Segment, SortMode};

/// A record with its 1-based rank in the segment, before movement
/// deltas are attached.
#[derive(Debug, Clone)]
pub struct RankedRecord {
    pub record: ActivityRecord,
    pub rank: u32,
}

/// Filter `snapshot` down to `segment` and rank it under `sort`.
///
/// Ranks are dense: 1..=N with no gaps and no shared positions. Equal
/// performers are separated by the tie-break keys, and as a final
/// fallback by participant id, so the order is fully specified for any
/// input. An empty segment yields an empty vec, not an error.
pub fn rank_segment(
    snapshot: &[ActivityRecord],
    segment: Segment,
    sort: SortMode,
) -> Vec<RankedRecord> {
    let mut members: Vec<&ActivityRecord> = snapshot
        .iter()
        .filter(|r| r.gender == segment.gender && r.activity_type == segment.activity_type)
        .collect();

    // Stable sort plus the participant-id fallback keeps repeated runs
    // on identical input byte-for-byte identical.
    members.sort_by(|a, b| compare(a, b, sort));

    members
        .into_iter()
        .enumerate()
        .map(|(i, record)| RankedRecord {
            record: record.clone(),
            rank: (i + 1) as u32,
        })
        .collect()
}

/// Total order over records for one sort mode.
fn compare(a: &ActivityRecord, b: &ActivityRecord, sort: SortMode) -> Ordering {
    let primary = match sort {
        // Larger distance ranks better; faster time wins an exact tie.
        SortMode::ByDistance => b
            .distance_meters
            .total_cmp(&a.distance_meters)
            .then_with(|| a.elapsed_seconds.cmp(&b.elapsed_seconds)),
        // Faster wins; distance is not a key in this mode.
        SortMode::ByTime => a.elapsed_seconds.cmp(&b.elapsed_seconds),
    };
    primary.then_with(|| a.participant_id.as_str().cmp(b.participant_id.as_str()))
}

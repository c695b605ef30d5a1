// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View assembly: top-N slice, podium sub-slice, and viewer pinning.

use chrono::{DateTime, Utc};

use crate::models::{LeaderboardView, ParticipantId, RankedEntry, ViewerPlacement};

/// Assemble the presentation-facing view from one full ranking.
///
/// The podium is a prefix of the top slice, never computed separately.
/// The viewer is located in the FULL ranking, so their pinned entry
/// carries the exact rank and delta already assigned even when they sit
/// far below the top-N cutoff.
pub fn assemble_view(
    full_ranking: Vec<RankedEntry>,
    viewer: &ParticipantId,
    top_n: usize,
    podium_size: usize,
    updated_at: DateTime<Utc>,
) -> LeaderboardView {
    let viewer = full_ranking
        .iter()
        .find(|entry| &entry.record.participant_id == viewer)
        .cloned()
        .map_or(ViewerPlacement::NotRanked, ViewerPlacement::Ranked);

    let total_ranked = full_ranking.len();
    let mut entries = full_ranking;
    entries.truncate(top_n);
    let podium = entries[..podium_size.min(entries.len())].to_vec();

    LeaderboardView {
        entries,
        podium,
        viewer,
        total_ranked,
        updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityRecord, ActivityType, Gender};

    fn entry(id: &str, rank: u32) -> RankedEntry {
        RankedEntry {
            record: ActivityRecord {
                participant_id: ParticipantId::from(id),
                display_name: id.to_string(),
                gender: Gender::Female,
                activity_type: ActivityType::Cycling,
                distance_meters: 40_000.0 - f64::from(rank),
                elapsed_seconds: 5_000 + rank,
                activity_timestamp: Utc::now(),
                registered_distance_meters: 40_000.0,
                external_activity_ref: None,
            },
            rank,
            rank_delta: 0,
        }
    }

    fn full_ranking(n: u32) -> Vec<RankedEntry> {
        (1..=n).map(|rank| entry(&format!("p{:02}", rank), rank)).collect()
    }

    #[test]
    fn test_top_slice_and_podium() {
        let view = assemble_view(full_ranking(25), &ParticipantId::from("p01"), 10, 3, Utc::now());

        assert_eq!(view.entries.len(), 10);
        assert_eq!(view.podium.len(), 3);
        assert_eq!(view.total_ranked, 25);
        // Podium is a prefix of the top slice.
        for (p, e) in view.podium.iter().zip(view.entries.iter()) {
            assert_eq!(p.record.participant_id, e.record.participant_id);
        }
    }

    #[test]
    fn test_viewer_outside_top_n_keeps_true_rank() {
        let view = assemble_view(full_ranking(25), &ParticipantId::from("p17"), 10, 3, Utc::now());

        match view.viewer {
            ViewerPlacement::Ranked(ref pinned) => assert_eq!(pinned.rank, 17),
            ViewerPlacement::NotRanked => panic!("viewer p17 is ranked"),
        }
        assert!(view.entries.iter().all(|e| e.rank <= 10));
    }

    #[test]
    fn test_viewer_absent_is_not_ranked_marker() {
        let view = assemble_view(full_ranking(5), &ParticipantId::from("ghost"), 10, 3, Utc::now());
        assert!(matches!(view.viewer, ViewerPlacement::NotRanked));
    }

    #[test]
    fn test_small_segment_shrinks_slices() {
        let view = assemble_view(full_ranking(2), &ParticipantId::from("p02"), 10, 3, Utc::now());
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.podium.len(), 2);
        assert!(view.viewer.is_ranked());
    }

    #[test]
    fn test_empty_ranking_is_valid() {
        let view = assemble_view(Vec::new(), &ParticipantId::from("p01"), 10, 3, Utc::now());
        assert!(view.entries.is_empty());
        assert!(view.podium.is_empty());
        assert_eq!(view.total_ranked, 0);
        assert!(matches!(view.viewer, ViewerPlacement::NotRanked));
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived ranking output types consumed by the presentation adapter.
//!
//! Nothing here is persisted. Every value is recomputed from scratch on
//! each refresh cycle; the only state carried between cycles lives in the
//! rank-movement tracker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ActivityRecord;

/// One row of a ranked leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedEntry {
    /// The underlying verified-activity record
    pub record: ActivityRecord,
    /// 1-based dense rank within the active segment and sort mode
    pub rank: u32,
    /// `previous_rank - rank` against the immediately preceding computation
    /// of the same selection; 0 on first appearance. Positive = moved up.
    pub rank_delta: i64,
}

/// The viewer's own row, surfaced regardless of the top-N cutoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewerPlacement {
    /// The viewer has a record in this segment; rank and delta are the
    /// exact values from the full ranking, never recomputed.
    Ranked(RankedEntry),
    /// The viewer has no record in this segment. Not an error: render as
    /// an invitation to participate.
    NotRanked,
}

impl ViewerPlacement {
    pub fn is_ranked(&self) -> bool {
        matches!(self, ViewerPlacement::Ranked(_))
    }
}

/// One refresh cycle's complete output for the active selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardView {
    /// Top-N slice of the full ranking
    pub entries: Vec<RankedEntry>,
    /// Podium sub-slice of `entries`, never independently computed
    pub podium: Vec<RankedEntry>,
    /// The viewer's pinned row or the explicit not-ranked marker
    pub viewer: ViewerPlacement,
    /// Size of the full filtered segment (not just the displayed slice)
    pub total_ranked: usize,
    /// Timestamp of the last successful cycle, for "updated at" display
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle phase of a live leaderboard subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedPhase {
    /// Before the first successful cycle completes
    InitialLoading,
    /// A view is published and no cycle is in flight
    Steady,
    /// A view is published and a refresh cycle is in flight
    /// (stale-while-revalidate: the published view stays visible)
    BackgroundRefreshing,
    /// The initial fetch failed; terminal for this subscription
    Failed,
}

/// The value published to subscribers on every phase or view change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedState {
    pub phase: FeedPhase,
    /// Last successfully computed view. `None` only before the first
    /// successful cycle (or forever, if the initial fetch failed).
    pub view: Option<LeaderboardView>,
}

impl FeedState {
    pub(crate) fn initial() -> Self {
        Self {
            phase: FeedPhase::InitialLoading,
            view: None,
        }
    }

    pub fn is_initial_loading(&self) -> bool {
        self.phase == FeedPhase::InitialLoading
    }

    pub fn is_background_refreshing(&self) -> bool {
        self.phase == FeedPhase::BackgroundRefreshing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityType, Gender, ParticipantId};

    // The presentation adapter consumes these values as JSON; pin the
    // externally visible field shapes.
    #[test]
    fn test_viewer_placement_json_shape() {
        let not_ranked = serde_json::to_value(ViewerPlacement::NotRanked).unwrap();
        assert_eq!(not_ranked["status"], "not_ranked");

        let ranked = ViewerPlacement::Ranked(RankedEntry {
            record: ActivityRecord {
                participant_id: ParticipantId::from("p1"),
                display_name: "Asha".to_string(),
                gender: Gender::Female,
                activity_type: ActivityType::Running,
                distance_meters: 10_000.0,
                elapsed_seconds: 3_000,
                activity_timestamp: Utc::now(),
                registered_distance_meters: 10_000.0,
                external_activity_ref: None,
            },
            rank: 14,
            rank_delta: -2,
        });
        let json = serde_json::to_value(ranked).unwrap();
        assert_eq!(json["status"], "ranked");
        assert_eq!(json["rank"], 14);
        assert_eq!(json["rank_delta"], -2);
        assert_eq!(json["record"]["gender"], "female");
        assert_eq!(json["record"]["activity_type"], "running");
    }

    #[test]
    fn test_feed_phase_serializes_snake_case() {
        let phase = serde_json::to_value(FeedPhase::BackgroundRefreshing).unwrap();
        assert_eq!(phase, "background_refreshing");
    }
}

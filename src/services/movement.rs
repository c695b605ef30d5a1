// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rank-movement tracking between consecutive computations.
//!
//! The tracker retains exactly one generation of ranks, for the one
//! selection currently being observed. Deltas are one-step: new rank
//! against the immediately preceding computation, never a rolling
//! history. A selection change discards the baseline outright.

use std::collections::HashMap;

use crate::models::{ParticipantId, RankedEntry, ViewSelection};
use crate::services::ranking::RankedRecord;

/// Per-subscription movement state.
#[derive(Debug, Default)]
pub struct RankMovementTracker {
    /// Selection the retained baseline belongs to
    baseline_for: Option<ViewSelection>,
    /// Rank each participant held as of the previous computation
    previous_ranks: HashMap<ParticipantId, u32>,
}

impl RankMovementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach movement deltas to a freshly ranked segment, then swap the
    /// retained baseline to the new ranks.
    ///
    /// If `selection` differs from the baseline's selection, the old
    /// baseline is meaningless and every delta is 0. Participants absent
    /// from `ranked` simply drop out of the baseline.
    pub fn annotate(
        &mut self,
        selection: ViewSelection,
        ranked: Vec<RankedRecord>,
    ) -> Vec<RankedEntry> {
        if self.baseline_for != Some(selection) {
            self.previous_ranks.clear();
            self.baseline_for = Some(selection);
        }

        let mut next_ranks = HashMap::with_capacity(ranked.len());
        let entries = ranked
            .into_iter()
            .map(|RankedRecord { record, rank }| {
                let rank_delta = match self.previous_ranks.get(&record.participant_id) {
                    Some(&previous) => i64::from(previous) - i64::from(rank),
                    None => 0,
                };
                next_ranks.insert(record.participant_id.clone(), rank);
                RankedEntry {
                    record,
                    rank,
                    rank_delta,
                }
            })
            .collect();

        self.previous_ranks = next_ranks;
        entries
    }
}

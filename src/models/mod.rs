// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the leaderboard engine.

pub mod ranking;
pub mod record;

pub use ranking::{FeedPhase, FeedState, LeaderboardView, RankedEntry, ViewerPlacement};
pub use record::{
    ActivityRecord, ActivityType, Gender, ParticipantId, Segment, SortMode, ViewSelection,
};

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Challenge-Leaderboard: ranking and live-update engine for timed
//! virtual fitness challenges.
//!
//! Turns a continuously-changing set of verified activity records into a
//! stable, segmented, rank-ordered view with movement indicators. The
//! viewing participant's own row stays visible regardless of rank, and a
//! per-subscription scheduler keeps the view fresh without ever blanking
//! already-displayed data.
//!
//! The surrounding application supplies an [`db::ActivityRecordStore`]
//! implementation and consumes [`models::FeedState`] values from a
//! [`services::LeaderboardFeed`] subscription.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use config::FeedConfig;
pub use db::ActivityRecordStore;
pub use error::{LeaderboardError, Result};
pub use models::{
    ActivityRecord, ActivityType, FeedPhase, FeedState, Gender, LeaderboardView, ParticipantId,
    RankedEntry, Segment, SortMode, ViewSelection, ViewerPlacement,
};
pub use services::LeaderboardFeed;

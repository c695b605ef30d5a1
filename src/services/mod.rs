// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the ranking pipeline.

pub mod feed;
pub mod movement;
pub mod ranking;
pub mod view;

pub use feed::LeaderboardFeed;
pub use movement::RankMovementTracker;
pub use ranking::{rank_segment, RankedRecord};
pub use view::assemble_view;

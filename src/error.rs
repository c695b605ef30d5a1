// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Engine error types.

/// Error type for leaderboard operations.
#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    /// The Activity Record Store query failed or timed out. The engine
    /// treats both identically.
    #[error("Activity store error: {0}")]
    Store(String),

    /// The subscription's background task is gone (unsubscribed or failed),
    /// so commands can no longer be delivered.
    #[error("Leaderboard feed is closed")]
    FeedClosed,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, LeaderboardError>;

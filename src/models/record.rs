// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Verified-activity record model consumed by the ranking engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name used when the upstream record carries no name.
pub const DISPLAY_NAME_PLACEHOLDER: &str = "Participant";

/// Opaque, stable participant identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Participant gender, one of the two leaderboard segmentation axes.
///
/// Records arriving without a gender are normalized to `Male` at the
/// ingestion boundary (`db::ingest`). That default is inherited from the
/// upstream registration data, not invented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Registered activity category, the other segmentation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Running,
    Cycling,
}

/// Leaderboard ordering mode. Changes the ordering of a segment, never
/// its membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Distance descending, elapsed time ascending on exact-distance ties.
    ByDistance,
    /// Elapsed time ascending; distance is not a key in this mode.
    ByTime,
}

/// The (gender, activity type) filter defining one independent leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub gender: Gender,
    pub activity_type: ActivityType,
}

impl Segment {
    pub fn new(gender: Gender, activity_type: ActivityType) -> Self {
        Self {
            gender,
            activity_type,
        }
    }
}

/// The (segment, sort mode) pair a consumer is currently viewing.
///
/// Rank-movement baselines are only meaningful within a continuous
/// observation of one selection; changing either field starts fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewSelection {
    pub segment: Segment,
    pub sort: SortMode,
}

impl ViewSelection {
    pub fn new(segment: Segment, sort: SortMode) -> Self {
        Self { segment, sort }
    }
}

/// One verified activity per (participant, challenge).
///
/// The store guarantees at most one eligible record per participant;
/// a participant with no verified activity is simply absent from the
/// snapshot. Both measures are non-negative by the time a record gets
/// here (enforced at ingestion).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Stable participant identifier
    pub participant_id: ParticipantId,
    /// Human-readable name, never empty
    pub display_name: String,
    /// Segmentation axis: gender
    pub gender: Gender,
    /// Segmentation axis: registered activity category
    pub activity_type: ActivityType,
    /// Measured distance of the qualifying activity (meters)
    pub distance_meters: f64,
    /// Duration of the qualifying activity (seconds)
    pub elapsed_seconds: u32,
    /// When the activity occurred (display/tie-break context, not a rank key)
    pub activity_timestamp: DateTime<Utc>,
    /// Distance committed to at registration (display annotation only)
    pub registered_distance_meters: f64,
    /// External activity reference for the outbound verification link
    pub external_activity_ref: Option<String>,
}

impl ActivityRecord {
    /// Whether the participant covered the distance they committed to at
    /// registration. Display annotation only, never a ranking input.
    pub fn met_registered_distance(&self) -> bool {
        self.distance_meters >= self.registered_distance_meters
    }

    /// Outbound verification link to the source activity, when a reference
    /// is available.
    pub fn activity_url(&self) -> Option<String> {
        self.external_activity_ref
            .as_deref()
            .map(|id| format!("https://www.strava.com/activities/{}", id))
    }
}

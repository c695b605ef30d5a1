// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Snapshot ingestion: loose store records in, typed records out.
//!
//! All input normalization happens here, once, so the ranking core only
//! ever sees total, well-formed data:
//! - missing gender defaults to male (inherited upstream convention)
//! - missing display name gets a placeholder
//! - malformed records are excluded and logged, never fatal
//! - duplicate participant ids are dropped defensively (first wins)

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::record::DISPLAY_NAME_PLACEHOLDER;
use crate::models::{ActivityRecord, ActivityType, Gender, ParticipantId};

/// Record shape as returned by the Activity Record Store query.
///
/// Everything the upstream system is sloppy about is optional here.
#[derive(Debug, Clone, Deserialize)]
pub struct RawActivityRecord {
    /// Participant identifier; records without one are unusable
    pub participant_id: Option<String>,
    /// Display name, possibly missing or blank
    pub display_name: Option<String>,
    /// Gender string as registered ("male"/"female", any case)
    pub gender: Option<String>,
    /// Registered category string (e.g. "running", "cycling")
    pub category: Option<String>,
    /// Measured distance in meters
    pub distance_meters: Option<f64>,
    /// Elapsed time in seconds
    pub elapsed_seconds: Option<i64>,
    /// Activity start time, RFC 3339
    pub activity_timestamp: Option<String>,
    /// Distance committed to at registration, meters
    pub registered_distance_meters: Option<f64>,
    /// External activity reference (e.g. Strava activity ID)
    pub external_activity_ref: Option<String>,
}

/// Normalize a raw snapshot into typed records, excluding anything
/// malformed. One bad record must never blank the leaderboard.
pub fn normalize_snapshot(raw: Vec<RawActivityRecord>) -> Vec<ActivityRecord> {
    let total = raw.len();
    let mut seen: HashSet<ParticipantId> = HashSet::with_capacity(total);
    let mut records = Vec::with_capacity(total);

    for entry in raw {
        let record = match normalize_record(entry) {
            Ok(record) => record,
            Err(reason) => {
                tracing::warn!(reason, "Excluding malformed activity record");
                continue;
            }
        };

        // The store guarantees one record per participant, but the pure
        // core must never receive duplicates regardless.
        if !seen.insert(record.participant_id.clone()) {
            tracing::warn!(
                participant_id = %record.participant_id,
                "Excluding duplicate activity record"
            );
            continue;
        }

        records.push(record);
    }

    if records.len() < total {
        tracing::info!(
            accepted = records.len(),
            excluded = total - records.len(),
            "Snapshot normalized with exclusions"
        );
    }

    records
}

fn normalize_record(raw: RawActivityRecord) -> Result<ActivityRecord, &'static str> {
    let participant_id = match raw.participant_id {
        Some(id) if !id.trim().is_empty() => ParticipantId::new(id),
        _ => return Err("missing participant id"),
    };

    let distance_meters = raw.distance_meters.ok_or("missing distance")?;
    if !distance_meters.is_finite() || distance_meters < 0.0 {
        return Err("negative or non-finite distance");
    }

    let elapsed_seconds = match raw.elapsed_seconds {
        Some(secs) if secs >= 0 => {
            u32::try_from(secs).map_err(|_| "elapsed time out of range")?
        }
        Some(_) => return Err("negative elapsed time"),
        None => return Err("missing elapsed time"),
    };

    let activity_timestamp = raw
        .activity_timestamp
        .as_deref()
        .ok_or("missing activity timestamp")
        .and_then(parse_timestamp)?;

    let registered_distance_meters = match raw.registered_distance_meters {
        Some(meters) if meters.is_finite() && meters >= 0.0 => meters,
        Some(meters) => {
            tracing::warn!(
                participant_id = %participant_id,
                meters,
                "Clamping invalid registered distance to zero"
            );
            0.0
        }
        None => 0.0,
    };

    Ok(ActivityRecord {
        participant_id,
        display_name: normalize_display_name(raw.display_name),
        gender: normalize_gender(raw.gender.as_deref()),
        activity_type: normalize_category(raw.category.as_deref())?,
        distance_meters,
        elapsed_seconds,
        activity_timestamp,
        registered_distance_meters,
        external_activity_ref: raw.external_activity_ref,
    })
}

/// Upstream registration data treats gender as optional and defaults to
/// male. Applied here once so the ranking core stays total.
fn normalize_gender(raw: Option<&str>) -> Gender {
    match raw.map(str::trim) {
        Some(g) if g.eq_ignore_ascii_case("female") => Gender::Female,
        _ => Gender::Male,
    }
}

fn normalize_category(raw: Option<&str>) -> Result<ActivityType, &'static str> {
    match raw.map(str::trim) {
        Some(c) if c.eq_ignore_ascii_case("running") => Ok(ActivityType::Running),
        Some(c) if c.eq_ignore_ascii_case("cycling") => Ok(ActivityType::Cycling),
        _ => Err("unrecognized registered category"),
    }
}

fn normalize_display_name(raw: Option<String>) -> String {
    match raw {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => DISPLAY_NAME_PLACEHOLDER.to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, &'static str> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| "unparseable activity timestamp")
}

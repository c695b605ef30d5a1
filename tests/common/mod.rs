// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test helpers: raw-record builders and a programmable mock
//! Activity Record Store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use challenge_leaderboard::db::{ActivityRecordStore, RawActivityRecord};
use challenge_leaderboard::{LeaderboardError, Result};

/// Install a test tracing subscriber once per process. Run with
/// `RUST_LOG=challenge_leaderboard=debug` to watch the feed lifecycle.
#[allow(dead_code)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a well-formed raw record with the given performance.
#[allow(dead_code)]
pub fn raw_record(
    id: &str,
    gender: &str,
    category: &str,
    distance_meters: f64,
    elapsed_seconds: i64,
) -> RawActivityRecord {
    RawActivityRecord {
        participant_id: Some(id.to_string()),
        display_name: Some(format!("Participant {}", id)),
        gender: Some(gender.to_string()),
        category: Some(category.to_string()),
        distance_meters: Some(distance_meters),
        elapsed_seconds: Some(elapsed_seconds),
        activity_timestamp: Some("2026-03-01T06:30:00Z".to_string()),
        registered_distance_meters: Some(distance_meters),
        external_activity_ref: None,
    }
}

/// Shorthand for a male running record.
#[allow(dead_code)]
pub fn runner(id: &str, distance_meters: f64, elapsed_seconds: i64) -> RawActivityRecord {
    raw_record(id, "male", "running", distance_meters, elapsed_seconds)
}

/// Mock store returning a programmable sequence of snapshots.
///
/// Each fetch pops the next queued response; when the queue is down to
/// one entry that response repeats forever. Call counting lets tests
/// assert that unsubscribing really stops the scheduler.
pub struct MockStore {
    responses: Mutex<Vec<Result<Vec<RawActivityRecord>>>>,
    fetch_count: AtomicUsize,
    /// Simulated fetch latency, so tests can observe in-flight state
    latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

#[allow(dead_code)]
impl MockStore {
    pub fn with_snapshot(records: Vec<RawActivityRecord>) -> Arc<Self> {
        Self::with_responses(vec![Ok(records)])
    }

    pub fn with_responses(responses: Vec<Result<Vec<RawActivityRecord>>>) -> Arc<Self> {
        Self::with_latency(Duration::ZERO, responses)
    }

    pub fn with_latency(
        latency: Duration,
        responses: Vec<Result<Vec<RawActivityRecord>>>,
    ) -> Arc<Self> {
        assert!(
            !responses.is_empty(),
            "MockStore needs at least one response"
        );
        Arc::new(Self {
            responses: Mutex::new(responses),
            fetch_count: AtomicUsize::new(0),
            latency,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::with_responses(vec![Err(LeaderboardError::Store(message.to_string()))])
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    /// Highest number of fetches ever in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ActivityRecordStore for MockStore {
    async fn fetch_verified_records(&self, _challenge_id: &str) -> Result<Vec<RawActivityRecord>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let mut responses = self.responses.lock().expect("mock store poisoned");
        if responses.len() > 1 {
            responses.remove(0)
        } else {
            clone_response(&responses[0])
        }
    }
}

fn clone_response(response: &Result<Vec<RawActivityRecord>>) -> Result<Vec<RawActivityRecord>> {
    match response {
        Ok(records) => Ok(records.clone()),
        Err(LeaderboardError::Store(msg)) => Err(LeaderboardError::Store(msg.clone())),
        Err(other) => Err(LeaderboardError::Store(other.to_string())),
    }
}

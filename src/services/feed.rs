// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live refresh scheduling for one leaderboard subscription.
//!
//! Each subscription owns a single background task that runs the
//! fetch-and-rank cycle: once synchronously up front, then on a fixed
//! interval until the handle is dropped. State is published through a
//! watch channel; segment/sort switches and manual refreshes arrive as
//! commands. Because the one task awaits every fetch inline, two cycles
//! can never overlap and the movement baseline is always applied in
//! order.
//!
//! Lifecycle per subscription: `InitialLoading` → `Steady`, or
//! `InitialLoading` → `Failed` (terminal; subscribe again to retry).
//! While live, every cycle passes through `BackgroundRefreshing` and
//! back to `Steady`, keeping the last good view published throughout
//! (stale-while-revalidate). Background fetch failures are logged and
//! swallowed; they never blank an already-rendered leaderboard.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::config::FeedConfig;
use crate::db::{normalize_snapshot, ActivityRecordStore};
use crate::error::{LeaderboardError, Result};
use crate::models::{
    ActivityRecord, FeedPhase, FeedState, LeaderboardView, ParticipantId, ViewSelection,
};
use crate::services::movement::RankMovementTracker;
use crate::services::ranking::rank_segment;
use crate::services::view::assemble_view;

/// Commands a subscription handle can send to its worker task.
#[derive(Debug)]
enum FeedCommand {
    SetSelection(ViewSelection),
    Refresh,
}

/// Handle to one live leaderboard subscription.
///
/// Dropping the handle unsubscribes: the worker task is aborted, its
/// timer stops, and any in-flight fetch is discarded with it. A late
/// response can never touch the (already gone) tracker state.
pub struct LeaderboardFeed {
    state_rx: watch::Receiver<FeedState>,
    command_tx: mpsc::UnboundedSender<FeedCommand>,
    task: JoinHandle<()>,
}

impl LeaderboardFeed {
    /// Subscribe to a live leaderboard for one challenge, as seen by one
    /// viewer. Kicks off the initial fetch-and-rank cycle immediately.
    pub fn subscribe(
        store: Arc<dyn ActivityRecordStore>,
        challenge_id: impl Into<String>,
        viewer: ParticipantId,
        selection: ViewSelection,
        config: FeedConfig,
    ) -> Self {
        let (state_tx, state_rx) = watch::channel(FeedState::initial());
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let worker = FeedWorker {
            store,
            challenge_id: challenge_id.into(),
            viewer,
            selection,
            config,
            tracker: RankMovementTracker::new(),
            last_snapshot: Vec::new(),
            last_updated: None,
            state: state_tx,
        };
        let task = tokio::spawn(worker.run(command_rx));

        Self {
            state_rx,
            command_tx,
            task,
        }
    }

    /// Current published state (non-blocking).
    pub fn state(&self) -> FeedState {
        self.state_rx.borrow().clone()
    }

    /// A receiver for observing every published state change.
    pub fn watch(&self) -> watch::Receiver<FeedState> {
        self.state_rx.clone()
    }

    /// Wait for the next published state change and return it.
    pub async fn changed(&mut self) -> Result<FeedState> {
        self.state_rx
            .changed()
            .await
            .map_err(|_| LeaderboardError::FeedClosed)?;
        Ok(self.state_rx.borrow().clone())
    }

    /// Switch segment and/or sort mode. Re-ranks the cached snapshot
    /// immediately with a fresh movement baseline (all deltas 0); the
    /// next interval tick restores data freshness.
    pub fn set_selection(&self, selection: ViewSelection) -> Result<()> {
        self.command_tx
            .send(FeedCommand::SetSelection(selection))
            .map_err(|_| LeaderboardError::FeedClosed)
    }

    /// Request an immediate refresh cycle ahead of the next interval tick.
    pub fn refresh_now(&self) -> Result<()> {
        self.command_tx
            .send(FeedCommand::Refresh)
            .map_err(|_| LeaderboardError::FeedClosed)
    }
}

impl Drop for LeaderboardFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// State owned by the subscription's background task.
struct FeedWorker {
    store: Arc<dyn ActivityRecordStore>,
    challenge_id: String,
    viewer: ParticipantId,
    selection: ViewSelection,
    config: FeedConfig,
    tracker: RankMovementTracker,
    /// Most recent normalized snapshot, reused for selection switches
    last_snapshot: Vec<ActivityRecord>,
    /// Timestamp of the last successful cycle
    last_updated: Option<DateTime<Utc>>,
    state: watch::Sender<FeedState>,
}

impl FeedWorker {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<FeedCommand>) {
        // Initial cycle: a failure here is user-visible and terminal for
        // this subscription.
        match self.run_cycle().await {
            Ok(()) => {
                tracing::debug!(challenge_id = %self.challenge_id, "Leaderboard feed live");
            }
            Err(err) => {
                tracing::error!(
                    challenge_id = %self.challenge_id,
                    error = %err,
                    "Initial leaderboard fetch failed"
                );
                self.publish(FeedPhase::Failed);
                return;
            }
        }

        // Delay rather than burst on missed ticks, so a slow fetch can
        // never queue up overlapping cycles.
        let period = self.config.refresh_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.background_cycle().await;
                }
                cmd = commands.recv() => match cmd {
                    Some(FeedCommand::SetSelection(selection)) => {
                        if selection != self.selection {
                            tracing::debug!(
                                challenge_id = %self.challenge_id,
                                ?selection,
                                "Switching leaderboard selection"
                            );
                            self.selection = selection;
                            // Re-rank the cached snapshot right away; the
                            // tracker sees the new selection and starts a
                            // fresh baseline.
                            let view = self.recompute();
                            self.publish_view(FeedPhase::Steady, view);
                        }
                    }
                    Some(FeedCommand::Refresh) => {
                        self.background_cycle().await;
                        ticker.reset();
                    }
                    // All handles dropped.
                    None => break,
                },
            }
        }
    }

    /// One background cycle: failures are logged and swallowed, and the
    /// last good view stays published throughout.
    async fn background_cycle(&mut self) {
        self.publish(FeedPhase::BackgroundRefreshing);
        match self.run_cycle().await {
            Ok(()) => {}
            Err(err) => {
                tracing::warn!(
                    challenge_id = %self.challenge_id,
                    error = %err,
                    "Background leaderboard refresh failed; keeping last good view"
                );
                self.publish(FeedPhase::Steady);
            }
        }
    }

    /// Fetch, normalize, rank, and publish one complete view.
    async fn run_cycle(&mut self) -> Result<()> {
        let raw = self
            .store
            .fetch_verified_records(&self.challenge_id)
            .await?;
        self.last_snapshot = normalize_snapshot(raw);
        self.last_updated = Some(Utc::now());

        let view = self.recompute();
        tracing::debug!(
            challenge_id = %self.challenge_id,
            total_ranked = view.total_ranked,
            "Leaderboard cycle complete"
        );
        self.publish_view(FeedPhase::Steady, view);
        Ok(())
    }

    /// Rank the cached snapshot for the current selection. Pure and
    /// synchronous; safe to run as often as needed.
    fn recompute(&mut self) -> LeaderboardView {
        let ranked = rank_segment(
            &self.last_snapshot,
            self.selection.segment,
            self.selection.sort,
        );
        let entries = self.tracker.annotate(self.selection, ranked);
        assemble_view(
            entries,
            &self.viewer,
            self.config.top_n,
            self.config.podium_size,
            self.last_updated.unwrap_or_else(Utc::now),
        )
    }

    fn publish(&self, phase: FeedPhase) {
        self.state.send_modify(|state| state.phase = phase);
    }

    fn publish_view(&self, phase: FeedPhase, view: LeaderboardView) {
        self.state.send_modify(|state| {
            state.phase = phase;
            state.view = Some(view);
        });
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cancellable periodic task driven by host frame time
//!
//! Nothing runs in the background: the host calls [`PeriodicTask::advance`]
//! with elapsed time and acts on the returned tick. Cancelling takes effect
//! before `cancel` returns, so no tick can fire afterwards.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default playback tick interval
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

/// What a playback tick does
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackMode {
    /// Draw fresh random values for every zone
    #[default]
    Simulated,
    /// Step the time index through recorded series
    Replay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TaskState {
    Running,
    Cancelled,
}

/// Fixed-interval ticker
///
/// Fires at most once per [`advance`](Self::advance); time accumulated past
/// one further interval is dropped, so at most one tick is ever pending.
#[derive(Clone, Debug)]
pub struct PeriodicTask {
    interval: Duration,
    elapsed: Duration,
    state: TaskState,
    ticks: u64,
}

impl PeriodicTask {
    /// Start a running task
    pub fn start(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            state: TaskState::Running,
            ticks: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_active(&self) -> bool {
        self.state == TaskState::Running
    }

    /// Number of ticks fired so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Stop the task; pending time is discarded
    pub fn cancel(&mut self) {
        self.state = TaskState::Cancelled;
        self.elapsed = Duration::ZERO;
    }

    /// Add elapsed time, returning whether a tick fired
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.is_active() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed < self.interval {
            return false;
        }
        let remaining = self.elapsed - self.interval;
        if remaining > self.interval {
            log::trace!(
                "Playback fell behind by {:?}, dropping missed ticks",
                remaining - self.interval
            );
        }
        self.elapsed = remaining.min(self.interval);
        self.ticks += 1;
        true
    }
}

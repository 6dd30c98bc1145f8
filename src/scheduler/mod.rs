//! Detection pacing state machine.
//!
//! The scheduler decouples detection cost from the caller's rendering
//! cadence. Each call is classified as one of four effective states:
//! throttled, cache hit, hold-over, or fresh scan. Only the fresh state runs
//! the matcher; the others reuse earlier outcomes so transient misses and
//! high tick rates do not translate into CPU spikes or flicker.
//!
//! The result cache is keyed on frame dimensions only, not content: any two
//! frames of identical dimensions within `cache_timeout` are treated as
//! identical. That is a deliberate CPU/accuracy trade-off carried over from
//! the original engine, and it can mask a real scene change that happens to
//! keep the same dimension key.

use crate::engine::DetectionResult;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Pacing configuration; all values are runtime-mutable plain data.
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Minimum spacing between scan attempts.
    pub detection_interval: Duration,
    /// Hold-over window: a positive result younger than this is reported
    /// even when the current frame no longer matches.
    pub detection_timeout: Duration,
    /// Maximum age of a reusable cache entry.
    pub cache_timeout: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            detection_interval: Duration::from_millis(250),
            detection_timeout: Duration::from_millis(500),
            cache_timeout: Duration::from_millis(1000),
        }
    }
}

/// Which reuse state served a non-fresh call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReusePath {
    /// The throttle interval has not elapsed since the last attempt.
    Throttled,
    /// A cache entry for the frame's dimension key was young enough.
    CacheHit,
    /// A previous positive result is still inside the hold-over window.
    HoldOver,
}

/// Outcome of [`DetectionScheduler::decide`].
#[derive(Clone, Debug)]
pub enum Decision {
    /// Reuse an earlier result without running the matcher.
    Reuse {
        result: DetectionResult,
        path: ReusePath,
    },
    /// Run a fresh scan and report it back via [`DetectionScheduler::record`].
    Scan,
}

#[derive(Clone, Debug)]
struct Stamped {
    at: Instant,
    result: DetectionResult,
}

/// Single-writer pacing state owned by the engine.
#[derive(Default)]
pub struct DetectionScheduler {
    last_run_at: Option<Instant>,
    held: Option<Stamped>,
    cache: HashMap<(usize, usize), Stamped>,
}

impl DetectionScheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies a detect call for a frame of `dims` at `now`.
    ///
    /// The attempt timestamp is stamped as soon as the throttle gate opens,
    /// before the cache and hold-over checks, so reused results pace the
    /// next attempt exactly like fresh scans do.
    pub fn decide(
        &mut self,
        dims: (usize, usize),
        now: Instant,
        cfg: &SchedulerConfig,
    ) -> Decision {
        if let Some(last) = self.last_run_at {
            if now.saturating_duration_since(last) < cfg.detection_interval {
                let result = self
                    .held
                    .as_ref()
                    .map(|held| held.result.clone())
                    .unwrap_or_else(DetectionResult::miss);
                return Decision::Reuse {
                    result,
                    path: ReusePath::Throttled,
                };
            }
        }
        self.last_run_at = Some(now);

        if let Some(entry) = self.cache.get(&dims) {
            if now.saturating_duration_since(entry.at) < cfg.cache_timeout {
                return Decision::Reuse {
                    result: entry.result.clone(),
                    path: ReusePath::CacheHit,
                };
            }
        }

        if let Some(held) = &self.held {
            if now.saturating_duration_since(held.at) < cfg.detection_timeout {
                return Decision::Reuse {
                    result: held.result.clone(),
                    path: ReusePath::HoldOver,
                };
            }
        }

        Decision::Scan
    }

    /// Records the outcome of a fresh scan.
    ///
    /// A positive result becomes both the cache entry for `dims` and the held
    /// result. A negative result only refreshes the cache; the held result is
    /// cleared once its age exceeds the hold-over window.
    pub fn record(
        &mut self,
        dims: (usize, usize),
        result: &DetectionResult,
        now: Instant,
        cfg: &SchedulerConfig,
    ) {
        if result.detected {
            self.held = Some(Stamped {
                at: now,
                result: result.clone(),
            });
        } else if let Some(held) = &self.held {
            if now.saturating_duration_since(held.at) > cfg.detection_timeout {
                self.held = None;
            }
        }
        self.cache.insert(
            dims,
            Stamped {
                at: now,
                result: result.clone(),
            },
        );
    }

    /// Drops all cached and held state.
    pub fn clear(&mut self) {
        self.last_run_at = None;
        self.held = None;
        self.cache.clear();
    }
}

//! Detection engine façade.
//!
//! Composes the template store, the sliding-window matcher and the pacing
//! scheduler into the single operation a caller invokes once per rendering
//! tick. Engines are plain values owned by the caller; construct as many as
//! needed, there is no process-wide instance.

use crate::image::RgbaView;
use crate::scheduler::{Decision, DetectionScheduler, ReusePath, SchedulerConfig};
use crate::search::{self, MatchCandidate, MatchOutcome, Point, SearchConfig, Size};
use crate::template::{Template, TemplateId, TemplateStore};
use crate::trace::{trace_event, trace_span};
use crate::util::{FrameMatchError, FrameMatchResult};
use std::time::Instant;

/// Stable, debounced detection signal reported to the caller.
///
/// When `detected` is true, `template`, `position` and `size` are set, the
/// window lies within frame bounds, and `confidence` exceeded the threshold
/// active at match time.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionResult {
    pub detected: bool,
    /// Name of the matched template.
    pub template: Option<String>,
    /// Top-left corner of the matched window in frame space.
    pub position: Option<Point>,
    /// Matched window dimensions, equal to the template's.
    pub size: Option<Size>,
    /// Similarity in `[0, 1]`; 0.0 when nothing matched.
    pub confidence: f32,
}

impl DetectionResult {
    /// A negative result.
    pub fn miss() -> Self {
        Self {
            detected: false,
            template: None,
            position: None,
            size: None,
            confidence: 0.0,
        }
    }

    pub(crate) fn hit(template: &str, candidate: MatchCandidate) -> Self {
        Self {
            detected: true,
            template: Some(template.to_string()),
            position: Some(candidate.position),
            size: Some(candidate.size),
            confidence: candidate.confidence,
        }
    }
}

/// Engine configuration; every field is runtime-mutable via
/// [`DetectionEngine::config_mut`].
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Match acceptance cutoff; a candidate must score strictly above it.
    pub threshold: f32,
    /// Pacing knobs for the scheduler.
    pub scheduler: SchedulerConfig,
    /// Tuning knobs for the window scan.
    pub search: SearchConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            scheduler: SchedulerConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

/// Counters for how detect calls were served.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Calls that ran the matcher.
    pub fresh_scans: u64,
    /// Calls served inside the throttle interval.
    pub throttled: u64,
    /// Calls served from the dimension-keyed cache.
    pub cache_hits: u64,
    /// Calls served from the hold-over window.
    pub hold_overs: u64,
    /// Matcher faults absorbed into a miss.
    pub faults: u64,
}

/// Real-time template detection engine.
pub struct DetectionEngine {
    store: TemplateStore,
    scheduler: DetectionScheduler,
    config: EngineConfig,
    stats: EngineStats,
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectionEngine {
    /// Creates an engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            store: TemplateStore::new(),
            scheduler: DetectionScheduler::new(),
            config,
            stats: EngineStats::default(),
        }
    }

    /// Registers a reference image from a decoded RGBA buffer.
    ///
    /// Names are unique by convention only; a repeated name creates an
    /// independent entry that is scanned in its own registration slot.
    pub fn register_template(
        &mut self,
        name: impl Into<String>,
        data: Vec<u8>,
        width: usize,
        height: usize,
    ) -> FrameMatchResult<TemplateId> {
        let template = Template::from_rgba(name, data, width, height)?;
        let id = self.store.register(template)?;
        trace_event!("template_registered", width = width, height = height);
        Ok(id)
    }

    /// Returns the template store.
    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns a mutable handle for runtime reconfiguration.
    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    /// Returns counters describing how calls have been served.
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Runs one detection tick against the current wall clock.
    pub fn detect(&mut self, frame: RgbaView<'_>) -> FrameMatchResult<DetectionResult> {
        self.detect_at(frame, Instant::now())
    }

    /// Runs one detection tick at an explicit timestamp.
    ///
    /// Timestamps must be monotonically non-decreasing across calls. This is
    /// the entry point for deterministic replay and tests; `detect` forwards
    /// to it with `Instant::now()`.
    pub fn detect_at(
        &mut self,
        frame: RgbaView<'_>,
        now: Instant,
    ) -> FrameMatchResult<DetectionResult> {
        if self.store.is_disposed() {
            return Err(FrameMatchError::StoreDisposed);
        }
        let _span = trace_span!("detect", width = frame.width(), height = frame.height()).entered();

        let dims = (frame.width(), frame.height());
        match self.scheduler.decide(dims, now, &self.config.scheduler) {
            Decision::Reuse { result, path } => {
                match path {
                    ReusePath::Throttled => self.stats.throttled += 1,
                    ReusePath::CacheHit => self.stats.cache_hits += 1,
                    ReusePath::HoldOver => self.stats.hold_overs += 1,
                }
                Ok(result)
            }
            Decision::Scan => {
                self.stats.fresh_scans += 1;
                let result = match self.first_match(frame) {
                    Ok(MatchOutcome::Matched {
                        template,
                        candidate,
                    }) => {
                        let name = self.store.get(template)?.name();
                        trace_event!("detected", confidence = candidate.confidence);
                        DetectionResult::hit(name, candidate)
                    }
                    Ok(MatchOutcome::NoMatch) => DetectionResult::miss(),
                    Err(fault) => {
                        // A single bad frame must never take down the loop;
                        // degrade to a miss and leave cache/held state alone.
                        self.stats.faults += 1;
                        let reason = fault.to_string();
                        trace_event!("match_fault", reason = reason.as_str());
                        return Ok(DetectionResult::miss());
                    }
                };
                self.scheduler
                    .record(dims, &result, now, &self.config.scheduler);
                Ok(result)
            }
        }
    }

    /// Releases templates and pacing state. Later calls fail with
    /// [`FrameMatchError::StoreDisposed`].
    pub fn dispose(&mut self) {
        self.store.dispose();
        self.scheduler.clear();
    }

    /// Returns whether the engine has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.store.is_disposed()
    }

    /// Scans templates in registration order; first past the threshold wins.
    fn first_match(&self, frame: RgbaView<'_>) -> FrameMatchResult<MatchOutcome> {
        for (index, template) in self.store.list()?.iter().enumerate() {
            if let Some(candidate) = search::search(frame, template.view(), &self.config.search)? {
                if candidate.confidence > self.config.threshold {
                    return Ok(MatchOutcome::Matched {
                        template: TemplateId(index),
                        candidate,
                    });
                }
            }
        }
        Ok(MatchOutcome::NoMatch)
    }
}

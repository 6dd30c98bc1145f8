//! FrameMatch is a real-time reference-image detection engine for live video
//! frames.
//!
//! The crate provides a CPU-bounded sliding-window matcher and a pacing
//! scheduler (throttle, dimension-keyed cache, hold-over) that turns noisy
//! per-frame matches into a stable detection signal, with optional
//! structured logging via the `tracing` feature and image loading via the
//! `image-io` feature.

pub mod engine;
pub mod image;
pub mod lowlevel;
pub mod overlay;
pub mod scheduler;
pub mod search;
pub mod template;
pub(crate) mod trace;
pub mod util;

pub use engine::{DetectionEngine, DetectionResult, EngineConfig, EngineStats};
pub use image::{OwnedImage, RgbaView};
pub use scheduler::{Decision, DetectionScheduler, ReusePath, SchedulerConfig};
pub use search::{search, MatchCandidate, MatchOutcome, Point, SearchConfig, Size};
pub use template::{Template, TemplateId, TemplateStore};
pub use util::{FrameMatchError, FrameMatchResult};

#[cfg(feature = "image-io")]
pub use image::io;

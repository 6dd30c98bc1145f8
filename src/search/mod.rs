//! Sliding-window similarity search.
//!
//! The matcher is stateless: one frame, one template, one best candidate. It
//! trades recall for a hard upper bound on per-call cost through three knobs
//! in [`SearchConfig`]: a center-biased search margin, a template-derived
//! scan step, and a fixed candidate budget.

use crate::image::RgbaView;
use crate::template::TemplateId;
use crate::util::FrameMatchResult;

pub(crate) mod scan;
pub(crate) mod score;

/// Top-left pixel coordinate in frame space.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

/// Window dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

/// Best window found for one template in one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MatchCandidate {
    /// Top-left corner of the matched window.
    pub position: Point,
    /// Window dimensions, always equal to the template's.
    pub size: Size,
    /// Similarity in `[0, 1]`; 1.0 is pixel-identical over sampled points.
    pub confidence: f32,
}

/// Outcome of scanning the registered templates in order.
///
/// Deliberately a tagged early-return value rather than a max-reduce: the
/// first template clearing the threshold wins even when a later template
/// would score higher.
#[derive(Clone, Debug)]
pub enum MatchOutcome {
    /// No template cleared the threshold.
    NoMatch,
    /// The first template that cleared the threshold, with its best window.
    Matched {
        template: TemplateId,
        candidate: MatchCandidate,
    },
}

/// Tuning knobs for the bounded window scan.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Hard cap on evaluated candidate windows per search.
    pub max_candidates: usize,
    /// Confidence above which the scan returns without finishing.
    pub early_exit: f32,
    /// Upper bound on the search margin in pixels.
    pub margin_cap: usize,
    /// Margin as a fraction of the smaller frame edge.
    pub margin_frac: f32,
    /// Scan step is `min(template edges) / step_divisor`, floored.
    pub step_divisor: usize,
    /// Lower bound on the scan step in pixels.
    pub min_step: usize,
    /// Score sampling step is `min(window edges) / sample_divisor`, floored.
    pub sample_divisor: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_candidates: 100,
            early_exit: 0.8,
            margin_cap: 80,
            margin_frac: 0.08,
            step_divisor: 20,
            min_step: 3,
            sample_divisor: 10,
        }
    }
}

/// Searches one frame for the best window matching `template`.
///
/// A template larger than the frame on either axis cannot match and returns
/// `Ok(None)` deterministically. `None` is also returned when the search
/// region degenerates (template nearly frame-sized) or when no window scores
/// above zero.
pub fn search(
    frame: RgbaView<'_>,
    template: RgbaView<'_>,
    cfg: &SearchConfig,
) -> FrameMatchResult<Option<MatchCandidate>> {
    if template.width() > frame.width() || template.height() > frame.height() {
        return Ok(None);
    }
    scan::scan_frame(frame, template, cfg)
}

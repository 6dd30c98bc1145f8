//! Bounded window grid scan.

use crate::image::RgbaView;
use crate::search::score::{sample_step, score_window};
use crate::search::{MatchCandidate, Point, SearchConfig, Size};
use crate::trace::trace_event;
use crate::util::FrameMatchResult;

/// Margin excluded from each frame edge, biasing the scan toward the center.
pub(crate) fn margin_for(frame_width: usize, frame_height: usize, cfg: &SearchConfig) -> usize {
    let by_fraction = (frame_width.min(frame_height) as f32 * cfg.margin_frac) as usize;
    cfg.margin_cap.min(by_fraction)
}

/// Grid step derived from the template size; coarser templates scan coarser.
pub(crate) fn step_for(tpl_width: usize, tpl_height: usize, cfg: &SearchConfig) -> usize {
    (tpl_width.min(tpl_height) / cfg.step_divisor.max(1)).max(cfg.min_step.max(1))
}

/// Scans the central region of the frame and returns the best candidate.
///
/// The scan is greedy and scan-order dependent: the first window whose
/// confidence exceeds `cfg.early_exit` is returned without examining the
/// rest of the region, and once `cfg.max_candidates` windows have been
/// evaluated the scan stops even if unexamined area remains. The caller has
/// already checked that the template fits inside the frame.
pub fn scan_frame(
    frame: RgbaView<'_>,
    template: RgbaView<'_>,
    cfg: &SearchConfig,
) -> FrameMatchResult<Option<MatchCandidate>> {
    let tpl_width = template.width();
    let tpl_height = template.height();
    let margin = margin_for(frame.width(), frame.height(), cfg) as i64;
    let step = step_for(tpl_width, tpl_height, cfg) as i64;
    let sampling = sample_step(tpl_width, tpl_height, cfg.sample_divisor);

    let start = margin;
    let end_x = frame.width() as i64 - tpl_width as i64 - margin;
    let end_y = frame.height() as i64 - tpl_height as i64 - margin;

    let size = Size {
        width: tpl_width,
        height: tpl_height,
    };
    let mut best: Option<MatchCandidate> = None;
    let mut best_confidence = 0.0f32;
    let mut evaluated = 0usize;

    let mut y = start;
    'rows: while y <= end_y {
        let mut x = start;
        while x <= end_x {
            if evaluated >= cfg.max_candidates {
                break 'rows;
            }
            evaluated += 1;

            let confidence = score_window(frame, template, x as usize, y as usize, sampling)?;
            if confidence > best_confidence {
                best_confidence = confidence;
                best = Some(MatchCandidate {
                    position: Point {
                        x: x as usize,
                        y: y as usize,
                    },
                    size,
                    confidence,
                });
                if confidence > cfg.early_exit {
                    trace_event!("scan_early_exit", evaluated = evaluated, confidence = confidence);
                    return Ok(best);
                }
            }

            x += step;
        }
        y += step;
    }

    trace_event!("scan_complete", evaluated = evaluated, best = best_confidence);
    Ok(best)
}

//! Sparse window similarity scoring.

use crate::image::RgbaView;
use crate::util::{FrameMatchError, FrameMatchResult};

/// Returns the sampling step for a window of `width x height`.
pub(crate) fn sample_step(width: usize, height: usize, divisor: usize) -> usize {
    (width.min(height) / divisor.max(1)).max(1)
}

/// Scores the window at `(x, y)` against the template on a sparse sub-grid.
///
/// Every `sample_step`-th pixel on both axes contributes the mean absolute
/// difference of its R, G and B channels; alpha is ignored. The result is
/// `max(0, 1 - meanAbsDiff / 255)`, so a window that is pixel-identical to
/// the template at every sampled point scores exactly 1.0.
pub fn score_window(
    frame: RgbaView<'_>,
    template: RgbaView<'_>,
    x: usize,
    y: usize,
    sample_step: usize,
) -> FrameMatchResult<f32> {
    let width = template.width();
    let height = template.height();
    let step = sample_step.max(1);

    let mut total_diff = 0.0f32;
    let mut samples = 0u32;

    let mut ty = 0;
    while ty < height {
        let frame_row = frame.row(y + ty).ok_or(FrameMatchError::MatchFault {
            reason: "frame row out of bounds",
        })?;
        let tpl_row = template.row(ty).ok_or(FrameMatchError::MatchFault {
            reason: "template row out of bounds",
        })?;

        let mut tx = 0;
        while tx < width {
            let fi = (x + tx) * 4;
            let ti = tx * 4;
            let f = frame_row
                .get(fi..fi + 3)
                .ok_or(FrameMatchError::MatchFault {
                    reason: "frame sample out of bounds",
                })?;
            let t = tpl_row.get(ti..ti + 3).ok_or(FrameMatchError::MatchFault {
                reason: "template sample out of bounds",
            })?;

            let dr = (f[0] as i32 - t[0] as i32).abs();
            let dg = (f[1] as i32 - t[1] as i32).abs();
            let db = (f[2] as i32 - t[2] as i32).abs();
            total_diff += (dr + dg + db) as f32 / 3.0;
            samples += 1;

            tx += step;
        }
        ty += step;
    }

    if samples == 0 {
        return Ok(0.0);
    }
    let mean_diff = total_diff / samples as f32;
    Ok((1.0 - mean_diff / 255.0).max(0.0))
}

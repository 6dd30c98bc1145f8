//! Overlay animation pacing and placement.
//!
//! The renderer itself lives outside the crate; what belongs here is the
//! logical state the original overlay kept: a fixed-rate frame index and the
//! geometry that anchors the overlay to a detection window. The ticker is
//! driven by an explicit [`OverlayAnimation::tick`] from the caller's loop
//! rather than re-arming itself; after [`OverlayAnimation::stop`] returns,
//! no further tick advances the animation.

use crate::search::{Point, Size};
use std::time::{Duration, Instant};

/// Overlay tuning; values mirror the stock overlay treatment.
#[derive(Clone, Debug)]
pub struct OverlayConfig {
    /// Logical frames per second for the frame-cycling animation.
    pub fps: u32,
    /// Overlay edge relative to the larger target dimension.
    pub scale: f32,
    /// Lower bound on the overlay edge in pixels.
    pub min_size: f32,
    /// Minimum distance kept between the overlay and the viewport edges.
    pub edge_margin: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            fps: 8,
            scale: 1.5,
            min_size: 150.0,
            edge_margin: 10.0,
        }
    }
}

/// Axis-aligned draw rectangle in viewport space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Frame-cycling animation state with an explicit per-tick operation.
pub struct OverlayAnimation {
    config: OverlayConfig,
    frame_count: usize,
    current_frame: usize,
    last_advance: Option<Instant>,
    running: bool,
}

impl OverlayAnimation {
    /// Creates a stopped animation over `frame_count` logical frames.
    pub fn new(frame_count: usize) -> Self {
        Self::with_config(frame_count, OverlayConfig::default())
    }

    /// Creates a stopped animation with explicit tuning.
    pub fn with_config(frame_count: usize, config: OverlayConfig) -> Self {
        Self {
            config,
            frame_count,
            current_frame: 0,
            last_advance: None,
            running: false,
        }
    }

    /// Starts the animation. A no-op while already running, so the frame
    /// cadence is not reset by repeated start calls.
    pub fn start(&mut self, now: Instant) {
        if !self.running {
            self.running = true;
            self.last_advance = Some(now);
        }
    }

    /// Stops the animation; subsequent ticks return `None` until restarted.
    pub fn stop(&mut self) {
        self.running = false;
        self.last_advance = None;
    }

    /// Returns whether the animation is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the current logical frame index.
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Advances the animation if a frame period has elapsed and returns the
    /// frame index to draw, or `None` when stopped or empty.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        if !self.running || self.frame_count == 0 {
            return None;
        }
        let period = Duration::from_secs_f64(1.0 / self.config.fps.max(1) as f64);
        if let Some(last) = self.last_advance {
            if now.saturating_duration_since(last) >= period {
                self.current_frame = (self.current_frame + 1) % self.frame_count;
                self.last_advance = Some(now);
            }
        }
        Some(self.current_frame)
    }

    /// Returns the overlay tuning.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }
}

/// Computes where to draw an overlay frame of `art` dimensions, centered on
/// `target_position` and sized relative to `target_size`.
///
/// The overlay edge is `max(min_size, scale * max(target dims))`; the art is
/// fit inside that square preserving aspect ratio, then the rectangle is
/// clamped to keep `edge_margin` pixels from the viewport borders.
pub fn placement(
    art: Size,
    target_position: Point,
    target_size: Size,
    viewport: Size,
    config: &OverlayConfig,
) -> DrawRect {
    let target_edge = target_size.width.max(target_size.height) as f32;
    let edge = (target_edge * config.scale).max(config.min_size);

    let art_width = art.width.max(1) as f32;
    let art_height = art.height.max(1) as f32;
    let fit = (edge / art_width).min(edge / art_height);
    let width = art_width * fit;
    let height = art_height * fit;

    let x = target_position.x as f32 - width / 2.0;
    let y = target_position.y as f32 - height / 2.0;

    let margin = config.edge_margin;
    let x = x.min(viewport.width as f32 - width - margin).max(margin);
    let y = y.min(viewport.height as f32 - height - margin).max(margin);

    DrawRect {
        x,
        y,
        width,
        height,
    }
}

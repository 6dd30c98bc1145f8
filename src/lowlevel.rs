//! Low-level building blocks for custom detection pipelines.
//!
//! These functions expose the bounded window scan and the sparse window
//! scorer directly, for callers that manage their own pacing. Most users
//! should prefer the top-level [`DetectionEngine`](crate::DetectionEngine).

pub use crate::search::scan::scan_frame;
pub use crate::search::score::score_window;

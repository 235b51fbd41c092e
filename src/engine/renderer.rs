use crate::core::math::Matrix;
use crate::rig::{DrawSink, SegmentId};

/// One recorded segment draw: the segment and its model-view-projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub segment: SegmentId,
    pub mvp: Matrix,
}

/// Headless renderer that records each frame's draw calls in issue order.
///
/// Uploading `mvp` and drawing the cube mesh is left to whatever GPU backend
/// consumes [`draw_calls`](Self::draw_calls).
#[derive(Debug, Default)]
pub struct Renderer {
    frame_count: u64,
    draw_calls: Vec<DrawCall>,
    total_draws: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.draw_calls.clear();
        tracing::trace!(target: "renderer", frame = self.frame_count, "begin frame");
    }

    pub fn end_frame(&mut self) {
        self.frame_count += 1;
        tracing::trace!(
            target: "renderer",
            frame = self.frame_count,
            draws = self.draw_calls.len(),
            "end frame"
        );
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn total_draws(&self) -> u64 {
        self.total_draws
    }

    /// Draw calls of the current (or most recently finished) frame.
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }
}

impl DrawSink for Renderer {
    fn draw_segment(&mut self, segment: SegmentId, world: &Matrix) {
        self.total_draws += 1;
        self.draw_calls.push(DrawCall {
            segment,
            mvp: *world,
        });
    }
}

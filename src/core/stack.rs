use glam::Vec3;

use crate::core::error::StackError;
use crate::core::math::matrix::{self, Matrix};

pub const DEFAULT_DEPTH_LIMIT: usize = 100;

/// A stack of accumulated coordinate frames.
///
/// The stack is never empty: it starts with one identity frame and the bottom
/// frame can't be popped, so [`top_matrix`](Self::top_matrix) is always valid
/// after any balanced sequence of pushes and pops.
///
/// Every geometric operation post-multiplies onto the top frame
/// (`top ← top · M`), so transforms apply to subsequently drawn geometry in
/// the order they are issued.
#[derive(Debug, Clone)]
pub struct TransformStack {
    frames: Vec<Matrix>,
    depth_limit: usize,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self::with_depth_limit(DEFAULT_DEPTH_LIMIT)
    }

    /// # Panics
    /// If `depth_limit` is zero.
    pub fn with_depth_limit(depth_limit: usize) -> Self {
        assert!(depth_limit >= 1, "transform stack needs room for one frame");
        let mut frames = Vec::with_capacity(depth_limit.min(DEFAULT_DEPTH_LIMIT));
        frames.push(matrix::identity());
        Self {
            frames,
            depth_limit,
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    /// Duplicates the top frame.
    ///
    /// # Panics
    /// On overflow; see [`try_push_matrix`](Self::try_push_matrix).
    pub fn push_matrix(&mut self) {
        if let Err(err) = self.try_push_matrix() {
            panic!("{err}");
        }
    }

    pub fn try_push_matrix(&mut self) -> Result<(), StackError> {
        if self.frames.len() >= self.depth_limit {
            return Err(StackError::Overflow {
                limit: self.depth_limit,
            });
        }
        let top = *self.top_matrix();
        self.frames.push(top);
        Ok(())
    }

    /// Discards the top frame.
    ///
    /// # Panics
    /// If only the bottom frame is left.
    pub fn pop_matrix(&mut self) {
        if let Err(err) = self.try_pop_matrix() {
            panic!("{err}");
        }
    }

    pub fn try_pop_matrix(&mut self) -> Result<(), StackError> {
        if self.frames.len() <= 1 {
            return Err(StackError::Underflow);
        }
        self.frames.pop();
        Ok(())
    }

    /// Overwrites the top frame with identity without pushing.
    pub fn load_identity(&mut self) {
        *self.top_mut() = matrix::identity();
    }

    pub fn top_matrix(&self) -> &Matrix {
        // Never empty: construction pushes a frame and pop keeps the last one.
        &self.frames[self.frames.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Matrix {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// `top ← top · m`.
    pub fn mult_matrix(&mut self, m: &Matrix) {
        let top = self.top_mut();
        *top = matrix::mult(top, m);
    }

    pub fn translate(&mut self, t: Vec3) {
        self.mult_matrix(&matrix::translation(t));
    }

    pub fn translate_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.translate(Vec3::new(x, y, z));
    }

    pub fn scale(&mut self, s: Vec3) {
        self.mult_matrix(&matrix::scaling(s));
    }

    pub fn scale_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.scale(Vec3::new(x, y, z));
    }

    pub fn scale_uniform(&mut self, s: f32) {
        self.scale(Vec3::splat(s));
    }

    pub fn rotate_x(&mut self, angle: f32) {
        self.mult_matrix(&matrix::rotation_x(angle));
    }

    pub fn rotate_y(&mut self, angle: f32) {
        self.mult_matrix(&matrix::rotation_y(angle));
    }

    pub fn rotate_z(&mut self, angle: f32) {
        self.mult_matrix(&matrix::rotation_z(angle));
    }

    /// Composes a perspective projection. `fov_y` is in radians.
    pub fn perspective(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32) {
        self.mult_matrix(&matrix::perspective(fov_y, aspect, near, far));
    }

    pub fn look_at(&mut self, eye: Vec3, center: Vec3, up: Vec3) {
        self.mult_matrix(&matrix::look_at(eye, center, up));
    }

    /// Traces the top frame, printed row by row.
    pub fn log_top(&self, name: &str) {
        tracing::trace!(
            target: "transform",
            depth = self.depth(),
            "{name} =\n{}",
            matrix::format_rows(self.top_matrix())
        );
    }
}

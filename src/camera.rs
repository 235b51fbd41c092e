use glam::{Quat, Vec2, Vec3};

const DRAG_SENSITIVITY: f32 = 0.02;
const ZOOM_STEP: f32 = 1.1;

/// Look-at camera state, mutated by pointer input between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 20.0),
            center: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl Camera {
    pub fn new(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        Self { eye, center, up }
    }

    /// Scroll zoom. Each positive step moves the eye 1.1x closer to the
    /// center, each negative step 1.1x further away.
    pub fn zoom(&mut self, steps: i32) {
        let offset = (self.eye - self.center) / ZOOM_STEP.powi(steps);
        self.eye = self.center + offset;
    }

    /// Orbits the eye around the center from a cursor drag in pixels.
    ///
    /// Horizontal motion turns about `up`, vertical motion about the camera's
    /// right axis; `up` is carried along so the view doesn't flip.
    pub fn orbit(&mut self, delta: Vec2) {
        let theta = -DRAG_SENSITIVITY * delta.x;
        let phi = -DRAG_SENSITIVITY * delta.y;

        let offset = self.eye - self.center;
        let right = self.up.cross(offset).normalize();
        let yaw = Quat::from_axis_angle(self.up.normalize(), theta);
        let pitch = Quat::from_axis_angle(right, phi);
        let rotation = pitch * yaw;

        self.up = rotation * self.up;
        self.eye = self.center + rotation * offset;
    }

    /// Slides eye and center together in the XY plane from a cursor drag.
    pub fn pan(&mut self, delta: Vec2) {
        let shift = Vec3::new(DRAG_SENSITIVITY * delta.x, -DRAG_SENSITIVITY * delta.y, 0.0);
        self.eye += shift;
        self.center += shift;
    }
}

/// Turns absolute cursor positions into per-event deltas.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorTracker {
    last: Option<Vec2>,
}

impl CursorTracker {
    /// Records `position` and returns the motion since the previous call
    /// (zero on the first).
    pub fn moved_to(&mut self, position: Vec2) -> Vec2 {
        let delta = self.last.map_or(Vec2::ZERO, |last| position - last);
        self.last = Some(position);
        delta
    }
}

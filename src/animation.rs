use glam::Vec3;

use crate::rig::Robot;

const BOUNCE_LAG: f64 = 0.314;

/// Scripted walk cycle driven by absolute time.
///
/// There is no loop here: the host calls [`tick`](Self::tick) once per frame
/// while the walk is running and simply stops calling it to halt.
#[derive(Debug, Clone, Copy)]
pub struct WalkCycle {
    /// Angular frequency of the stride, radians per second.
    pub frequency: f32,
}

impl Default for WalkCycle {
    fn default() -> Self {
        Self { frequency: 6.0 }
    }
}

impl WalkCycle {
    pub fn new(frequency: f32) -> Self {
        Self { frequency }
    }

    /// Snaps the robot into the starting stride.
    pub fn start(&self, robot: &mut Robot) {
        tracing::debug!(target: "animation", frequency = self.frequency, "walk cycle started");
        robot.set_rotation(robot.torso, Vec3::new(0.8, 0.0, 0.0));
        robot.set_rotation(robot.head, Vec3::new(-0.5, 0.0, 0.0));
        robot.set_rotation(robot.left_arm.upper, Vec3::new(0.0, 1.0, 0.0));
        robot.set_rotation(robot.left_arm.lower, Vec3::ZERO);
        robot.set_rotation(robot.right_arm.upper, Vec3::new(0.0, -1.0, 0.0));
        robot.set_rotation(robot.right_arm.lower, Vec3::ZERO);
        robot.set_rotation(robot.left_leg.upper, Vec3::new(-2.0, 0.0, 0.0));
        robot.set_rotation(robot.left_leg.lower, Vec3::new(2.0, 0.0, 0.0));
        robot.set_rotation(robot.right_leg.upper, Vec3::ZERO);
        robot.set_rotation(robot.right_leg.lower, Vec3::ZERO);
    }

    /// Poses the robot for absolute time `time` in seconds.
    pub fn tick(&self, robot: &mut Robot, time: f64) {
        let phase = self.frequency as f64 * time;
        let swing = phase.sin() as f32;
        // Bounce runs at twice the stride rate, lagging it slightly.
        let bounce = 0.75 * (2.0 * phase - BOUNCE_LAG).sin() as f32;

        robot.figure.pose_mut(robot.torso).pivot_offset = Vec3::new(0.0, bounce, 0.0);
        robot.set_rotation(robot.torso, Vec3::new(0.8, 0.1 * swing, 0.0));

        robot.set_rotation(robot.left_arm.upper, Vec3::new(0.0, 1.0, 0.2 * swing - 0.5));
        robot.set_rotation(robot.right_arm.upper, Vec3::new(0.0, -1.0, 0.2 * swing + 0.5));

        robot.set_rotation(robot.left_leg.upper, Vec3::new(swing - 1.0, 0.0, 0.0));
        robot.set_rotation(robot.left_leg.lower, Vec3::new(1.0 - swing, 0.0, 0.0));
        robot.set_rotation(robot.right_leg.upper, Vec3::new(-swing - 1.0, 0.0, 0.0));
        robot.set_rotation(robot.right_leg.lower, Vec3::new(swing + 1.0, 0.0, 0.0));
    }
}

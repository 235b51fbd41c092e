use glam::Vec3;

use crate::rig::{Figure, Pose, SegmentId};

/// Handles to one side's upper and lower limb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limb {
    pub upper: SegmentId,
    pub lower: SegmentId,
}

/// The box-segment robot: a torso carrying a head, two two-part arms and two
/// two-part legs.
#[derive(Debug, Clone)]
pub struct Robot {
    pub figure: Figure,
    pub torso: SegmentId,
    pub head: SegmentId,
    pub left_arm: Limb,
    pub right_arm: Limb,
    pub left_leg: Limb,
    pub right_leg: Limb,
}

fn pose(pivot_offset: [f32; 3], joint_offset: [f32; 3], local_scale: [f32; 3]) -> Pose {
    Pose {
        pivot_offset: Vec3::from_array(pivot_offset),
        joint_rotation: Vec3::ZERO,
        joint_offset: Vec3::from_array(joint_offset),
        local_scale: Vec3::from_array(local_scale),
    }
}

impl Robot {
    /// Builds the rest pose. Torso children are ordered head, left arm, right
    /// arm, left leg, right leg.
    pub fn build() -> Self {
        let mut figure = Figure::new();
        let torso = figure.add_root("torso", pose([0.0; 3], [0.0; 3], [1.1, 2.2, 0.88]));
        let head = figure.add_child(
            torso,
            "head",
            pose([0.0, 2.5, 0.0], [0.0; 3], [0.5, 0.5, 0.5]),
        );

        let left_arm = Self::limb(
            &mut figure,
            torso,
            "left arm",
            pose([2.0, 1.5, 0.0], [-1.5, 0.0, 0.0], [1.0, 0.4, 0.4]),
            pose([2.0, 0.0, 0.0], [-1.5, 0.0, 0.0], [1.0, 0.3, 0.3]),
        );
        let right_arm = Self::limb(
            &mut figure,
            torso,
            "right arm",
            pose([-2.0, 1.5, 0.0], [1.5, 0.0, 0.0], [1.0, 0.4, 0.4]),
            pose([-2.0, 0.0, 0.0], [1.5, 0.0, 0.0], [1.0, 0.3, 0.3]),
        );
        let left_leg = Self::limb(
            &mut figure,
            torso,
            "left leg",
            pose([0.5, -4.0, 0.0], [0.0, 2.5, 0.0], [0.45, 2.0, 0.5]),
            pose([0.0, -4.0, 0.0], [0.0, 2.5, 0.0], [0.35, 2.0, 0.4]),
        );
        let right_leg = Self::limb(
            &mut figure,
            torso,
            "right leg",
            pose([-0.5, -4.0, 0.0], [0.0, 2.5, 0.0], [0.45, 2.0, 0.5]),
            pose([0.0, -4.0, 0.0], [0.0, 2.5, 0.0], [0.35, 2.0, 0.4]),
        );

        tracing::debug!(target: "rig", segments = figure.len(), "robot built");

        Self {
            figure,
            torso,
            head,
            left_arm,
            right_arm,
            left_leg,
            right_leg,
        }
    }

    fn limb(figure: &mut Figure, torso: SegmentId, name: &str, upper: Pose, lower: Pose) -> Limb {
        let upper = figure.add_child(torso, format!("upper {name}"), upper);
        let lower = figure.add_child(upper, format!("lower {name}"), lower);
        Limb { upper, lower }
    }

    pub fn set_rotation(&mut self, id: SegmentId, rotation: Vec3) {
        self.figure.pose_mut(id).joint_rotation = rotation;
    }
}

impl Default for Robot {
    fn default() -> Self {
        Self::build()
    }
}

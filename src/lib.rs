pub mod core {
    pub mod error;
    pub mod math;
    pub mod stack;
}

pub mod animation;
pub mod camera;
pub mod control;
pub mod engine;
pub mod rig;

pub use crate::core::error::StackError;
pub use crate::core::math::Matrix;
pub use crate::core::stack::TransformStack;
pub use rig::{DrawSink, Figure, Pose, Robot, Segment, SegmentId, Selection};

use anyhow::Result;

use crate::animation::WalkCycle;
use crate::camera::Camera;
use crate::control::{CommandQueue, EditCommand};
use crate::core::stack::TransformStack;
use crate::engine::core::EngineConfig;
use crate::rig::{DrawSink, Figure, Robot, Selection};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 60.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Everything a frame needs: the robot, what is selected, the camera, the
/// transform stack and whether the walk cycle is playing.
///
/// Edits and animation ticks happen between frames; [`render`](Self::render)
/// only reads poses.
#[derive(Debug)]
pub struct Scene {
    pub robot: Robot,
    pub selection: Selection,
    pub camera: Camera,
    pub projection: Projection,
    pub walk: WalkCycle,
    walking: bool,
    stack: TransformStack,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Robot::build(), Camera::default(), 1.1)
    }
}

impl Scene {
    pub fn new(mut robot: Robot, camera: Camera, highlight: f32) -> Self {
        let selection = Selection::new(&mut robot.figure, highlight);
        Self {
            robot,
            selection,
            camera,
            projection: Projection::default(),
            walk: WalkCycle::default(),
            walking: false,
            stack: TransformStack::new(),
        }
    }

    /// Builds the robot scene described by `config`, validating it first.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut scene = Self::new(Robot::build(), config.camera.camera(), config.highlight_scale);
        scene.projection = Projection {
            fov_y: config.projection.fov_y_degrees.to_radians(),
            near: config.projection.near,
            far: config.projection.far,
        };
        scene.walk = WalkCycle::new(config.walk.frequency);
        scene.stack = TransformStack::with_depth_limit(config.stack_depth_limit);
        Ok(scene)
    }

    /// Stack depth [`render`](Self::render) reaches for `figure`: the bottom
    /// frame, the camera frame and the traversal on top.
    pub fn render_depth(figure: &Figure) -> usize {
        2 + figure.draw_depth()
    }

    pub fn is_walking(&self) -> bool {
        self.walking
    }

    pub fn stack(&self) -> &TransformStack {
        &self.stack
    }

    pub fn apply(&mut self, command: EditCommand) {
        let figure = &mut self.robot.figure;
        match command {
            EditCommand::SelectNext => {
                self.selection.select_next(figure);
            }
            EditCommand::SelectPrevious => {
                self.selection.select_previous(figure);
            }
            EditCommand::Rotate(delta) => {
                figure.pose_mut(self.selection.current()).joint_rotation += delta;
            }
            EditCommand::Scale(factor) => {
                figure.pose_mut(self.selection.current()).local_scale *= factor;
            }
            EditCommand::ToggleWalk => {
                self.walking = !self.walking;
                if self.walking {
                    self.walk.start(&mut self.robot);
                } else {
                    tracing::debug!(target: "animation", "walk cycle stopped");
                }
            }
        }
    }

    /// Applies every queued command in arrival order. Returns how many ran.
    pub fn drain(&mut self, queue: &CommandQueue) -> usize {
        let mut applied = 0;
        while let Some(command) = queue.try_recv() {
            self.apply(command);
            applied += 1;
        }
        applied
    }

    /// Advances the walk cycle to absolute time `time` if it is playing.
    pub fn tick(&mut self, time: f64) {
        if self.walking {
            self.walk.tick(&mut self.robot, time);
        }
    }

    /// Draws the robot through the camera, one call per segment.
    pub fn render(&mut self, aspect: f32, sink: &mut impl DrawSink) {
        let stack = &mut self.stack;
        let entry_depth = stack.depth();

        stack.load_identity();
        stack.push_matrix();
        stack.perspective(
            self.projection.fov_y,
            aspect,
            self.projection.near,
            self.projection.far,
        );
        stack.look_at(self.camera.eye, self.camera.center, self.camera.up);
        stack.log_top("view_projection");
        self.robot.figure.draw(stack, sink);
        stack.pop_matrix();

        debug_assert_eq!(stack.depth(), entry_depth);
    }
}

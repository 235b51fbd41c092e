use std::sync::mpsc::{Receiver, Sender, channel};

use glam::Vec3;

pub const ROTATION_STEP: f32 = 0.1;
pub const SCALE_STEP: f32 = 1.1;

/// An edit applied to the scene between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditCommand {
    SelectNext,
    SelectPrevious,
    /// Adds to the selected segment's joint rotation, radians per axis.
    Rotate(Vec3),
    /// Multiplies the selected segment's local scale.
    Scale(f32),
    ToggleWalk,
}

impl EditCommand {
    /// Keyboard bindings: `.`/`,` walk the selection, `x y z` rotate
    /// negatively and `X Y Z` positively, `+`/`-` grow and shrink, `~` toggles
    /// the walk cycle.
    pub fn from_key(key: char) -> Option<Self> {
        let command = match key {
            '.' => Self::SelectNext,
            ',' => Self::SelectPrevious,
            'x' => Self::Rotate(Vec3::new(-ROTATION_STEP, 0.0, 0.0)),
            'X' => Self::Rotate(Vec3::new(ROTATION_STEP, 0.0, 0.0)),
            'y' => Self::Rotate(Vec3::new(0.0, -ROTATION_STEP, 0.0)),
            'Y' => Self::Rotate(Vec3::new(0.0, ROTATION_STEP, 0.0)),
            'z' => Self::Rotate(Vec3::new(0.0, 0.0, -ROTATION_STEP)),
            'Z' => Self::Rotate(Vec3::new(0.0, 0.0, ROTATION_STEP)),
            '+' => Self::Scale(SCALE_STEP),
            '-' => Self::Scale(1.0 / SCALE_STEP),
            '~' => Self::ToggleWalk,
            _ => return None,
        };
        Some(command)
    }
}

pub struct CommandQueue {
    receiver: Receiver<EditCommand>,
}

#[derive(Clone)]
pub struct CommandSender {
    sender: Sender<EditCommand>,
}

impl CommandQueue {
    pub fn new() -> (Self, CommandSender) {
        let (sender, receiver) = channel();
        (Self { receiver }, CommandSender { sender })
    }

    pub fn try_recv(&self) -> Option<EditCommand> {
        self.receiver.try_recv().ok()
    }
}

impl CommandSender {
    pub fn send(&self, cmd: EditCommand) {
        let _ = self.sender.send(cmd);
    }

    /// Sends the command bound to `key`, if any. Returns whether one was sent.
    pub fn send_key(&self, key: char) -> bool {
        match EditCommand::from_key(key) {
            Some(cmd) => {
                self.send(cmd);
                true
            }
            None => {
                tracing::trace!(target: "control", %key, "unbound key");
                false
            }
        }
    }
}

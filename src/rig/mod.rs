pub mod robot;
pub mod selection;

use glam::Vec3;

use crate::core::math::Matrix;
use crate::core::stack::TransformStack;

pub use robot::Robot;
pub use selection::Selection;

/// Index of a segment inside its [`Figure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(usize);

/// Local transform parameters of one rigid part.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    /// Translation from the parent's frame to this segment's pivot.
    pub pivot_offset: Vec3,
    /// Euler angles (X, Y, Z) about the joint, applied X then Y then Z.
    pub joint_rotation: Vec3,
    /// Where the joint sits relative to the segment's own origin.
    pub joint_offset: Vec3,
    /// Scale of this segment's own geometry only.
    pub local_scale: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            pivot_offset: Vec3::ZERO,
            joint_rotation: Vec3::ZERO,
            joint_offset: Vec3::ZERO,
            local_scale: Vec3::ONE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Segment {
    pub name: String,
    pub pose: Pose,
    parent: Option<SegmentId>,
    children: Vec<SegmentId>,
}

impl Segment {
    pub fn parent(&self) -> Option<SegmentId> {
        self.parent
    }

    pub fn children(&self) -> &[SegmentId] {
        &self.children
    }

    /// Composes this segment's local transform onto `stack`, leaving the frame
    /// at the pivot after rotation and before local scaling.
    fn apply_local(&self, stack: &mut TransformStack) {
        let pose = &self.pose;
        stack.translate(pose.joint_offset);
        stack.translate(pose.pivot_offset);
        stack.rotate_x(pose.joint_rotation.x);
        stack.rotate_y(pose.joint_rotation.y);
        stack.rotate_z(pose.joint_rotation.z);
        stack.translate(-pose.joint_offset);
    }
}

/// Receives one draw call per segment during traversal.
pub trait DrawSink {
    fn draw_segment(&mut self, id: SegmentId, world: &Matrix);
}

/// An articulated figure stored as an arena of segments.
///
/// Segments refer to their parent and children by [`SegmentId`]; the arena
/// owns them all. World matrices are never cached: each traversal recomposes
/// them from the current poses.
#[derive(Debug, Clone, Default)]
pub struct Figure {
    segments: Vec<Segment>,
    root: Option<SegmentId>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// If the figure already has a root.
    pub fn add_root(&mut self, name: impl Into<String>, pose: Pose) -> SegmentId {
        assert!(self.root.is_none(), "figure already has a root segment");
        let id = self.insert(name.into(), pose, None);
        self.root = Some(id);
        id
    }

    /// Appends a child after any existing siblings.
    ///
    /// # Panics
    /// If `parent` is not a segment of this figure. The figure is left
    /// unchanged.
    pub fn add_child(
        &mut self,
        parent: SegmentId,
        name: impl Into<String>,
        pose: Pose,
    ) -> SegmentId {
        let next = SegmentId(self.segments.len());
        match self.segments.get_mut(parent.0) {
            Some(segment) => segment.children.push(next),
            None => panic!("parent segment {} is not part of this figure", parent.0),
        }
        self.insert(name.into(), pose, Some(parent))
    }

    fn insert(&mut self, name: String, pose: Pose, parent: Option<SegmentId>) -> SegmentId {
        let id = SegmentId(self.segments.len());
        tracing::trace!(target: "rig", %name, index = id.0, "adding segment");
        self.segments.push(Segment {
            name,
            pose,
            parent,
            children: Vec::new(),
        });
        id
    }

    pub fn root(&self) -> Option<SegmentId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.0]
    }

    pub fn pose(&self, id: SegmentId) -> &Pose {
        &self.segments[id.0].pose
    }

    pub fn pose_mut(&mut self, id: SegmentId) -> &mut Pose {
        &mut self.segments[id.0].pose
    }

    pub fn find(&self, name: &str) -> Option<SegmentId> {
        self.segments
            .iter()
            .position(|segment| segment.name == name)
            .map(SegmentId)
    }

    /// Number of segments on the longest root-to-leaf path; zero when empty.
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut pending: Vec<(SegmentId, usize)> =
            self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((id, level)) = pending.pop() {
            tallest = tallest.max(level);
            let children = &self.segment(id).children;
            pending.extend(children.iter().map(|&child| (child, level + 1)));
        }
        tallest
    }

    /// Frames [`draw`](Self::draw) pushes above its entry depth at the deepest
    /// point: one per level plus the scale frame of the leaf.
    pub fn draw_depth(&self) -> usize {
        match self.height() {
            0 => 0,
            levels => levels + 1,
        }
    }

    /// Segments in depth-first pre-order from the root, children in list order.
    pub fn preorder(&self) -> Vec<SegmentId> {
        let mut order = Vec::with_capacity(self.segments.len());
        let mut pending: Vec<SegmentId> = self.root.into_iter().collect();
        while let Some(id) = pending.pop() {
            order.push(id);
            pending.extend(self.segment(id).children.iter().rev().copied());
        }
        order
    }

    /// Draws the whole figure. The stack depth on return equals the depth on
    /// entry.
    pub fn draw(&self, stack: &mut TransformStack, sink: &mut impl DrawSink) {
        if let Some(root) = self.root {
            self.draw_subtree(root, stack, sink);
        }
    }

    /// Draws `id` and its subtree inside the stack's current frame.
    pub fn draw_subtree(
        &self,
        id: SegmentId,
        stack: &mut TransformStack,
        sink: &mut impl DrawSink,
    ) {
        let entry_depth = stack.depth();
        let segment = self.segment(id);

        stack.push_matrix();
        segment.apply_local(stack);

        stack.push_matrix();
        stack.scale(segment.pose.local_scale);
        tracing::trace!(target: "rig", segment = %segment.name, depth = stack.depth(), "draw");
        sink.draw_segment(id, stack.top_matrix());
        stack.pop_matrix();

        for &child in &segment.children {
            self.draw_subtree(child, stack, sink);
        }

        stack.pop_matrix();
        debug_assert_eq!(stack.depth(), entry_depth);
    }

    /// Model matrix of `id` (local scale included) relative to the root's
    /// parent frame, recomposed from the ancestor chain.
    pub fn world_matrix(&self, id: SegmentId) -> Matrix {
        let mut chain = vec![id];
        let mut cursor = self.segment(id).parent;
        while let Some(parent) = cursor {
            chain.push(parent);
            cursor = self.segment(parent).parent;
        }

        let mut stack = TransformStack::new();
        for &link in chain.iter().rev() {
            self.segment(link).apply_local(&mut stack);
        }
        stack.scale(self.segment(id).pose.local_scale);
        *stack.top_matrix()
    }
}

use crate::rig::{Figure, SegmentId};

/// The segment currently being edited.
///
/// Moving the selection walks the figure in depth-first pre-order. The
/// selected segment is highlighted by inflating its local scale by
/// `highlight`, undone when the selection moves on.
#[derive(Debug, Clone)]
pub struct Selection {
    current: SegmentId,
    highlight: f32,
}

impl Selection {
    /// Selects the root and applies the highlight to it.
    ///
    /// # Panics
    /// If the figure has no root, or `highlight` is not positive.
    pub fn new(figure: &mut Figure, highlight: f32) -> Self {
        assert!(highlight > 0.0, "highlight scale must be positive");
        let root = figure.root().expect("selection needs a figure with a root");
        figure.pose_mut(root).local_scale *= highlight;
        Self {
            current: root,
            highlight,
        }
    }

    pub fn current(&self) -> SegmentId {
        self.current
    }

    pub fn select_next(&mut self, figure: &mut Figure) -> SegmentId {
        let order = figure.preorder();
        let target = order
            .iter()
            .position(|&id| id == self.current)
            .and_then(|at| order.get(at + 1).copied())
            .unwrap_or(self.current);
        self.select(figure, target)
    }

    pub fn select_previous(&mut self, figure: &mut Figure) -> SegmentId {
        let order = figure.preorder();
        let target = order
            .iter()
            .position(|&id| id == self.current)
            .and_then(|at| at.checked_sub(1))
            .map(|at| order[at])
            .unwrap_or(self.current);
        self.select(figure, target)
    }

    /// Moves the selection to `target`, transferring the highlight.
    pub fn select(&mut self, figure: &mut Figure, target: SegmentId) -> SegmentId {
        if target != self.current {
            figure.pose_mut(self.current).local_scale /= self.highlight;
            figure.pose_mut(target).local_scale *= self.highlight;
            tracing::debug!(
                target: "selection",
                from = %figure.segment(self.current).name,
                to = %figure.segment(target).name,
                "selection moved"
            );
            self.current = target;
        }
        self.current
    }
}
